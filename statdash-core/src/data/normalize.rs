//! Column normalizer: raw counts → millions, plus the derived column.
//!
//! A cell that fails to parse becomes missing for that cell only; it never
//! aborts the row or the table.

use tracing::warn;

use crate::domain::{NormalizedRecord, RawValue, YearlyRecord, MILLION};

/// Parse a stored cell into a count.
///
/// Text has its thousands separators stripped before parsing. Null, blobs,
/// unparseable text and non-finite numbers are all missing.
pub fn parse_raw(value: &RawValue) -> Option<f64> {
    let parsed = match value {
        RawValue::Integer(i) => Some(*i as f64),
        RawValue::Real(f) => Some(*f),
        RawValue::Text(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',').collect();
            cleaned.trim().parse::<f64>().ok()
        }
        RawValue::Null => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn to_millions(value: &RawValue) -> Option<f64> {
    parse_raw(value).map(|v| v / MILLION)
}

/// Normalize one raw row.
pub fn normalize_record(record: &YearlyRecord) -> NormalizedRecord {
    NormalizedRecord::from_measured(
        record.year,
        to_millions(&record.memorial_attendance),
        to_millions(&record.publishers),
        to_millions(&record.studies),
    )
}

/// Normalize the raw table. Order-preserving and pure apart from logging.
pub fn normalize(records: &[YearlyRecord]) -> Vec<NormalizedRecord> {
    let mut anomalies = 0usize;
    let mut negative_other = 0usize;

    let normalized: Vec<NormalizedRecord> = records
        .iter()
        .map(|raw| {
            let n = normalize_record(raw);
            anomalies += [
                (&raw.memorial_attendance, n.memorial_attendance_m),
                (&raw.publishers, n.publishers_m),
                (&raw.studies, n.studies_m),
            ]
            .iter()
            .filter(|(cell, parsed)| !cell.is_null() && parsed.is_none())
            .count();
            if n.other_attendees_m.is_some_and(|v| v < 0.0) {
                negative_other += 1;
            }
            n
        })
        .collect();

    if anomalies > 0 {
        warn!(cells = anomalies, "non-numeric values treated as missing");
    }
    if negative_other > 0 {
        warn!(
            rows = negative_other,
            "publishers plus studies exceed memorial attendance; other attendees left negative"
        );
    }
    normalized
}

/// Rescale a normalized row back to raw counts.
pub fn denormalize(record: &NormalizedRecord) -> YearlyRecord {
    let raw = |v: Option<f64>| v.map_or(RawValue::Null, |m| RawValue::Real(m * MILLION));
    YearlyRecord {
        year: record.year,
        memorial_attendance: raw(record.memorial_attendance_m),
        publishers: raw(record.publishers_m),
        studies: raw(record.studies_m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn parse_strips_thousands_separators() {
        assert_eq!(parse_raw(&RawValue::from("8,513,860")), Some(8_513_860.0));
        assert_eq!(parse_raw(&RawValue::from(" 10,522,990 ")), Some(10_522_990.0));
        assert_eq!(parse_raw(&RawValue::from("1234.5")), Some(1234.5));
    }

    #[test]
    fn parse_numeric_cells_directly() {
        assert_eq!(parse_raw(&RawValue::Integer(42)), Some(42.0));
        assert_eq!(parse_raw(&RawValue::Real(4.5)), Some(4.5));
    }

    #[test]
    fn parse_failures_are_missing() {
        assert_eq!(parse_raw(&RawValue::from("n/a")), None);
        assert_eq!(parse_raw(&RawValue::from("")), None);
        assert_eq!(parse_raw(&RawValue::from("NaN")), None);
        assert_eq!(parse_raw(&RawValue::Real(f64::INFINITY)), None);
        assert_eq!(parse_raw(&RawValue::Null), None);
    }

    #[test]
    fn scenario_two_years_of_text_counts() {
        let raw = vec![
            YearlyRecord::new(2020, "8,513,860", "8,700,910", "10,522,990"),
            YearlyRecord::new(2021, "8,397,123", "8,580,000", "10,310,500"),
        ];
        let n = normalize(&raw);

        assert_eq!(n.len(), 2);
        assert_eq!(n[0].year, 2020);
        assert_eq!(n[1].year, 2021);
        assert!(close(n[0].publishers_m, 8.70091));
        assert!(close(n[1].publishers_m, 8.58));
        assert!(close(n[0].studies_m, 10.52299));
        assert!(close(n[1].studies_m, 10.3105));
        assert!(close(n[0].memorial_attendance_m, 8.51386));

        let other = n[0].other_attendees_m.unwrap();
        assert!((other - (8.51386 - 8.70091 - 10.52299)).abs() < 1e-9);
        assert!((other - (-10.71)).abs() < 0.01);
    }

    #[test]
    fn bad_cell_does_not_abort_row_or_table() {
        let raw = vec![
            YearlyRecord::new(2019, "oops", "1,000,000", "2,000,000"),
            YearlyRecord::new(2020, 5_000_000i64, 1_000_000i64, 2_000_000i64),
        ];
        let n = normalize(&raw);

        assert_eq!(n[0].memorial_attendance_m, None);
        assert!(close(n[0].publishers_m, 1.0));
        assert!(close(n[0].studies_m, 2.0));
        assert_eq!(n[0].other_attendees_m, None);
        assert!(close(n[1].other_attendees_m, 2.0));
    }

    #[test]
    fn normalize_preserves_input_order() {
        let raw = vec![
            YearlyRecord::new(2022, 1i64, 1i64, 1i64),
            YearlyRecord::new(1999, 1i64, 1i64, 1i64),
        ];
        let years: Vec<i32> = normalize(&raw).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2022, 1999]);
    }

    #[test]
    fn denormalize_then_normalize_reproduces_values() {
        let original = NormalizedRecord::from_measured(2020, Some(8.51386), Some(8.70091), None);
        let again = normalize_record(&denormalize(&original));
        assert_eq!(again.year, 2020);
        assert!(close(again.memorial_attendance_m, 8.51386));
        assert!(close(again.publishers_m, 8.70091));
        assert_eq!(again.studies_m, None);
        assert_eq!(again.other_attendees_m, None);
    }
}
