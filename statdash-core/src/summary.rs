//! Summary KPIs over the filtered table.

use serde::{Deserialize, Serialize};

use crate::domain::NormalizedRecord;

/// Column means in millions. Each mean skips missing values on its own;
/// a column with no present values has no mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub record_count: usize,
    pub avg_publishers_m: Option<f64>,
    pub avg_studies_m: Option<f64>,
    pub avg_memorial_attendance_m: Option<f64>,
}

impl SummaryStats {
    pub fn compute(records: &[NormalizedRecord]) -> Self {
        Self {
            record_count: records.len(),
            avg_publishers_m: mean(records.iter().map(|r| r.publishers_m)),
            avg_studies_m: mean(records.iter().map(|r| r.studies_m)),
            avg_memorial_attendance_m: mean(records.iter().map(|r| r.memorial_attendance_m)),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 3] {
        [
            ("Avg Publishers (M)", self.avg_publishers_m),
            ("Avg Studies (M)", self.avg_studies_m),
            ("Avg Memorial Attendance (M)", self.avg_memorial_attendance_m),
        ]
    }
}

/// Arithmetic mean of the present values.
pub fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_missing() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)].into_iter()), Some(2.0));
        assert_eq!(mean([None, None].into_iter()), None);
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn scenario_means_over_two_years() {
        let rows = vec![
            NormalizedRecord::from_measured(2020, Some(8.51386), Some(8.70091), Some(10.52299)),
            NormalizedRecord::from_measured(2021, Some(8.397123), Some(8.58), Some(10.3105)),
        ];
        let s = SummaryStats::compute(&rows);
        assert_eq!(s.record_count, 2);
        assert!((s.avg_publishers_m.unwrap() - 8.640455).abs() < 1e-9);
        assert!((s.avg_studies_m.unwrap() - 10.416745).abs() < 1e-9);
        assert!((s.avg_memorial_attendance_m.unwrap() - 8.4554915).abs() < 1e-9);
    }

    #[test]
    fn each_column_is_independent() {
        let rows = vec![
            NormalizedRecord::from_measured(2020, None, Some(2.0), None),
            NormalizedRecord::from_measured(2021, None, Some(4.0), Some(1.0)),
        ];
        let s = SummaryStats::compute(&rows);
        assert_eq!(s.avg_memorial_attendance_m, None);
        assert_eq!(s.avg_publishers_m, Some(3.0));
        assert_eq!(s.avg_studies_m, Some(1.0));
    }

    #[test]
    fn empty_table_has_no_means() {
        let s = SummaryStats::compute(&[]);
        assert_eq!(s, SummaryStats::default());
        assert!(s.entries().iter().all(|(_, v)| v.is_none()));
    }
}
