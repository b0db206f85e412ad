//! Display table: fixed column order, title-cased headers, one-decimal values.

use serde::{Deserialize, Serialize};

use crate::domain::{NormalizedRecord, Year};

/// Field keys in display order.
pub const COLUMNS: [&str; 5] = [
    "year",
    "publishers",
    "studies",
    "other_attendees",
    "memorial_attendance",
];

const MISSING: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub year: Year,
    /// Publishers, studies, other attendees, memorial attendance (millions, 1 dp).
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| DisplayRow {
                year: r.year,
                values: [
                    r.publishers_m,
                    r.studies_m,
                    r.other_attendees_m,
                    r.memorial_attendance_m,
                ]
                .into_iter()
                .map(|v| v.map(|v| round_to(v, 1)))
                .collect(),
            })
            .collect();

        Self {
            headers: COLUMNS.iter().map(|c| title_case(c)).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of cell `col` in `row`; column 0 is the year. Out of range is `None`.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        let r = self.rows.get(row)?;
        if col == 0 {
            return Some(r.year.to_string());
        }
        let value = r.values.get(col - 1)?;
        Some(value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.1}")))
    }

    /// Plain-text rendering: right-aligned columns separated by two spaces.
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        let cells: Vec<Vec<String>> = (0..self.rows.len())
            .map(|i| {
                (0..self.headers.len())
                    .map(|c| self.cell_text(i, c).unwrap_or_default())
                    .collect()
            })
            .collect();
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |cols: &[String]| -> String {
            cols.iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:>w$}", w = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut out = line(&self.headers);
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &cells {
            out.push('\n');
            out.push_str(&line(row));
        }
        out.push('\n');
        out
    }
}

/// `"other_attendees"` → `"Other Attendees"`. Underscores, hyphens and runs of
/// whitespace all become a single space.
pub fn title_case(field: &str) -> String {
    field
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_title_cased_in_fixed_order() {
        let t = DisplayTable::from_records(&[]);
        assert_eq!(
            t.headers,
            vec![
                "Year",
                "Publishers",
                "Studies",
                "Other Attendees",
                "Memorial Attendance"
            ]
        );
    }

    #[test]
    fn title_case_handles_mixed_separators() {
        assert_eq!(title_case("other_attendees"), "Other Attendees");
        assert_eq!(title_case("memorial-attendance"), "Memorial Attendance");
        assert_eq!(title_case("  two   words "), "Two Words");
        assert_eq!(title_case("YEAR"), "Year");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn values_round_to_one_decimal() {
        assert_eq!(round_to(8.70091, 1), 8.7);
        assert_eq!(round_to(10.52299, 1), 10.5);
        assert_eq!(round_to(-10.71004, 1), -10.7);
        assert_eq!(round_to(0.25, 1), 0.3);
    }

    #[test]
    fn scenario_table_rows() {
        let r = NormalizedRecord::from_measured(2020, Some(8.51386), Some(8.70091), Some(10.52299));
        let t = DisplayTable::from_records(&[r]);
        assert_eq!(t.rows[0].year, 2020);
        assert_eq!(t.rows[0].values, vec![Some(8.7), Some(10.5), Some(-10.7), Some(8.5)]);
        assert_eq!(t.cell_text(0, 0).as_deref(), Some("2020"));
        assert_eq!(t.cell_text(0, 3).as_deref(), Some("-10.7"));
        assert_eq!(t.cell_text(0, 9), None);
        assert_eq!(t.cell_text(1, 0), None);
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let r = NormalizedRecord::from_measured(2019, None, Some(1.0), Some(2.0));
        let t = DisplayTable::from_records(&[r]);
        assert_eq!(t.rows[0].values[2], None);
        assert_eq!(t.cell_text(0, 4).as_deref(), Some("—"));
    }

    #[test]
    fn render_text_aligns_columns() {
        let rows = vec![
            NormalizedRecord::from_measured(2020, Some(20.0), Some(8.7), Some(10.5)),
            NormalizedRecord::from_measured(2021, Some(21.4), Some(8.6), Some(10.3)),
        ];
        let text = DisplayTable::from_records(&rows).render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Year"));
        assert!(lines[2].contains("2020"));
        assert!(lines[3].contains("21.4"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
