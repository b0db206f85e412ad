//! Yearly records: raw rows as stored, and their normalized form.

use serde::{Deserialize, Serialize};

use super::Year;

/// A single cell as the store returned it.
///
/// Counts may arrive as integers, reals, or comma-grouped text such as
/// `"8,513,860"`; parsing is deferred to the normalizer so a bad cell only
/// affects itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Real(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

/// One row per calendar year, before any parsing or scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: Year,
    pub memorial_attendance: RawValue,
    pub publishers: RawValue,
    pub studies: RawValue,
}

impl YearlyRecord {
    pub fn new(
        year: Year,
        memorial_attendance: impl Into<RawValue>,
        publishers: impl Into<RawValue>,
        studies: impl Into<RawValue>,
    ) -> Self {
        Self {
            year,
            memorial_attendance: memorial_attendance.into(),
            publishers: publishers.into(),
            studies: studies.into(),
        }
    }
}

/// A yearly row in millions, with the derived other-attendees column.
///
/// `None` marks a missing value; it propagates through arithmetic and means
/// rather than turning into zero. `other_attendees_m` may be negative when
/// publishers plus studies exceed attendance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub year: Year,
    pub publishers_m: Option<f64>,
    pub studies_m: Option<f64>,
    pub other_attendees_m: Option<f64>,
    pub memorial_attendance_m: Option<f64>,
}

impl NormalizedRecord {
    /// Build a record from the three measured columns, deriving other attendees.
    pub fn from_measured(
        year: Year,
        memorial_attendance_m: Option<f64>,
        publishers_m: Option<f64>,
        studies_m: Option<f64>,
    ) -> Self {
        let other_attendees_m = match (memorial_attendance_m, publishers_m, studies_m) {
            (Some(a), Some(p), Some(s)) => Some(a - p - s),
            _ => None,
        };
        Self {
            year,
            publishers_m,
            studies_m,
            other_attendees_m,
            memorial_attendance_m,
        }
    }
}
