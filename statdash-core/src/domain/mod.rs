//! Domain types for yearly statistics

pub mod category;
pub mod record;

pub use category::Category;
pub use record::{NormalizedRecord, RawValue, YearlyRecord};

/// Calendar year key.
pub type Year = i32;

/// Scale factor from raw counts to chart units (millions).
pub const MILLION: f64 = 1_000_000.0;
