//! Chart categories with their fixed stacking order and colors.

use serde::{Deserialize, Serialize};

use super::NormalizedRecord;

/// The three categories drawn on every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Publishers,
    Studies,
    OtherAttendees,
}

impl Category {
    /// Stacking order, bottom to top.
    pub const ALL: [Category; 3] = [
        Category::Publishers,
        Category::Studies,
        Category::OtherAttendees,
    ];

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Publishers => "Publishers",
            Category::Studies => "Studies",
            Category::OtherAttendees => "Other Attendees",
        }
    }

    /// Fixed hex color, shared by every chart mode and theme.
    pub fn color(self) -> &'static str {
        match self {
            Category::Publishers => "#9ccfd8",
            Category::Studies => "#f6c177",
            Category::OtherAttendees => "#eb6f92",
        }
    }

    /// Value of this category in a normalized record (millions).
    pub fn value(self, record: &NormalizedRecord) -> Option<f64> {
        match self {
            Category::Publishers => record.publishers_m,
            Category::Studies => record.studies_m,
            Category::OtherAttendees => record.other_attendees_m,
        }
    }
}
