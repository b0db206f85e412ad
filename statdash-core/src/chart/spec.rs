//! Chart description types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::theme::ChartTheme;
use crate::domain::{Category, Year};

/// Marker color for highlighted years.
pub const HIGHLIGHT_COLOR: &str = "gold";

/// Error for parsing a mode or theme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Which chart variant to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Stacked bars with highlight markers.
    #[default]
    Composition,
    /// One line-with-markers series per category.
    Trend,
}

impl ChartMode {
    pub fn toggle(self) -> Self {
        match self {
            ChartMode::Composition => ChartMode::Trend,
            ChartMode::Trend => ChartMode::Composition,
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartMode::Composition => "composition",
            ChartMode::Trend => "trend",
        })
    }
}

impl FromStr for ChartMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "composition" | "stacked" => Ok(ChartMode::Composition),
            "trend" | "lines" => Ok(ChartMode::Trend),
            _ => Err(ParseEnumError::new("chart mode", s, "composition, trend")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    LinesMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPosition {
    TopLeft,
}

/// One x position of a series.
///
/// `base` is the bottom of a stacked bar segment; `None` for line series and
/// for segments stacked on top of a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: Year,
    pub value: Option<f64>,
    pub base: Option<f64>,
}

impl SeriesPoint {
    /// Top of the drawn segment (`base + value`, or `value` for unstacked points).
    pub fn top(&self) -> Option<f64> {
        match (self.base, self.value) {
            (Some(b), Some(v)) => Some(b + v),
            (None, v) => v,
            (Some(_), None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub category: Category,
    pub kind: SeriesKind,
    pub color: String,
    pub offset_group: Option<u32>,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Drawable `(year, bottom, top)` segments. Bars start at their base,
    /// lines at the value itself; points that cannot be placed are skipped.
    pub fn segments(&self) -> Vec<(Year, f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| match self.kind {
                SeriesKind::Bar => Some((p.year, p.base?, p.top()?)),
                SeriesKind::LinesMarkers => {
                    let v = p.value?;
                    Some((p.year, v, v))
                }
            })
            .collect()
    }
}

/// Dashed vertical marker at a highlighted year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightMarker {
    pub year: Year,
    pub label: String,
    pub color: String,
    pub dash: LineDash,
    pub width: f64,
    pub annotation_position: AnnotationPosition,
}

impl HighlightMarker {
    pub fn at(year: Year) -> Self {
        Self {
            year,
            label: year.to_string(),
            color: HIGHLIGHT_COLOR.to_string(),
            dash: LineDash::Dash,
            width: 2.0,
            annotation_position: AnnotationPosition::TopLeft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub horizontal: bool,
    pub x: f64,
    pub y: f64,
    pub x_anchor: String,
    pub y_anchor: String,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            title: String::new(),
            horizontal: true,
            x: 0.0,
            y: 1.02,
            x_anchor: "left".into(),
            y_anchor: "bottom".into(),
        }
    }
}

/// Complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub mode: ChartMode,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub height: u32,
    pub bar_mode: Option<BarMode>,
    pub theme: ChartTheme,
    pub legend: Legend,
    pub series: Vec<Series>,
    pub markers: Vec<HighlightMarker>,
}

impl ChartSpec {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn series_for(&self, category: Category) -> Option<&Series> {
        self.series.iter().find(|s| s.category == category)
    }

    /// Distinct x positions across all series, ascending.
    pub fn years(&self) -> Vec<Year> {
        let mut years: Vec<Year> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.year))
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// `(min, max)` of everything drawn on the y axis, always including zero
    /// for stacked charts. `None` when nothing is drawable.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self
            .series
            .iter()
            .flat_map(|s| s.segments())
            .flat_map(|(_, lo, hi)| [lo, hi])
            .peekable();
        values.peek()?;
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if self.bar_mode.is_some() {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        Some((lo, hi))
    }
}
