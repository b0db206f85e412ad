//! Visual themes. A theme only picks background and template; series data
//! and category colors are untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::spec::ParseEnumError;

/// Dashboard theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Template and background colors for this theme.
    pub fn chart_theme(self) -> ChartTheme {
        match self {
            Theme::Dark => ChartTheme {
                theme: self,
                template: "plotly_dark".into(),
                paper_background: "#111111".into(),
                plot_background: "#111111".into(),
                font_color: "#f2f5fa".into(),
                grid_color: "#283442".into(),
            },
            Theme::Light => ChartTheme {
                theme: self,
                template: "plotly_white".into(),
                paper_background: "#ffffff".into(),
                plot_background: "#ffffff".into(),
                font_color: "#2a3f5f".into(),
                grid_color: "#ebf0f8".into(),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ParseEnumError::new("theme", s, "dark, light")),
        }
    }
}

/// Background/template part of a chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub theme: Theme,
    pub template: String,
    pub paper_background: String,
    pub plot_background: String,
    pub font_color: String,
    pub grid_color: String,
}
