//! Terminal palettes for the dark and light dashboard themes.
//!
//! Surface colors come from the chart theme so the terminal matches the
//! exported chart description; accents use the same Rosé Pine family as the
//! category colors.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use statdash_core::chart::{Theme, HIGHLIGHT_COLOR};
use statdash_core::domain::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub grid: Color,
    pub accent: Color,
    pub muted: Color,
    pub warning: Color,
    pub negative: Color,
    /// Row highlight in tables.
    pub selection: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let chart = theme.chart_theme();
        let surface = |hex: &str, fallback: Color| hex_color(hex).unwrap_or(fallback);
        match theme {
            Theme::Dark => Self {
                background: surface(&chart.paper_background, Color::Black),
                foreground: surface(&chart.font_color, Color::White),
                grid: surface(&chart.grid_color, Color::DarkGray),
                accent: Color::Rgb(156, 207, 216),
                muted: Color::Rgb(110, 106, 134),
                warning: Color::Rgb(246, 193, 119),
                negative: Color::Rgb(235, 111, 146),
                selection: Color::Rgb(57, 53, 82),
            },
            Theme::Light => Self {
                background: surface(&chart.paper_background, Color::White),
                foreground: surface(&chart.font_color, Color::Black),
                grid: surface(&chart.grid_color, Color::Gray),
                accent: Color::Rgb(40, 105, 131),
                muted: Color::Rgb(152, 147, 165),
                warning: Color::Rgb(234, 157, 52),
                negative: Color::Rgb(180, 99, 122),
                selection: Color::Rgb(223, 218, 217),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn negative(&self) -> Style {
        Style::default().fg(self.negative)
    }

    pub fn panel_border(&self, active: bool) -> Style {
        if active {
            self.accent()
        } else {
            Style::default().fg(self.grid)
        }
    }
}

/// Parse `#rrggbb` (or a ratatui color name) into a terminal color.
pub fn hex_color(value: &str) -> Option<Color> {
    if value.eq_ignore_ascii_case("gold") {
        return Some(Color::Rgb(255, 215, 0));
    }
    Color::from_str(value).ok()
}

pub fn category_color(category: Category) -> Color {
    hex_color(category.color()).unwrap_or(Color::Reset)
}

pub fn highlight_color() -> Color {
    hex_color(HIGHLIGHT_COLOR).unwrap_or(Color::Yellow)
}
