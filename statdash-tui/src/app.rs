//! Application state: single-owner, main-thread only.
//!
//! Every state change ends in `refresh`, which runs one render cycle over the
//! loaded table and stores the result for drawing.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use statdash_core::chart::{ChartMode, Theme};
use statdash_core::config::DashboardConfig;
use statdash_core::domain::Year;
use statdash_core::export::{write_csv, ExportCache};
use statdash_core::{Dashboard, RenderOutput, RenderRequest, YearRange, YearlySource};

/// Which panel is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    #[default]
    Chart,
    Table,
    Summary,
    Help,
}

impl Panel {
    const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Panel::Chart => 0,
            Panel::Table => 1,
            Panel::Summary => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Chart),
            1 => Some(Panel::Table),
            2 => Some(Panel::Summary),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Chart => "Chart",
            Panel::Table => "Table",
            Panel::Summary => "Summary",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or_default()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or_default()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub config: DashboardConfig,
    pub dashboard: Dashboard,
    pub loaded_at: Option<DateTime<Local>>,
    pub mode: ChartMode,
    pub theme: Theme,
    /// Explicit range; `None` follows the full observed range.
    pub range: Option<YearRange>,
    pub highlights: BTreeSet<Year>,
    pub cursor_year: Option<Year>,
    pub export_cache: ExportCache,
    pub export_dir: PathBuf,
    pub status_message: Option<(String, StatusLevel)>,
    pub output: RenderOutput,
}

impl AppState {
    pub fn new(config: DashboardConfig, export_dir: PathBuf) -> Self {
        let dashboard = Dashboard::default();
        let output = dashboard.render(&RenderRequest::default());
        let view = config.view.clone();
        let mut app = Self {
            running: true,
            active_panel: Panel::Chart,
            config,
            dashboard,
            loaded_at: None,
            mode: view.mode,
            theme: view.theme,
            range: None,
            highlights: view.highlight_years.iter().copied().collect(),
            cursor_year: None,
            export_cache: ExportCache::new(),
            export_dir,
            status_message: None,
            output,
        };
        app.refresh();
        app
    }

    /// Load from the configured store. On failure the previous table stays.
    pub fn reload(&mut self) {
        let store = self.config.store.open_store();
        self.load_from(&store);
    }

    pub fn load_from(&mut self, source: &dyn YearlySource) {
        match Dashboard::load(source) {
            Ok(dashboard) => {
                self.dashboard = dashboard;
                self.loaded_at = Some(Local::now());
                if self.range.is_none() {
                    let requested = RenderRequest::from_view(&self.config.view, self.observed());
                    self.range = requested.range;
                }
                let rows = self.dashboard.records().len();
                info!(rows, source = source.name(), "dashboard loaded");
                self.set_status(format!("Loaded {rows} years"));
                self.clamp_range();
            }
            Err(e) => {
                error!(error = %e, "load failed");
                self.set_error(format!("Load failed: {e}"));
            }
        }
        self.refresh();
    }

    pub fn observed(&self) -> Option<YearRange> {
        self.dashboard.observed_range()
    }

    /// Range actually applied to the table.
    pub fn effective_range(&self) -> Option<YearRange> {
        self.range.or_else(|| self.observed())
    }

    pub fn request(&self) -> RenderRequest {
        RenderRequest {
            range: self.effective_range(),
            mode: self.mode,
            theme: self.theme,
            highlight_years: self.highlights.iter().copied().collect(),
        }
    }

    /// Run one render cycle for the current state.
    pub fn refresh(&mut self) {
        self.output = self.dashboard.render(&self.request());
        let years: Vec<Year> = self.output.filtered.iter().map(|r| r.year).collect();
        self.cursor_year = match self.cursor_year {
            Some(y) if years.contains(&y) => Some(y),
            _ => years.last().copied(),
        };
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.refresh();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.refresh();
    }

    /// Range the bound shifts start from. A range with no stored year
    /// restarts from the observed range.
    fn shift_base(&self) -> Option<(YearRange, YearRange)> {
        let observed = self.observed()?;
        let current = self.effective_range()?;
        if current.overlaps(&observed) {
            Some((observed, current))
        } else {
            Some((observed, observed))
        }
    }

    /// Move the lower bound, keeping it within the observed range and at most the upper bound.
    pub fn shift_min(&mut self, delta: Year) {
        let Some((observed, current)) = self.shift_base() else {
            return;
        };
        let min = (current.min + delta).clamp(observed.min, current.max.max(observed.min));
        self.range = Some(YearRange::new(min, current.max));
        self.refresh();
    }

    /// Move the upper bound, keeping it within the observed range and at least the lower bound.
    pub fn shift_max(&mut self, delta: Year) {
        let Some((observed, current)) = self.shift_base() else {
            return;
        };
        let max = (current.max + delta).clamp(current.min.min(observed.max), observed.max);
        self.range = Some(YearRange::new(current.min, max));
        self.refresh();
    }

    pub fn reset_range(&mut self) {
        self.range = None;
        self.set_status("Range reset");
        self.refresh();
    }

    /// Pull a stored range into the observed years. A range sharing no year
    /// with the table is kept as is, so the view stays empty.
    fn clamp_range(&mut self) {
        let (Some(range), Some(observed)) = (self.range, self.observed()) else {
            return;
        };
        if range.overlaps(&observed) {
            self.range = Some(range.clamp_to(&observed));
        } else {
            warn!(%range, %observed, "range has no stored years");
            self.set_warning(format!("Range {range} is outside the stored years {observed}"));
        }
    }

    /// Step the year cursor through the filtered years.
    pub fn move_cursor(&mut self, delta: isize) {
        let years: Vec<Year> = self.output.filtered.iter().map(|r| r.year).collect();
        if years.is_empty() {
            return;
        }
        let current = self
            .cursor_year
            .and_then(|y| years.iter().position(|&v| v == y))
            .unwrap_or(years.len() - 1);
        let next = current.saturating_add_signed(delta).min(years.len() - 1);
        self.cursor_year = Some(years[next]);
    }

    pub fn toggle_highlight(&mut self) {
        let Some(year) = self.cursor_year else {
            return;
        };
        if !self.highlights.remove(&year) {
            self.highlights.insert(year);
        }
        self.refresh();
    }

    /// Export the filtered table as CSV, reusing a cached export of identical content.
    pub fn export(&mut self) {
        let hits_before = self.export_cache.hits();
        let written = match self.export_cache.get_or_export(&self.output.filtered) {
            Ok(csv) => write_csv(&self.output.filtered, csv, &self.export_dir),
            Err(e) => Err(e),
        };
        match written {
            Ok(path) => {
                let cached = if self.export_cache.hits() > hits_before {
                    " (cached)"
                } else {
                    ""
                };
                self.set_status(format!("Exported to {}{cached}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.set_error(format!("Export failed: {e}"));
            }
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statdash_core::data::InMemorySource;
    use statdash_core::domain::YearlyRecord;

    fn source() -> InMemorySource {
        InMemorySource::new(
            (1990..=2024)
                .map(|y| YearlyRecord::new(y, 20_000_000i64, 8_000_000i64, 9_000_000i64))
                .collect(),
        )
    }

    fn loaded() -> AppState {
        let mut app = AppState::new(DashboardConfig::default(), std::env::temp_dir());
        app.load_from(&source());
        app
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Chart.next(), Panel::Table);
        assert_eq!(Panel::Help.next(), Panel::Chart);
        assert_eq!(Panel::Chart.prev(), Panel::Help);
        assert_eq!(Panel::from_index(4), None);
    }

    #[test]
    fn load_renders_full_range_with_default_highlights() {
        let app = loaded();
        assert_eq!(app.output.filtered.len(), 35);
        assert_eq!(app.cursor_year, Some(2024));
        let markers: Vec<Year> = app.output.chart.markers.iter().map(|m| m.year).collect();
        assert_eq!(markers, vec![2000, 2024]);
        assert!(app.loaded_at.is_some());
    }

    #[test]
    fn range_bounds_stay_ordered_and_inside_observed() {
        let mut app = loaded();
        app.shift_min(-5);
        assert_eq!(app.effective_range(), Some(YearRange::new(1990, 2024)));
        app.shift_max(-30);
        app.shift_min(40);
        let range = app.effective_range().unwrap();
        assert!(range.min <= range.max);
        assert_eq!(range, YearRange::new(1994, 1994));
        assert_eq!(app.output.filtered.len(), 1);
        app.reset_range();
        assert_eq!(app.output.filtered.len(), 35);
    }

    #[test]
    fn cursor_follows_filtered_years() {
        let mut app = loaded();
        app.move_cursor(-1);
        assert_eq!(app.cursor_year, Some(2023));
        app.move_cursor(100);
        assert_eq!(app.cursor_year, Some(2024));
        app.move_cursor(-100);
        assert_eq!(app.cursor_year, Some(1990));
        app.shift_min(5);
        assert_eq!(app.cursor_year, Some(2024));
    }

    #[test]
    fn space_toggles_highlight_at_cursor() {
        let mut app = loaded();
        app.move_cursor(-4);
        app.toggle_highlight();
        assert!(app.highlights.contains(&2020));
        assert_eq!(app.output.chart.markers.len(), 3);
        app.toggle_highlight();
        assert_eq!(app.output.chart.markers.len(), 2);
    }

    #[test]
    fn mode_and_theme_toggle_keep_data() {
        let mut app = loaded();
        let before = app.output.filtered.clone();
        app.toggle_mode();
        app.toggle_theme();
        assert_eq!(app.output.chart.mode, ChartMode::Trend);
        assert_eq!(app.output.chart.theme.theme, Theme::Light);
        assert_eq!(app.output.filtered, before);
    }

    #[test]
    fn failed_reload_keeps_previous_table() {
        let mut app = loaded();
        app.config.store.path = PathBuf::from("/nonexistent/stats.db");
        app.reload();
        assert_eq!(app.output.filtered.len(), 35);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }

    #[test]
    fn second_export_of_same_table_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded();
        app.export_dir = dir.path().to_path_buf();
        app.export();
        app.export();
        assert_eq!(app.export_cache.misses(), 1);
        assert_eq!(app.export_cache.hits(), 1);
        assert!(dir.path().join("yearly_stats_1990-2024.csv").is_file());
        let (msg, _) = app.status_message.clone().unwrap();
        assert!(msg.ends_with("(cached)"));
    }

    #[test]
    fn configured_bounds_apply_on_first_load() {
        let mut config = DashboardConfig::default();
        config.view.min_year = Some(2010);
        let mut app = AppState::new(config, std::env::temp_dir());
        app.load_from(&source());
        assert_eq!(app.effective_range(), Some(YearRange::new(2010, 2024)));
    }

    #[test]
    fn configured_range_outside_the_data_stays_empty() {
        let mut config = DashboardConfig::default();
        config.view.min_year = Some(1800);
        config.view.max_year = Some(1900);
        let mut app = AppState::new(config, std::env::temp_dir());
        app.load_from(&source());
        assert_eq!(app.effective_range(), Some(YearRange::new(1800, 1900)));
        assert!(app.output.filtered.is_empty());
        assert!(app.output.table.is_empty());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));

        app.shift_max(-1);
        assert_eq!(app.effective_range(), Some(YearRange::new(1990, 2023)));
        assert_eq!(app.output.filtered.len(), 34);
    }

    #[test]
    fn partly_overlapping_range_is_clamped() {
        let mut config = DashboardConfig::default();
        config.view.min_year = Some(1980);
        config.view.max_year = Some(1995);
        let mut app = AppState::new(config, std::env::temp_dir());
        app.load_from(&source());
        assert_eq!(app.effective_range(), Some(YearRange::new(1990, 1995)));
        assert_eq!(app.output.filtered.len(), 6);
    }
}
