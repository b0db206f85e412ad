//! View state persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use statdash_core::chart::{ChartMode, Theme};
use statdash_core::domain::Year;
use statdash_core::YearRange;

use crate::app::{AppState, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub mode: ChartMode,
    pub theme: Theme,
    pub highlights: Vec<Year>,
    pub range: Option<YearRange>,
    pub active_panel: Panel,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            mode: ChartMode::default(),
            theme: Theme::default(),
            highlights: vec![2000, 2024],
            range: None,
            active_panel: Panel::Chart,
        }
    }
}

/// Load persisted state from disk. `None` if the file is missing or corrupt.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        mode: app.mode,
        theme: app.theme,
        highlights: app.highlights.iter().copied().collect(),
        range: app.range,
        active_panel: app.active_panel,
    }
}

/// Apply persisted state before the first load.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.mode = state.mode;
    app.theme = state.theme;
    app.highlights = state.highlights.into_iter().collect();
    app.range = state.range;
    app.active_panel = state.active_panel;
    app.refresh();
}

#[cfg(test)]
mod tests {
    use super::*;
    use statdash_core::config::DashboardConfig;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statdash").join("state.json");

        let state = PersistedState {
            mode: ChartMode::Trend,
            theme: Theme::Light,
            highlights: vec![1995],
            range: Some(YearRange::new(1990, 2000)),
            active_panel: Panel::Table,
        };
        save(&path, &state).unwrap();
        assert_eq!(load(&path), Some(state));
    }

    #[test]
    fn missing_file_returns_none() {
        assert_eq!(load(Path::new("/nonexistent/path/state.json")), None);
    }

    #[test]
    fn corrupt_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();
        assert_eq!(load(&path), None);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"theme":"light"}"#).unwrap();
        let state = load(&path).unwrap();
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.highlights, vec![2000, 2024]);
    }

    #[test]
    fn extract_then_apply_restores_view() {
        let mut app = AppState::new(DashboardConfig::default(), std::env::temp_dir());
        app.mode = ChartMode::Trend;
        app.highlights.insert(1999);
        app.active_panel = Panel::Summary;
        let saved = extract(&app);

        let mut fresh = AppState::new(DashboardConfig::default(), std::env::temp_dir());
        apply(&mut fresh, saved.clone());
        assert_eq!(extract(&fresh), saved);
    }
}
