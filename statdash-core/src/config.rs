//! Dashboard configuration, stored as TOML.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! standard dashboard over `jw_stats.db`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::{ChartMode, Theme};
use crate::data::{ColumnMapping, SqliteStore};
use crate::domain::Year;

pub const DEFAULT_DB_PATH: &str = "jw_stats.db";
pub const DEFAULT_HIGHLIGHTS: [Year; 2] = [2000, 2024];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub table: String,
    pub columns: ColumnMapping,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            table: crate::data::store::DEFAULT_TABLE.to_string(),
            columns: ColumnMapping::default(),
        }
    }
}

impl StoreConfig {
    pub fn open_store(&self) -> SqliteStore {
        SqliteStore::new(&self.path)
            .with_table(self.table.clone())
            .with_columns(self.columns.clone())
    }
}

/// Initial view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub mode: ChartMode,
    pub theme: Theme,
    pub highlight_years: Vec<Year>,
    pub min_year: Option<Year>,
    pub max_year: Option<Year>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: ChartMode::default(),
            theme: Theme::default(),
            highlight_years: DEFAULT_HIGHLIGHTS.to_vec(),
            min_year: None,
            max_year: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub store: StoreConfig,
    pub view: ViewConfig,
}

impl DashboardConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = DashboardConfig::from_toml("").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.store.path, PathBuf::from("jw_stats.db"));
        assert_eq!(cfg.store.table, "yearly_stats");
        assert_eq!(cfg.view.mode, ChartMode::Composition);
        assert_eq!(cfg.view.theme, Theme::Dark);
        assert_eq!(cfg.view.highlight_years, vec![2000, 2024]);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg = DashboardConfig::from_toml(
            r#"
            [store]
            path = "/data/stats.db"

            [store.columns]
            publishers = "pubs"

            [view]
            mode = "trend"
            theme = "light"
            min_year = 1990
            "#,
        )
        .unwrap();
        assert_eq!(cfg.store.path, PathBuf::from("/data/stats.db"));
        assert_eq!(cfg.store.columns.publishers, "pubs");
        assert_eq!(cfg.store.columns.year, "year");
        assert_eq!(cfg.view.mode, ChartMode::Trend);
        assert_eq!(cfg.view.theme, Theme::Light);
        assert_eq!(cfg.view.min_year, Some(1990));
        assert_eq!(cfg.view.max_year, None);
        assert_eq!(cfg.view.highlight_years, vec![2000, 2024]);
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = DashboardConfig::from_toml("[view]\nmode = \"pie\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = DashboardConfig::default();
        cfg.view.max_year = Some(2020);
        let text = cfg.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/statdash.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn store_config_builds_store() {
        let store = StoreConfig::default().open_store();
        assert_eq!(store.table(), "yearly_stats");
        assert_eq!(store.path(), Path::new("jw_stats.db"));
    }
}
