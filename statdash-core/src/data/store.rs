//! Yearly statistics sources and the SQLite store loader.
//!
//! The `YearlySource` trait abstracts over where raw rows come from, so the
//! pipeline can run against a live database or an in-memory table in tests.
//! Every source returns rows sorted by year ascending; store order is never
//! trusted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{RawValue, Year, YearlyRecord};

/// Default table holding one row per year.
pub const DEFAULT_TABLE: &str = "yearly_stats";

/// Data access failures. Fatal to a render cycle and never retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable at {path}: {reason}")]
    Unreachable { path: String, reason: String },

    #[error("table '{table}' not found in store")]
    MissingTable { table: String },

    #[error("column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("year value '{raw}' cannot be read as an integer")]
    InvalidYear { raw: String },

    #[error("store query failed: {0}")]
    Query(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value.to_string())
    }
}

/// Physical column names for the four logical fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub year: String,
    pub memorial_attendance: String,
    pub publishers: String,
    pub studies: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            year: "year".into(),
            memorial_attendance: "worldwide_worldwide_memorial_attendance".into(),
            publishers: "average_publishers_preaching_each_month".into(),
            studies: "average_bible_studies_each_month".into(),
        }
    }
}

impl ColumnMapping {
    /// Columns in projection order: year, attendance, publishers, studies.
    pub fn in_projection_order(&self) -> [&str; 4] {
        [
            self.year.as_str(),
            self.memorial_attendance.as_str(),
            self.publishers.as_str(),
            self.studies.as_str(),
        ]
    }
}

/// Anything that can produce the raw yearly table.
pub trait YearlySource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Load every yearly row, sorted by year ascending.
    fn load(&self) -> Result<Vec<YearlyRecord>, StoreError>;
}

/// Read-only SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    table: String,
    columns: ColumnMapping,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: DEFAULT_TABLE.to_string(),
            columns: ColumnMapping::default(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The fixed projection issued against the store.
    pub fn projection_sql(&self) -> String {
        let cols: Vec<String> = self
            .columns
            .in_projection_order()
            .iter()
            .map(|c| quote_ident(c))
            .collect();
        format!(
            "SELECT {} FROM {}",
            cols.join(", "),
            quote_ident(&self.table)
        )
    }

    fn open(&self) -> Result<Connection, StoreError> {
        if !self.path.is_file() {
            return Err(StoreError::Unreachable {
                path: self.path.display().to_string(),
                reason: "no such file".into(),
            });
        }
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Unreachable {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn check_schema(&self, conn: &Connection) -> Result<(), StoreError> {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
                [&self.table],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(StoreError::MissingTable {
                table: self.table.clone(),
            });
        }

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(&self.table)))?;
        let present = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .map(|name| name.map(|n| n.to_lowercase()))
            .collect::<Result<HashSet<String>, _>>()?;

        for column in self.columns.in_projection_order() {
            if !present.contains(&column.to_lowercase()) {
                return Err(StoreError::MissingColumn {
                    table: self.table.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    fn read_rows(&self, conn: &Connection) -> Result<Vec<YearlyRecord>, StoreError> {
        self.check_schema(conn)?;

        let mut stmt = conn.prepare(&self.projection_sql())?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(YearlyRecord {
                year: coerce_year(row.get_ref(0)?)?,
                memorial_attendance: raw_value(row.get_ref(1)?),
                publishers: raw_value(row.get_ref(2)?),
                studies: raw_value(row.get_ref(3)?),
            });
        }
        Ok(records)
    }
}

impl YearlySource for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn load(&self) -> Result<Vec<YearlyRecord>, StoreError> {
        debug!(path = %self.path.display(), table = %self.table, "opening store");
        let conn = self.open()?;

        // On error the connection drops here, which closes it.
        let mut records = self.read_rows(&conn)?;

        conn.close().map_err(|(_, e)| StoreError::from(e))?;

        records.sort_by_key(|r| r.year);
        info!(rows = records.len(), table = %self.table, "loaded yearly records");
        Ok(records)
    }
}

/// A fixed in-memory table. Useful for tests and for embedding without a store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<YearlyRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<YearlyRecord>) -> Self {
        Self { records }
    }
}

impl YearlySource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<Vec<YearlyRecord>, StoreError> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.year);
        Ok(records)
    }
}

/// Double-quote an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => RawValue::Null,
        ValueRef::Integer(i) => RawValue::Integer(i),
        ValueRef::Real(f) => RawValue::Real(f),
        ValueRef::Text(bytes) => RawValue::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn coerce_year(value: ValueRef<'_>) -> Result<Year, StoreError> {
    match value {
        ValueRef::Integer(i) => Year::try_from(i).map_err(|_| StoreError::InvalidYear {
            raw: i.to_string(),
        }),
        ValueRef::Real(f) => year_from_f64(f).ok_or_else(|| StoreError::InvalidYear {
            raw: f.to_string(),
        }),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            let trimmed = text.trim();
            trimmed
                .parse::<Year>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(year_from_f64))
                .ok_or_else(|| StoreError::InvalidYear {
                    raw: trimmed.to_string(),
                })
        }
        ValueRef::Null => Err(StoreError::InvalidYear { raw: "NULL".into() }),
        ValueRef::Blob(_) => Err(StoreError::InvalidYear { raw: "<blob>".into() }),
    }
}

fn year_from_f64(f: f64) -> Option<Year> {
    let in_range = f >= Year::MIN as f64 && f <= Year::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as Year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("yearly_stats"), "\"yearly_stats\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn projection_uses_default_columns() {
        let store = SqliteStore::new("jw_stats.db");
        assert_eq!(
            store.projection_sql(),
            "SELECT \"year\", \"worldwide_worldwide_memorial_attendance\", \
             \"average_publishers_preaching_each_month\", \
             \"average_bible_studies_each_month\" FROM \"yearly_stats\""
        );
    }

    #[test]
    fn coerce_year_accepts_integer_real_and_text() {
        assert_eq!(coerce_year(ValueRef::Integer(2020)).unwrap(), 2020);
        assert_eq!(coerce_year(ValueRef::Real(2021.0)).unwrap(), 2021);
        assert_eq!(coerce_year(ValueRef::Text(b" 2022 ")).unwrap(), 2022);
        assert_eq!(coerce_year(ValueRef::Text(b"2023.0")).unwrap(), 2023);
    }

    #[test]
    fn coerce_year_rejects_garbage() {
        assert!(matches!(
            coerce_year(ValueRef::Text(b"twenty")),
            Err(StoreError::InvalidYear { .. })
        ));
        assert!(matches!(
            coerce_year(ValueRef::Real(2020.5)),
            Err(StoreError::InvalidYear { .. })
        ));
        assert!(matches!(
            coerce_year(ValueRef::Null),
            Err(StoreError::InvalidYear { .. })
        ));
    }

    #[test]
    fn raw_value_keeps_text_verbatim() {
        assert_eq!(
            raw_value(ValueRef::Text(b"8,513,860")),
            RawValue::Text("8,513,860".into())
        );
        assert_eq!(raw_value(ValueRef::Blob(&[1, 2])), RawValue::Null);
    }

    #[test]
    fn missing_file_is_unreachable() {
        let store = SqliteStore::new("/nonexistent/dir/stats.db");
        assert!(matches!(
            store.load(),
            Err(StoreError::Unreachable { .. })
        ));
    }

    #[test]
    fn in_memory_source_sorts_by_year() {
        let source = InMemorySource::new(vec![
            YearlyRecord::new(2021, 1i64, 1i64, 1i64),
            YearlyRecord::new(2019, 1i64, 1i64, 1i64),
            YearlyRecord::new(2020, 1i64, 1i64, 1i64),
        ]);
        let years: Vec<Year> = source.load().unwrap().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
    }
}
