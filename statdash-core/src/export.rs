//! CSV export of the filtered table, plus a per-session memo of exports.
//!
//! Values are written in millions at full precision so that `parse_csv`
//! reproduces the exported records exactly. Missing values are empty fields.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::data::YearRange;
use crate::domain::{NormalizedRecord, Year};

pub const CSV_HEADER: [&str; 5] = [
    "year",
    "publishers",
    "studies",
    "other_attendees",
    "memorial_attendance",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv writer: {0}")]
    Flush(String),

    #[error("csv output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unexpected csv header: {found}")]
    Header { found: String },

    #[error("line {line}: invalid {field} value '{value}'")]
    Field {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn fmt_value(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize records to CSV, one row per record in input order.
pub fn export_csv(records: &[NormalizedRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        wtr.write_record([
            r.year.to_string(),
            fmt_value(r.publishers_m),
            fmt_value(r.studies_m),
            fmt_value(r.other_attendees_m),
            fmt_value(r.memorial_attendance_m),
        ])?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(data)?)
}

/// Parse CSV produced by [`export_csv`].
pub fn parse_csv(text: &str) -> Result<Vec<NormalizedRecord>, ExportError> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(ExportError::Header {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let field = |idx: usize| -> Result<Option<f64>, ExportError> {
            let raw = row.get(idx).unwrap_or("").trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<f64>().map(Some).map_err(|_| ExportError::Field {
                line,
                field: CSV_HEADER[idx],
                value: raw.to_string(),
            })
        };
        let year_raw = row.get(0).unwrap_or("").trim();
        let year: Year = year_raw.parse().map_err(|_| ExportError::Field {
            line,
            field: "year",
            value: year_raw.to_string(),
        })?;
        out.push(NormalizedRecord {
            year,
            publishers_m: field(1)?,
            studies_m: field(2)?,
            other_attendees_m: field(3)?,
            memorial_attendance_m: field(4)?,
        });
    }
    Ok(out)
}

/// BLAKE3 content hash of a table: years plus exact value bits, in order.
pub fn table_hash(records: &[NormalizedRecord]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(records.len() as u64).to_le_bytes());
    for r in records {
        hasher.update(&r.year.to_le_bytes());
        for v in [
            r.publishers_m,
            r.studies_m,
            r.other_attendees_m,
            r.memorial_attendance_m,
        ] {
            match v {
                Some(v) => {
                    hasher.update(&[1]);
                    hasher.update(&v.to_bits().to_le_bytes());
                }
                None => {
                    hasher.update(&[0]);
                }
            }
        }
    }
    hasher.finalize().to_hex().to_string()
}

/// Memo of CSV exports keyed by table content. Owned by one session; never evicts.
#[derive(Debug, Default)]
pub struct ExportCache {
    entries: HashMap<String, String>,
    hits: u64,
    misses: u64,
}

impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached CSV for `records`, exporting on first request.
    pub fn get_or_export(&mut self, records: &[NormalizedRecord]) -> Result<&str, ExportError> {
        match self.entries.entry(table_hash(records)) {
            Entry::Occupied(e) => {
                self.hits += 1;
                debug!(key = %e.key(), "export cache hit");
                Ok(e.into_mut().as_str())
            }
            Entry::Vacant(e) => {
                let csv = export_csv(records)?;
                self.misses += 1;
                Ok(e.insert(csv).as_str())
            }
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File name for an export of `records`.
pub fn export_file_name(records: &[NormalizedRecord]) -> String {
    match YearRange::observed(records) {
        Some(range) => format!("yearly_stats_{}-{}.csv", range.min, range.max),
        None => "yearly_stats_empty.csv".to_string(),
    }
}

/// Write `csv` for `records` under `dir`, creating it if needed.
pub fn write_csv(records: &[NormalizedRecord], csv: &str, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(records));
    fs::write(&path, csv).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = records.len(), "exported csv");
    Ok(path)
}

/// Export `records` and write them under `dir`.
pub fn save_csv(records: &[NormalizedRecord], dir: &Path) -> Result<PathBuf, ExportError> {
    let csv = export_csv(records)?;
    write_csv(records, &csv, dir)
}
