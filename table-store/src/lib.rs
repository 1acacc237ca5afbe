//! Flat-table boundary of the pipeline: CSV readers for posts and the
//! user/POI registries, and the enriched-record table written after
//! analysis and read back for matching.

use chrono::NaiveDateTime;
use std::io::Cursor;
use std::path::Path;
use vialert_core::{EngineError, TableError};

pub mod enriched;
pub mod posts;
pub mod registry;

pub use enriched::*;
pub use posts::*;
pub use registry::*;

/// Opens a table for reading. Files written by spreadsheet tools often
/// carry a UTF-8 byte-order mark; it is stripped here so the first header
/// name matches.
pub(crate) fn open_table(path: &Path) -> Result<csv::Reader<Cursor<String>>, EngineError> {
    if !path.exists() {
        return Err(TableError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let mut raw = std::fs::read_to_string(path)?;
    if let Some(stripped) = raw.strip_prefix('\u{feff}') {
        raw = stripped.to_string();
    }
    Ok(csv::Reader::from_reader(Cursor::new(raw)))
}

pub(crate) fn require_columns(
    headers: &csv::StringRecord,
    table: &str,
    required: &[&str],
) -> Result<(), TableError> {
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(TableError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Accepts the two timestamp shapes the ingest scripts produce.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

pub(crate) fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}
