//! CSV-backed table source
//!
//! Loads a CSV export of the credit table into memory so the row extractor
//! can address cells by position.
//!
//! # Design
//!
//! The reader is configured to:
//! - Trim whitespace from all fields
//! - Allow flexible field counts (exports often have ragged rows)
//! - Optionally skip a header row
//!
//! Records the CSV reader cannot decode (e.g. invalid UTF-8) are logged and
//! dropped; only I/O failures are fatal. Rows with unexpected content are left
//! for the extractor to skip.

use crate::io::table::TableSource;
use crate::types::{ReportError, ReportResult};
use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// CSV dialect options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter (a single ASCII character)
    pub delimiter: char,

    /// Whether the first line is a header to be skipped
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: ',',
            has_headers: false,
        }
    }
}

/// Table loaded from CSV
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    records: Vec<StringRecord>,
    undecodable: usize,
}

impl CsvTable {
    /// Load a CSV file
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the path does not exist
    /// - `IoError` if the file cannot be read
    /// - `InvalidConfig` if the delimiter is not ASCII
    pub fn open(path: &Path, options: CsvOptions) -> ReportResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        Self::from_reader(file, options)
    }

    /// Load CSV from any reader
    pub fn from_reader<R: Read>(reader: R, options: CsvOptions) -> ReportResult<Self> {
        if !options.delimiter.is_ascii() {
            return Err(ReportError::invalid_config(format!(
                "CSV delimiter '{}' must be an ASCII character",
                options.delimiter
            )));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter as u8)
            .has_headers(options.has_headers)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        let mut table = CsvTable::default();
        for result in reader.records() {
            match result {
                Ok(record) => table.records.push(record),
                Err(e) if matches!(e.kind(), ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    table.undecodable += 1;
                    log::debug!("Skipping CSV record: {}", e);
                }
            }
        }

        log::debug!(
            "Loaded {} CSV rows ({} undecodable)",
            table.records.len(),
            table.undecodable
        );
        Ok(table)
    }
}

impl TableSource for CsvTable {
    fn row_count(&self) -> usize {
        self.records.len()
    }

    fn cell_count(&self, row: usize) -> usize {
        self.records.get(row).map_or(0, StringRecord::len)
    }

    fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.records.get(row).and_then(|record| record.get(col))
    }

    fn unreadable_rows(&self) -> usize {
        self.undecodable
    }
}
