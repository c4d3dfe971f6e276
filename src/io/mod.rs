//! I/O module
//!
//! Handles loading credit tables and locale-aware number handling.
//!
//! # Components
//!
//! - `table` - The `TableSource` capability and an in-memory table
//! - `csv_table` - CSV-backed table source
//! - `html_table` - HTML-backed table source (`<tr>`/`<td>` rows)
//! - `number_format` - Amount parsing and formatting per locale

pub mod csv_table;
pub mod html_table;
pub mod number_format;
pub mod table;

pub use csv_table::{CsvOptions, CsvTable};
pub use html_table::HtmlTable;
pub use number_format::NumberLocale;
pub use table::{MemoryTable, TableSource};

use crate::types::ReportResult;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

/// Format of the input document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Decide from the file extension (`.html`/`.htm` is HTML, anything else CSV)
    #[default]
    Auto,
    Html,
    Csv,
}

impl InputFormat {
    /// Resolve `Auto` against a concrete path
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_html = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
                    });
                if is_html {
                    InputFormat::Html
                } else {
                    InputFormat::Csv
                }
            }
            other => other,
        }
    }
}

/// Load a table from a file in the given format
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, or the CSV
/// delimiter is not ASCII. Undecodable CSV records are dropped, not fatal.
pub fn load_table(
    path: &Path,
    format: InputFormat,
    csv_options: CsvOptions,
) -> ReportResult<Box<dyn TableSource>> {
    match format.resolve(path) {
        InputFormat::Html => Ok(Box::new(HtmlTable::open(path)?)),
        InputFormat::Csv | InputFormat::Auto => Ok(Box::new(CsvTable::open(path, csv_options)?)),
    }
}
