//! Report configuration
//!
//! Everything that varies between credit table exports: which column holds
//! which field, how dates and amounts are written, and how unrecognized
//! statuses are treated. Values come from defaults, an optional JSON file,
//! and command-line flags, in increasing order of precedence.
//!
//! ```json
//! {
//!   "columns": { "date": 3, "credit_type": 7, "employee": 8, "status": 11, "amount": 10 },
//!   "date_format": "%d/%m/%Y %H:%M:%S",
//!   "amount_locale": "fr",
//!   "status_aliases": { "оформлено": "issued" },
//!   "unknown_status": "count",
//!   "csv": { "delimiter": ";", "has_headers": true }
//! }
//! ```

use crate::core::status::UnknownStatusPolicy;
use crate::io::{CsvOptions, InputFormat, NumberLocale};
use crate::types::{CreditStatus, ReportError, ReportResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Default date-time layout of the source tables (`DD/MM/YYYY HH:MM:SS`)
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// 1-based column positions of the record fields
///
/// Positions follow the `nth-child` numbering of the source HTML tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnLayout {
    pub date: usize,
    pub credit_type: usize,
    pub employee: usize,
    pub status: usize,

    /// Amount column; when absent the amount cell is detected by its shape
    pub amount: Option<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            date: 3,
            credit_type: 7,
            employee: 8,
            status: 11,
            amount: None,
        }
    }
}

impl ColumnLayout {
    /// Check that every position is at least 1
    pub fn validate(&self) -> ReportResult<()> {
        let positions = [
            ("date", Some(self.date)),
            ("credit_type", Some(self.credit_type)),
            ("employee", Some(self.employee)),
            ("status", Some(self.status)),
            ("amount", self.amount),
        ];

        for (field, position) in positions {
            if position == Some(0) {
                return Err(ReportError::invalid_config(format!(
                    "column position for '{}' must be 1 or greater",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Complete configuration of one report run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub columns: ColumnLayout,

    /// chrono format string for the date-time column
    pub date_format: String,

    /// Number convention of the amounts in the input
    pub amount_locale: NumberLocale,

    /// Number convention of the amounts in the text report
    pub output_locale: NumberLocale,

    /// Extra status labels on top of the built-in translations
    pub status_aliases: BTreeMap<String, CreditStatus>,

    pub unknown_status: UnknownStatusPolicy,

    pub input_format: InputFormat,

    pub csv: CsvOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            columns: ColumnLayout::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            amount_locale: NumberLocale::default(),
            output_locale: NumberLocale::default(),
            status_aliases: BTreeMap::new(),
            unknown_status: UnknownStatusPolicy::default(),
            input_format: InputFormat::default(),
            csv: CsvOptions::default(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration file
    ///
    /// Missing keys keep their defaults; unknown keys are rejected.
    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::IoError {
                message: format!("Failed to read config '{}': {}", path.display(), e),
            },
        })?;

        Self::from_json(&content)
    }

    /// Parse a configuration from JSON text
    pub fn from_json(content: &str) -> ReportResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ReportError::invalid_config(format!("config file: {}", e)))
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> ReportResult<()> {
        self.columns.validate()?;

        if self.date_format.trim().is_empty() {
            return Err(ReportError::invalid_config("date format must not be empty"));
        }
        if !self.csv.delimiter.is_ascii() {
            return Err(ReportError::invalid_config(format!(
                "CSV delimiter '{}' must be an ASCII character",
                self.csv.delimiter
            )));
        }
        Ok(())
    }
}
