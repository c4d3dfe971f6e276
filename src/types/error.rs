//! Error types for the credit report
//!
//! This module defines all error types that can occur while loading a table,
//! extracting records, and rendering the report.
//!
//! # Error Categories
//!
//! - **Input Errors**: File not found, I/O failures, malformed CSV structure
//! - **Configuration Errors**: Invalid column positions, unreadable config files
//! - **Row Errors**: Missing cells, unparseable dates or amounts (row is skipped)
//! - **Arithmetic Errors**: Decimal overflow while accumulating (record is rejected)

use thiserror::Error;

/// Main error type for the credit report
///
/// Row and arithmetic errors are recoverable: the affected row or record
/// contributes nothing and processing continues. All other variants are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading input or writing the report
    #[error("I/O error: {message}")]
    IoError { message: String },

    /// The CSV input is structurally malformed
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    CsvError { line: Option<u64>, message: String },

    /// A configuration value is invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The report could not be serialized
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// A required cell is absent from a row
    ///
    /// Recoverable - the row is skipped.
    #[error("Row {row}: missing {field} cell (column {column})")]
    MissingCell {
        row: usize,
        column: usize,
        field: &'static str,
    },

    /// The date-time cell could not be parsed
    ///
    /// Recoverable - the row is skipped.
    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },

    /// The amount cell could not be parsed or is negative
    ///
    /// Recoverable - the row is skipped.
    #[error("Row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },

    /// No cell of the row looks like an amount
    ///
    /// Recoverable - the row is skipped.
    #[error("Row {row}: no amount cell found")]
    AmountNotFound { row: usize },

    /// Accumulating a record would overflow a counter
    ///
    /// Recoverable - the record is rejected and the aggregates stay unchanged.
    #[error("Arithmetic overflow while adding credit of employee '{employee}'")]
    ArithmeticOverflow { employee: String },
}

impl From<std::io::Error> for ReportError {
    fn from(error: std::io::Error) -> Self {
        ReportError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ReportError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ReportError::CsvError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(error: serde_json::Error) -> Self {
        ReportError::SerializationError {
            message: error.to_string(),
        }
    }
}

impl ReportError {
    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ReportError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(row: usize, value: &str) -> Self {
        ReportError::InvalidDate {
            row,
            value: value.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(row: usize, value: &str) -> Self {
        ReportError::InvalidAmount {
            row,
            value: value.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(employee: &str) -> Self {
        ReportError::ArithmeticOverflow {
            employee: employee.to_string(),
        }
    }

    /// Whether processing can continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReportError::MissingCell { .. }
                | ReportError::InvalidDate { .. }
                | ReportError::InvalidAmount { .. }
                | ReportError::AmountNotFound { .. }
                | ReportError::ArithmeticOverflow { .. }
        )
    }
}

/// Result alias used across the crate
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        ReportError::FileNotFound { path: "credits.html".to_string() },
        "File not found: credits.html"
    )]
    #[case::io_error(
        ReportError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::csv_error_with_line(
        ReportError::CsvError { line: Some(7), message: "bad quote".to_string() },
        "CSV error at line 7: bad quote"
    )]
    #[case::csv_error_without_line(
        ReportError::CsvError { line: None, message: "bad quote".to_string() },
        "CSV error: bad quote"
    )]
    #[case::missing_cell(
        ReportError::MissingCell { row: 4, column: 11, field: "status" },
        "Row 4: missing status cell (column 11)"
    )]
    #[case::invalid_date(
        ReportError::invalid_date(2, "31/02/2024"),
        "Row 2: invalid date '31/02/2024'"
    )]
    #[case::invalid_amount(
        ReportError::invalid_amount(3, "abc,00"),
        "Row 3: invalid amount 'abc,00'"
    )]
    #[case::amount_not_found(ReportError::AmountNotFound { row: 9 }, "Row 9: no amount cell found")]
    #[case::overflow(
        ReportError::arithmetic_overflow("E1"),
        "Arithmetic overflow while adding credit of employee 'E1'"
    )]
    fn test_error_display(#[case] error: ReportError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::missing_cell(ReportError::MissingCell { row: 1, column: 3, field: "date" }, true)]
    #[case::amount_not_found(ReportError::AmountNotFound { row: 1 }, true)]
    #[case::overflow(ReportError::arithmetic_overflow("E1"), true)]
    #[case::file_not_found(ReportError::FileNotFound { path: "x".to_string() }, false)]
    #[case::config(ReportError::invalid_config("column 0"), false)]
    fn test_is_recoverable(#[case] error: ReportError, #[case] expected: bool) {
        assert_eq!(error.is_recoverable(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ReportError = io_error.into();
        assert!(matches!(error, ReportError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
