//! Row extraction
//!
//! Turns the rows of a [`TableSource`] into typed [`CreditRecord`]s.
//!
//! A row yields a record only if it has a parseable date, non-empty credit
//! type and employee cells, a status cell, and a non-negative amount. Any
//! other row is skipped; skipping is never fatal. The date of a skipped row
//! still counts towards the reporting period when it parses.

use crate::config::{ColumnLayout, ReportConfig};
use crate::core::status::StatusTranslator;
use crate::io::{NumberLocale, TableSource};
use crate::types::{CreditRecord, ReportError, ReportResult};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Records extracted from a table, with row accounting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<CreditRecord>,

    /// Timestamps of every row with a parseable date, skipped rows included
    pub timestamps: Vec<NaiveDateTime>,

    /// Rows looked at, including undecodable ones
    pub rows_read: usize,

    /// Rows that did not yield a record
    pub skipped: usize,
}

/// Reads credit records out of table rows
#[derive(Debug, Clone)]
pub struct RowExtractor {
    columns: ColumnLayout,
    date_format: String,
    amount_locale: NumberLocale,
    translator: StatusTranslator,
}

impl RowExtractor {
    /// Create an extractor from explicit parts
    pub fn new(
        columns: ColumnLayout,
        date_format: impl Into<String>,
        amount_locale: NumberLocale,
        translator: StatusTranslator,
    ) -> Self {
        RowExtractor {
            columns,
            date_format: date_format.into(),
            amount_locale,
            translator,
        }
    }

    /// Create an extractor from a report configuration
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.columns,
            config.date_format.clone(),
            config.amount_locale,
            StatusTranslator::with_aliases(&config.status_aliases),
        )
    }

    /// Extract every row of the table, skipping the ones that fail
    pub fn extract(&self, table: &dyn TableSource) -> Extraction {
        let unreadable = table.unreadable_rows();
        let mut extraction = Extraction {
            records: Vec::with_capacity(table.row_count()),
            timestamps: Vec::with_capacity(table.row_count()),
            rows_read: unreadable,
            skipped: unreadable,
        };

        for row in 0..table.row_count() {
            extraction.rows_read += 1;

            let result = self.row_timestamp(table, row).and_then(|timestamp| {
                extraction.timestamps.push(timestamp);
                self.extract_fields(table, row, timestamp)
            });

            match result {
                Ok(record) => extraction.records.push(record),
                Err(e) => {
                    extraction.skipped += 1;
                    log::debug!("Skipping row: {}", e);
                }
            }
        }

        extraction
    }

    /// Extract a single row (zero-based index)
    ///
    /// # Errors
    ///
    /// Returns a recoverable error describing why the row has no record:
    /// `MissingCell`, `InvalidDate`, `InvalidAmount` or `AmountNotFound`.
    /// Error messages number rows from 1.
    pub fn extract_row(&self, table: &dyn TableSource, row: usize) -> ReportResult<CreditRecord> {
        let timestamp = self.row_timestamp(table, row)?;
        self.extract_fields(table, row, timestamp)
    }

    /// Parsed date-time cell of a row
    fn row_timestamp(&self, table: &dyn TableSource, row: usize) -> ReportResult<NaiveDateTime> {
        let date_text = required_text(table, row, self.columns.date, "date")?;
        self.parse_timestamp(date_text)
            .ok_or_else(|| ReportError::invalid_date(row + 1, date_text))
    }

    /// Remaining fields of a row whose date is already parsed
    fn extract_fields(
        &self,
        table: &dyn TableSource,
        row: usize,
        timestamp: NaiveDateTime,
    ) -> ReportResult<CreditRecord> {
        let credit_type = required_text(table, row, self.columns.credit_type, "credit type")?;
        let employee = required_text(table, row, self.columns.employee, "employee")?;

        let status_label = cell(table, row, self.columns.status, "status")?;
        let status = self.translator.translate(status_label);

        let amount = self.locate_amount(table, row)?;

        Ok(CreditRecord {
            timestamp,
            credit_type: credit_type.to_string(),
            employee: employee.to_string(),
            amount,
            status,
            status_label: status_label.to_string(),
        })
    }

    /// Parse a date-time cell, accepting date-only formats as midnight
    fn parse_timestamp(&self, text: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, &self.date_format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text, &self.date_format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    fn locate_amount(&self, table: &dyn TableSource, row: usize) -> ReportResult<Decimal> {
        match self.columns.amount {
            Some(position) => {
                let text = cell(table, row, position, "amount")?;
                self.amount_locale
                    .parse_amount(text)
                    .filter(|amount| !amount.is_sign_negative())
                    .ok_or_else(|| ReportError::invalid_amount(row + 1, text))
            }
            None => {
                let text = (0..table.cell_count(row))
                    .filter_map(|col| table.cell_text(row, col))
                    .find(|text| {
                        self.amount_locale.looks_like_amount(text)
                            && self.amount_locale.parse_amount(text).is_some()
                    })
                    .ok_or(ReportError::AmountNotFound { row: row + 1 })?;

                self.amount_locale
                    .parse_amount(text)
                    .filter(|amount| !amount.is_sign_negative())
                    .ok_or_else(|| ReportError::invalid_amount(row + 1, text))
            }
        }
    }
}

/// Cell at a 1-based position
fn cell<'t>(
    table: &'t dyn TableSource,
    row: usize,
    position: usize,
    field: &'static str,
) -> ReportResult<&'t str> {
    position
        .checked_sub(1)
        .and_then(|col| table.cell_text(row, col))
        .ok_or(ReportError::MissingCell {
            row: row + 1,
            column: position,
            field,
        })
}

/// Cell at a 1-based position that must not be blank
fn required_text<'t>(
    table: &'t dyn TableSource,
    row: usize,
    position: usize,
    field: &'static str,
) -> ReportResult<&'t str> {
    let text = cell(table, row, position, field)?;
    if text.is_empty() {
        return Err(ReportError::MissingCell {
            row: row + 1,
            column: position,
            field,
        });
    }
    Ok(text)
}
