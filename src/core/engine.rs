//! Report engine
//!
//! This module provides the `ReportEngine` that orchestrates one report run
//! by coordinating the row extractor, the aggregator and the date range
//! finder.

use crate::config::ReportConfig;
use crate::core::aggregator::{CreditAggregator, Ingested};
use crate::core::date_range::DateRangeFinder;
use crate::core::extractor::RowExtractor;
use crate::core::status::UnknownStatusPolicy;
use crate::io::TableSource;
use crate::types::CreditSummary;
use std::collections::BTreeSet;

/// Turns a table into a credit summary
#[derive(Debug, Clone)]
pub struct ReportEngine {
    extractor: RowExtractor,
    unknown_status: UnknownStatusPolicy,
}

impl ReportEngine {
    /// Create an engine from explicit parts
    pub fn new(extractor: RowExtractor, unknown_status: UnknownStatusPolicy) -> Self {
        ReportEngine {
            extractor,
            unknown_status,
        }
    }

    /// Create an engine from a report configuration
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(RowExtractor::from_config(config), config.unknown_status)
    }

    /// Summarize every record of the table
    ///
    /// This method:
    /// 1. Extracts records, skipping malformed rows
    /// 2. Collects the credit types of all extracted records
    /// 3. Folds the records through the aggregator
    /// 4. Takes the period from every row with a parseable date, whether or
    ///    not the row yielded a record
    /// 5. Finalizes the summary
    ///
    /// Never fails: rows and records that cannot be used are logged and
    /// contribute nothing. An empty table yields an empty summary.
    pub fn summarize(&self, table: &dyn TableSource) -> CreditSummary {
        let extraction = self.extractor.extract(table);

        let credit_types: BTreeSet<String> = extraction
            .records
            .iter()
            .map(|record| record.credit_type.clone())
            .collect();

        let mut aggregator = CreditAggregator::new(credit_types, self.unknown_status);
        let period: DateRangeFinder = extraction.timestamps.iter().copied().collect();
        let mut ignored = 0usize;
        let mut rejected = 0usize;

        for record in &extraction.records {
            match aggregator.ingest(record) {
                Ok(Ingested::Ignored) => {
                    ignored += 1;
                    log::debug!(
                        "Ignoring credit with unrecognized status '{}'",
                        record.status_label
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    rejected += 1;
                    log::warn!("Credit rejected: {}", e);
                }
            }
        }

        log::info!(
            "Read {} rows: {} records extracted, {} rows skipped, {} ignored, {} rejected",
            extraction.rows_read,
            extraction.records.len(),
            extraction.skipped,
            ignored,
            rejected
        );

        aggregator.finish(period.finish())
    }
}
