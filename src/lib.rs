//! Credit Report Library
//! # Overview
//!
//! This library turns an exported table of credit transactions (HTML or CSV)
//! into per-employee, per-product and per-status statistics, the period the
//! records cover, and a formatted report.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (CreditRecord, CreditSummary, ReportError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Column layout, locales and status aliases
//! - [`io`] - Table sources (HTML, CSV, in-memory) and amount formats
//! - [`core`] - Business logic components:
//!   - [`core::extractor`] - Row to record extraction
//!   - [`core::status`] - Localized status label translation
//!   - [`core::aggregator`] - Employee, product and status totals
//!   - [`core::date_range`] - Period covered by the records
//!   - [`core::engine`] - Report orchestration
//! - [`render`] - Text and JSON report output
//! - [`report`] - End-to-end report generation
//!
//! # Credit Statuses
//!
//! - **Issued** and **Closed**: counted everywhere
//! - **Cancelled**: counted in the status breakdown only
//! - **Unknown**: dropped, or counted in the status breakdown when configured
//!
//! # Invariants
//!
//! Over the counted records, the sum of employee totals, the sum of product
//! totals, and the issued plus closed status totals are all equal.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod render;
pub mod report;
pub mod types;

pub use config::{ColumnLayout, ReportConfig};
pub use core::{CreditAggregator, DateRangeFinder, ReportEngine, RowExtractor};
pub use io::{load_table, TableSource};
pub use report::generate_report;
pub use types::{
    CreditRecord, CreditStatus, CreditSummary, DateRange, EmployeeStat, ReportError, Tally,
};
