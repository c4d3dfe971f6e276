//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Credit records and statuses
//! - `stats`: Aggregated statistics and the finished summary
//! - `error`: Error types for the credit report

pub mod error;
pub mod record;
pub mod stats;

pub use error::{ReportError, ReportResult};
pub use record::{CreditRecord, CreditStatus};
pub use stats::{
    percentage, CreditSummary, DateRange, EmployeeStat, ProductStat, StatusBreakdown, StatusStat,
    Tally,
};
