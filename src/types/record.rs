//! Credit record types for the credit report
//!
//! This module defines the canonical credit status and the typed record
//! extracted from a single table row.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a credit
///
/// Source documents carry localized labels; the status translator maps
/// them onto these canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    /// The credit was issued to the customer
    Issued,

    /// The credit was repaid and closed
    Closed,

    /// The credit was cancelled before issue
    ///
    /// Cancelled credits only count towards the status breakdown.
    Cancelled,

    /// The status label was not recognized
    Unknown,
}

impl CreditStatus {
    /// Whether this status contributes to employee and product rollups
    pub fn is_counted_for_staff(self) -> bool {
        matches!(self, CreditStatus::Issued | CreditStatus::Closed)
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CreditStatus::Issued => "Issued",
            CreditStatus::Closed => "Closed",
            CreditStatus::Cancelled => "Cancelled",
            CreditStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A single credit transaction extracted from one table row
///
/// Records are immutable once extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditRecord {
    /// When the credit was registered
    pub timestamp: NaiveDateTime,

    /// Credit product label
    pub credit_type: String,

    /// Staff member who issued or closed the credit
    pub employee: String,

    /// Credit amount
    pub amount: Decimal,

    /// Canonical status
    pub status: CreditStatus,

    /// Status text exactly as found in the source (trimmed)
    pub status_label: String,
}
