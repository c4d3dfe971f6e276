//! Aggregate statistics types
//!
//! This module defines the counters accumulated by the aggregator and the
//! finished summary handed to the report renderers.

use super::record::CreditStatus;
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count and amount accumulated for one group of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Number of records in the group
    pub count: u64,

    /// Sum of the record amounts
    pub amount: Decimal,
}

/// Per-product totals (one per credit type)
pub type ProductStat = Tally;

/// Per-status totals (one per status value)
pub type StatusStat = Tally;

impl Tally {
    /// Create a tally from explicit values
    pub fn new(count: u64, amount: Decimal) -> Self {
        Tally { count, amount }
    }

    /// Return this tally with one more record of `amount`
    ///
    /// Returns `None` if the count or the amount would overflow.
    pub fn checked_add(&self, amount: Decimal) -> Option<Tally> {
        Some(Tally {
            count: self.count.checked_add(1)?,
            amount: self.amount.checked_add(amount)?,
        })
    }
}

/// Per-employee statistics
///
/// Only issued and closed credits are counted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeStat {
    /// Sum of all counted credit amounts
    pub total_amount: Decimal,

    /// Number of counted credits
    pub total_count: u64,

    /// Breakdown by credit type
    ///
    /// Pre-seeded with a zero tally for every credit type known when the
    /// employee was first seen.
    pub by_type: BTreeMap<String, Tally>,
}

impl EmployeeStat {
    /// Create an employee entry with a zero tally for each known credit type
    pub fn seeded<'a, I>(credit_types: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        EmployeeStat {
            total_amount: Decimal::ZERO,
            total_count: 0,
            by_type: credit_types
                .into_iter()
                .map(|credit_type| (credit_type.clone(), Tally::default()))
                .collect(),
        }
    }

    /// The employee totals as a tally
    pub fn totals(&self) -> Tally {
        Tally::new(self.total_count, self.total_amount)
    }

    /// Credit types this employee actually handled, in key order
    pub fn active_types(&self) -> impl Iterator<Item = (&String, &Tally)> {
        self.by_type.iter().filter(|(_, tally)| tally.count > 0)
    }
}

/// One tally per credit status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub issued: StatusStat,
    pub closed: StatusStat,
    pub cancelled: StatusStat,
    pub unknown: StatusStat,
}

impl StatusBreakdown {
    /// Tally for a given status
    pub fn get(&self, status: CreditStatus) -> &StatusStat {
        match status {
            CreditStatus::Issued => &self.issued,
            CreditStatus::Closed => &self.closed,
            CreditStatus::Cancelled => &self.cancelled,
            CreditStatus::Unknown => &self.unknown,
        }
    }

    /// Mutable tally for a given status
    pub fn get_mut(&mut self, status: CreditStatus) -> &mut StatusStat {
        match status {
            CreditStatus::Issued => &mut self.issued,
            CreditStatus::Closed => &mut self.closed,
            CreditStatus::Cancelled => &mut self.cancelled,
            CreditStatus::Unknown => &mut self.unknown,
        }
    }
}

/// Inclusive range of record timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// A range covering a single instant
    pub fn single(at: NaiveDateTime) -> Self {
        DateRange { start: at, end: at }
    }

    /// Widen the range so that it covers `at`
    pub fn extend(&mut self, at: NaiveDateTime) {
        if at < self.start {
            self.start = at;
        }
        if at > self.end {
            self.end = at;
        }
    }
}

/// Finished statistics for one report
///
/// Produced by the aggregator once every record has been fed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreditSummary {
    /// Period covered by the extracted records, `None` when there were none
    pub period: Option<DateRange>,

    /// Statistics per employee, ordered by employee id
    pub employees: BTreeMap<String, EmployeeStat>,

    /// Statistics per credit type, ordered by type label
    pub products: BTreeMap<String, ProductStat>,

    /// Statistics per status
    pub statuses: StatusBreakdown,

    /// Grand total over issued and closed credits
    pub total: Tally,
}

impl CreditSummary {
    /// Share of `amount` in the grand total, as a percentage with 2 decimals
    ///
    /// A zero grand total yields 0.
    pub fn share_of_total(&self, amount: Decimal) -> Decimal {
        percentage(amount, self.total.amount)
    }
}

/// `part / whole * 100`, rounded half away from zero to 2 decimal places
///
/// Returns 0 when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }

    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}
