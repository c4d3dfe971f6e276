//! Credit aggregation
//!
//! This module provides the `CreditAggregator`, which folds credit records
//! into per-employee, per-product and per-status totals.
//!
//! The aggregator has a scoped lifetime: it is constructed with the credit
//! types known up front, fed records one at a time, and consumed by
//! [`CreditAggregator::finish`] into a [`CreditSummary`].
//!
//! # Counting rules
//!
//! - Every recognized record updates its status tally.
//! - Cancelled records stop there.
//! - Issued and closed records also update the employee and product tallies.
//! - Unknown records are dropped, or counted in the `unknown` status tally
//!   only, depending on [`UnknownStatusPolicy`].

use crate::core::status::UnknownStatusPolicy;
use crate::types::{
    CreditRecord, CreditStatus, CreditSummary, DateRange, EmployeeStat, ProductStat, ReportError,
    ReportResult, StatusBreakdown, Tally,
};
use std::collections::{BTreeMap, BTreeSet};

/// How a record was accounted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    /// Counted in status, employee and product tallies
    Counted,

    /// Counted in the status tally only
    StatusOnly,

    /// Not counted anywhere
    Ignored,
}

/// Accumulates credit statistics
#[derive(Debug, Clone, Default)]
pub struct CreditAggregator {
    credit_types: BTreeSet<String>,
    unknown_status: UnknownStatusPolicy,
    employees: BTreeMap<String, EmployeeStat>,
    products: BTreeMap<String, ProductStat>,
    statuses: StatusBreakdown,

    /// Issued plus closed
    total: Tally,
}

impl CreditAggregator {
    /// Create an aggregator
    ///
    /// New employees are seeded with a zero tally for each of
    /// `credit_types`; types first seen in a record are added as they come.
    pub fn new<I>(credit_types: I, unknown_status: UnknownStatusPolicy) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        CreditAggregator {
            credit_types: credit_types.into_iter().collect(),
            unknown_status,
            ..Self::default()
        }
    }

    /// Account for one record
    ///
    /// The record's updates are applied all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if any affected tally would overflow;
    /// the aggregates are left unchanged in that case.
    pub fn ingest(&mut self, record: &CreditRecord) -> ReportResult<Ingested> {
        let status = record.status;
        if status == CreditStatus::Unknown && self.unknown_status == UnknownStatusPolicy::Drop {
            return Ok(Ingested::Ignored);
        }

        let overflow = || ReportError::arithmetic_overflow(&record.employee);
        let status_tally = self
            .statuses
            .get(status)
            .checked_add(record.amount)
            .ok_or_else(overflow)?;

        if !status.is_counted_for_staff() {
            *self.statuses.get_mut(status) = status_tally;
            return Ok(Ingested::StatusOnly);
        }

        let employee = self.employees.get(&record.employee);
        let employee_tally = employee
            .map(EmployeeStat::totals)
            .unwrap_or_default()
            .checked_add(record.amount)
            .ok_or_else(overflow)?;
        let type_tally = employee
            .and_then(|stat| stat.by_type.get(&record.credit_type))
            .copied()
            .unwrap_or_default()
            .checked_add(record.amount)
            .ok_or_else(overflow)?;
        let product_tally = self
            .products
            .get(&record.credit_type)
            .copied()
            .unwrap_or_default()
            .checked_add(record.amount)
            .ok_or_else(overflow)?;
        let total = self
            .total
            .checked_add(record.amount)
            .ok_or_else(overflow)?;

        // Every sum is known to fit; commit.
        *self.statuses.get_mut(status) = status_tally;
        self.total = total;

        if !self.credit_types.contains(&record.credit_type) {
            self.credit_types.insert(record.credit_type.clone());
        }

        let stat = self
            .employees
            .entry(record.employee.clone())
            .or_insert_with(|| EmployeeStat::seeded(&self.credit_types));
        stat.total_count = employee_tally.count;
        stat.total_amount = employee_tally.amount;
        stat.by_type.insert(record.credit_type.clone(), type_tally);

        self.products
            .insert(record.credit_type.clone(), product_tally);

        Ok(Ingested::Counted)
    }

    /// Finalize into a summary covering `period`
    pub fn finish(self, period: Option<DateRange>) -> CreditSummary {
        CreditSummary {
            period,
            employees: self.employees,
            products: self.products,
            statuses: self.statuses,
            total: self.total,
        }
    }
}

#[cfg(test)]
impl CreditAggregator {
    fn statuses(&self) -> &StatusBreakdown {
        &self.statuses
    }

    fn employee_totals(&self, employee: &str) -> Option<Tally> {
        self.employees.get(employee).map(EmployeeStat::totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn record(employee: &str, credit_type: &str, amount: i64, status: CreditStatus) -> CreditRecord {
        CreditRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            credit_type: credit_type.to_string(),
            employee: employee.to_string(),
            amount: Decimal::new(amount, 0),
            status,
            status_label: status.to_string().to_lowercase(),
        }
    }

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn sample_records() -> Vec<CreditRecord> {
        vec![
            record("E1", "Consumer", 1500, CreditStatus::Issued),
            record("E2", "Auto", 4000, CreditStatus::Closed),
            record("E1", "Auto", 2500, CreditStatus::Closed),
            record("E2", "Consumer", 2000, CreditStatus::Cancelled),
            record("E3", "Mortgage", 900, CreditStatus::Unknown),
            record("E2", "Consumer", 1000, CreditStatus::Issued),
        ]
    }

    fn aggregate(records: &[CreditRecord], policy: UnknownStatusPolicy) -> CreditSummary {
        let mut aggregator =
            CreditAggregator::new(records.iter().map(|r| r.credit_type.clone()), policy);
        for record in records {
            aggregator.ingest(record).unwrap();
        }
        aggregator.finish(None)
    }

    #[test]
    fn test_single_issued_record() {
        let summary = aggregate(
            &[record("E1", "Consumer", 1500, CreditStatus::Issued)],
            UnknownStatusPolicy::Drop,
        );

        let e1 = &summary.employees["E1"];
        assert_eq!(e1.total_amount, Decimal::new(1500, 0));
        assert_eq!(e1.total_count, 1);
        assert_eq!(summary.statuses.issued, Tally::new(1, Decimal::new(1500, 0)));
        assert_eq!(summary.share_of_total(e1.total_amount), Decimal::new(100, 0));
    }

    #[test]
    fn test_cancelled_only_in_status_breakdown() {
        let mut aggregator = CreditAggregator::new(types(&["Consumer"]), UnknownStatusPolicy::Drop);

        let outcome = aggregator
            .ingest(&record("E1", "Consumer", 2000, CreditStatus::Cancelled))
            .unwrap();
        let summary = aggregator.finish(None);

        assert_eq!(outcome, Ingested::StatusOnly);
        assert_eq!(summary.statuses.cancelled, Tally::new(1, Decimal::new(2000, 0)));
        assert!(summary.employees.is_empty());
        assert!(summary.products.is_empty());
        assert_eq!(summary.total, Tally::default());
    }

    #[rstest]
    #[case::drop(UnknownStatusPolicy::Drop, Ingested::Ignored, Tally::default())]
    #[case::count(UnknownStatusPolicy::Count, Ingested::StatusOnly, Tally::new(1, Decimal::new(900, 0)))]
    fn test_unknown_status_policy(
        #[case] policy: UnknownStatusPolicy,
        #[case] expected_outcome: Ingested,
        #[case] expected_tally: Tally,
    ) {
        let mut aggregator = CreditAggregator::new(types(&["Mortgage"]), policy);

        let outcome = aggregator
            .ingest(&record("E3", "Mortgage", 900, CreditStatus::Unknown))
            .unwrap();

        assert_eq!(outcome, expected_outcome);
        assert_eq!(aggregator.statuses().unknown, expected_tally);
        assert_eq!(aggregator.employee_totals("E3"), None);
    }

    #[test]
    fn test_employee_seeded_with_all_known_types() {
        let summary = aggregate(&sample_records(), UnknownStatusPolicy::Drop);

        let e1 = &summary.employees["E1"];
        assert_eq!(
            e1.by_type.keys().cloned().collect::<Vec<_>>(),
            types(&["Auto", "Consumer", "Mortgage"])
        );
        assert_eq!(e1.by_type["Mortgage"], Tally::default());
        assert_eq!(e1.by_type["Auto"], Tally::new(1, Decimal::new(2500, 0)));
        assert_eq!(e1.active_types().count(), 2);
    }

    #[test]
    fn test_type_first_seen_in_record_is_added() {
        let mut aggregator = CreditAggregator::new(Vec::new(), UnknownStatusPolicy::Drop);
        aggregator
            .ingest(&record("E1", "Auto", 100, CreditStatus::Issued))
            .unwrap();
        aggregator
            .ingest(&record("E2", "Consumer", 200, CreditStatus::Issued))
            .unwrap();
        let summary = aggregator.finish(None);

        assert_eq!(summary.employees["E1"].by_type.len(), 1);
        assert_eq!(summary.employees["E2"].by_type.len(), 2);
        assert_eq!(summary.employees["E2"].by_type["Auto"], Tally::default());
    }

    #[rstest]
    #[case::drop(UnknownStatusPolicy::Drop)]
    #[case::count(UnknownStatusPolicy::Count)]
    fn test_totals_reconcile(#[case] policy: UnknownStatusPolicy) {
        let summary = aggregate(&sample_records(), policy);

        let staff_total: Decimal = summary.employees.values().map(|e| e.total_amount).sum();
        let staff_count: u64 = summary.employees.values().map(|e| e.total_count).sum();
        let product_total: Decimal = summary.products.values().map(|p| p.amount).sum();
        let issued_and_closed = summary.statuses.issued.amount + summary.statuses.closed.amount;

        assert_eq!(staff_total, issued_and_closed);
        assert_eq!(product_total, issued_and_closed);
        assert_eq!(summary.total.amount, issued_and_closed);
        assert_eq!(summary.total.count, staff_count);
        assert_eq!(staff_total, Decimal::new(9000, 0));
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let records = vec![
            record("E1", "Auto", 1, CreditStatus::Issued),
            record("E2", "Auto", 1, CreditStatus::Issued),
            record("E3", "Auto", 1, CreditStatus::Issued),
        ];
        let summary = aggregate(&records, UnknownStatusPolicy::Drop);

        let shares: Vec<Decimal> = summary
            .employees
            .values()
            .map(|e| summary.share_of_total(e.total_amount))
            .collect();

        assert!(shares
            .iter()
            .all(|s| *s >= Decimal::ZERO && *s <= Decimal::ONE_HUNDRED));
        let sum: Decimal = shares.iter().sum();
        assert!((sum - Decimal::ONE_HUNDRED).abs() <= Decimal::new(2, 2));
    }

    #[test]
    fn test_order_does_not_change_totals() {
        let forward = aggregate(&sample_records(), UnknownStatusPolicy::Count);
        let mut reversed_records = sample_records();
        reversed_records.reverse();
        let reversed = aggregate(&reversed_records, UnknownStatusPolicy::Count);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_empty_input() {
        let summary = CreditAggregator::new(Vec::new(), UnknownStatusPolicy::Drop).finish(None);

        assert_eq!(summary.total, Tally::default());
        assert_eq!(summary.statuses, StatusBreakdown::default());
        assert_eq!(summary.share_of_total(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(summary.period, None);
    }

    #[test]
    fn test_overflow_leaves_aggregates_unchanged() {
        let mut aggregator = CreditAggregator::new(types(&["Auto"]), UnknownStatusPolicy::Drop);
        let mut big = record("E1", "Auto", 0, CreditStatus::Issued);
        big.amount = Decimal::MAX;
        aggregator.ingest(&big).unwrap();

        // The issued tally is already at the maximum
        let result = aggregator.ingest(&record("E1", "Auto", 1, CreditStatus::Issued));

        assert!(matches!(result, Err(ReportError::ArithmeticOverflow { .. })));
        assert_eq!(aggregator.statuses().issued.count, 1);
        assert_eq!(
            aggregator.employee_totals("E1"),
            Some(Tally::new(1, Decimal::MAX))
        );
    }

    #[test]
    fn test_grand_total_overflow_rejects_record() {
        let mut aggregator =
            CreditAggregator::new(types(&["Auto", "Consumer"]), UnknownStatusPolicy::Drop);
        let mut big = record("E1", "Auto", 0, CreditStatus::Issued);
        big.amount = Decimal::MAX;
        aggregator.ingest(&big).unwrap();

        // Only issued plus closed would overflow; every other tally has room
        let result = aggregator.ingest(&record("E2", "Consumer", 1, CreditStatus::Closed));
        let summary = aggregator.finish(None);

        assert!(matches!(result, Err(ReportError::ArithmeticOverflow { .. })));
        assert_eq!(summary.statuses.closed, Tally::default());
        assert!(!summary.employees.contains_key("E2"));
        assert!(!summary.products.contains_key("Consumer"));
        assert_eq!(summary.total, Tally::new(1, Decimal::MAX));
        assert_eq!(
            summary.total.amount,
            summary.statuses.issued.amount + summary.statuses.closed.amount
        );
    }
}
