//! Aggregations behind the analytics view (movement totals, monthly activity).

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, ProductId};

use crate::record::{TransactionRecord, TransactionType};

/// Summed quantities per movement type for one product.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTotals {
    pub inbound: i64,
    pub outbound: i64,
    pub adjustment: i64,
}

impl MovementTotals {
    fn add(&mut self, kind: TransactionType, quantity: i64) -> Option<()> {
        let slot = match kind {
            TransactionType::In => &mut self.inbound,
            TransactionType::Out => &mut self.outbound,
            TransactionType::Adjustment => &mut self.adjustment,
        };
        *slot = slot.checked_add(quantity)?;
        Some(())
    }
}

/// Calendar month bucket.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl core::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => write!(f, "{}", first.format("%B %Y")),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

/// Per-product quantity sums by movement type. Overflow is an invariant violation.
pub fn movement_totals<'a, I>(records: I) -> DomainResult<BTreeMap<ProductId, MovementTotals>>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut totals: BTreeMap<ProductId, MovementTotals> = BTreeMap::new();
    for r in records {
        totals
            .entry(r.product().clone())
            .or_default()
            .add(r.kind(), r.quantity())
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "{} total overflow for product '{}'",
                    r.kind(),
                    r.product()
                ))
            })?;
    }
    Ok(totals)
}

/// Number of records per product per calendar month.
pub fn monthly_activity<'a, I>(records: I) -> BTreeMap<(ProductId, YearMonth), usize>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut counts = BTreeMap::new();
    for r in records {
        *counts
            .entry((r.product().clone(), YearMonth::of(r.date())))
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(y: i32, m: u32, name: &str, kind: TransactionType, q: i64) -> TransactionRecord {
        TransactionRecord::new(
            NaiveDate::from_ymd_opt(y, m, 3).unwrap(),
            ProductId::new(name).unwrap(),
            kind,
            q,
            None,
        )
    }

    #[test]
    fn totals_split_by_type() {
        let records = vec![
            rec(2024, 11, "Fairy", TransactionType::In, 6),
            rec(2024, 11, "Fairy", TransactionType::In, 4),
            rec(2024, 11, "Fairy", TransactionType::Out, 3),
            rec(2024, 11, "Fairy", TransactionType::Adjustment, -1),
            rec(2024, 11, "Duster", TransactionType::Out, 2),
        ];
        let totals = movement_totals(&records).unwrap();
        let fairy = totals[&ProductId::new("Fairy").unwrap()];
        assert_eq!(fairy, MovementTotals { inbound: 10, outbound: 3, adjustment: -1 });
        let duster = totals[&ProductId::new("Duster").unwrap()];
        assert_eq!(duster, MovementTotals { inbound: 0, outbound: 2, adjustment: 0 });
    }

    #[test]
    fn total_overflow_is_an_invariant_violation() {
        let records = vec![
            rec(2024, 11, "Fairy", TransactionType::In, i64::MAX),
            rec(2024, 11, "Fairy", TransactionType::In, 1),
        ];
        assert!(matches!(
            movement_totals(&records),
            Err(DomainError::InvariantViolation(m)) if m.contains("Fairy")
        ));
    }

    #[test]
    fn activity_counts_records_per_month() {
        let records = vec![
            rec(2024, 11, "Fairy", TransactionType::In, 6),
            rec(2024, 11, "Fairy", TransactionType::Out, 1),
            rec(2024, 12, "Fairy", TransactionType::Out, 1),
        ];
        let activity = monthly_activity(&records);
        let fairy = ProductId::new("Fairy").unwrap();
        assert_eq!(activity[&(fairy.clone(), YearMonth { year: 2024, month: 11 })], 2);
        assert_eq!(activity[&(fairy, YearMonth { year: 2024, month: 12 })], 1);
        assert_eq!(activity.len(), 2);
    }

    #[test]
    fn year_month_displays_month_name() {
        assert_eq!(YearMonth { year: 2024, month: 11 }.to_string(), "November 2024");
    }
}
