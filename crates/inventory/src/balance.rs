//! Balance engine: folds ledger records into per-product balances.
//!
//! Balances are a disposable projection of the ledger. They are rebuilt from
//! scratch on every read and never treated as a source of truth.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, ProductId};

use crate::record::{LedgerRow, TransactionRecord};

/// Current balance per product, ordered by product name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(BTreeMap<ProductId, i64>);

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product: &ProductId) -> Option<i64> {
        self.0.get(product).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, i64)> {
        self.0.iter().map(|(p, b)| (p, *b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn apply(&mut self, record: &TransactionRecord) -> DomainResult<()> {
        let overflow =
            || DomainError::invariant(format!("balance overflow for product '{}'", record.product()));
        let delta = record.contribution().ok_or_else(overflow)?;
        let entry = self.0.entry(record.product().clone()).or_insert(0);
        *entry = entry.checked_add(delta).ok_or_else(overflow)?;
        Ok(())
    }
}

impl FromIterator<(ProductId, i64)> for Balances {
    fn from_iter<T: IntoIterator<Item = (ProductId, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a ProductId, &'a i64);
    type IntoIter = std::collections::btree_map::Iter<'a, ProductId, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Fold typed records into balances.
///
/// Single pass, order independent. Products without records are absent and
/// negative balances are kept as-is.
pub fn compute_balances<'a, I>(records: I) -> DomainResult<Balances>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut balances = Balances::new();
    for record in records {
        balances.apply(record)?;
    }
    Ok(balances)
}

/// Parse raw ledger rows and fold them into balances.
///
/// The first malformed row aborts the computation; rows are never skipped.
pub fn compute_balances_from_rows(rows: &[LedgerRow]) -> DomainResult<Balances> {
    let records = parse_rows(rows)?;
    compute_balances(&records)
}

/// Parse every raw row, tagging errors with the zero-based row index.
pub fn parse_rows(rows: &[LedgerRow]) -> DomainResult<Vec<TransactionRecord>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| row.parse().map_err(|e| e.at_row(idx)))
        .collect()
}
