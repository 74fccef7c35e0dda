use std::sync::Arc;

use thiserror::Error;

use stockledger_inventory::LedgerRow;

/// Ledger store operation error.
///
/// These are **infrastructure errors** (file access, encoding) as opposed to
/// domain errors (unknown movement types, malformed quantities).
#[derive(Debug, Error)]
pub enum LedgerStoreError {
    #[error("ledger io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed ledger row at line {line}: {found} fields, header has {expected}")]
    MalformedRow {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Source of the full, ordered set of ledger rows.
pub trait LedgerReader: Send + Sync {
    /// Return every recorded row in ledger order. An empty ledger is not an error.
    fn fetch_all_records(&self) -> Result<Vec<LedgerRow>, LedgerStoreError>;
}

/// Append-only sink for new ledger rows.
pub trait LedgerWriter: Send + Sync {
    fn append(&self, row: LedgerRow) -> Result<(), LedgerStoreError>;
}

impl<S> LedgerReader for Arc<S>
where
    S: LedgerReader + ?Sized,
{
    fn fetch_all_records(&self) -> Result<Vec<LedgerRow>, LedgerStoreError> {
        (**self).fetch_all_records()
    }
}

impl<S> LedgerWriter for Arc<S>
where
    S: LedgerWriter + ?Sized,
{
    fn append(&self, row: LedgerRow) -> Result<(), LedgerStoreError> {
        (**self).append(row)
    }
}
