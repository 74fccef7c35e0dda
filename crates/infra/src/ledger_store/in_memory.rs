use std::sync::RwLock;

use stockledger_inventory::LedgerRow;

use super::r#trait::{LedgerReader, LedgerStoreError, LedgerWriter};

/// In-memory append-only ledger.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    rows: RwLock<Vec<LedgerRow>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = LedgerRow>) -> Self {
        Self {
            rows: RwLock::new(rows.into_iter().collect()),
        }
    }
}

impl LedgerReader for InMemoryLedgerStore {
    fn fetch_all_records(&self) -> Result<Vec<LedgerRow>, LedgerStoreError> {
        let rows = self.rows.read().map_err(|_| LedgerStoreError::LockPoisoned)?;
        Ok(rows.clone())
    }
}

impl LedgerWriter for InMemoryLedgerStore {
    fn append(&self, row: LedgerRow) -> Result<(), LedgerStoreError> {
        let mut rows = self.rows.write().map_err(|_| LedgerStoreError::LockPoisoned)?;
        rows.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product: &str) -> LedgerRow {
        LedgerRow {
            date: "01-11-2024".to_string(),
            product: product.to_string(),
            kind: "In".to_string(),
            quantity: "1".to_string(),
            comment: None,
        }
    }

    #[test]
    fn append_preserves_order() {
        let store = InMemoryLedgerStore::new();
        store.append(row("a")).unwrap();
        store.append(row("b")).unwrap();
        let products: Vec<_> = store
            .fetch_all_records()
            .unwrap()
            .into_iter()
            .map(|r| r.product)
            .collect();
        assert_eq!(products, vec!["a", "b"]);
    }

    #[test]
    fn empty_store_reads_empty() {
        assert!(InMemoryLedgerStore::new().fetch_all_records().unwrap().is_empty());
    }
}
