use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use stockledger_core::ProductId;
use stockledger_inventory::Balances;

use crate::ledger_store::LedgerStoreError;

/// Destination for the per-product balance projection.
///
/// Written wholesale after every recomputation; never read back as truth.
pub trait BalanceSheetWriter: Send + Sync {
    fn write_balances(&self, balances: &Balances) -> Result<(), LedgerStoreError>;
}

impl<S> BalanceSheetWriter for Arc<S>
where
    S: BalanceSheetWriter + ?Sized,
{
    fn write_balances(&self, balances: &Balances) -> Result<(), LedgerStoreError> {
        (**self).write_balances(balances)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BalanceRow {
    #[serde(rename = "PRODUCT")]
    product: String,
    #[serde(rename = "BALANCE")]
    balance: i64,
}

/// CSV file holding `PRODUCT,BALANCE` rows in product order.
#[derive(Debug)]
pub struct CsvBalanceSheet {
    path: PathBuf,
}

impl CsvBalanceSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last written snapshot (display only; may be stale).
    pub fn read_snapshot(&self) -> Result<BTreeMap<String, i64>, LedgerStoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut out = BTreeMap::new();
        for row in reader.deserialize::<BalanceRow>() {
            let row = row?;
            out.insert(row.product, row.balance);
        }
        Ok(out)
    }
}

impl BalanceSheetWriter for CsvBalanceSheet {
    fn write_balances(&self, balances: &Balances) -> Result<(), LedgerStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling file, then rename over the old sheet.
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            if balances.is_empty() {
                writer.write_record(["PRODUCT", "BALANCE"])?;
            }
            for (product, balance) in balances.iter() {
                writer.serialize(BalanceRow {
                    product: product.to_string(),
                    balance,
                })?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), products = balances.len(), "balance sheet written");
        Ok(())
    }
}

/// In-memory balance sheet for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBalanceSheet {
    inner: RwLock<BTreeMap<ProductId, i64>>,
    writes: RwLock<usize>,
}

impl InMemoryBalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product: &ProductId) -> Option<i64> {
        self.inner.read().ok()?.get(product).copied()
    }

    pub fn snapshot(&self) -> Balances {
        match self.inner.read() {
            Ok(map) => map.iter().map(|(p, b)| (p.clone(), *b)).collect(),
            Err(_) => Balances::new(),
        }
    }

    /// Number of times the sheet has been rewritten.
    pub fn writes(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }
}

impl BalanceSheetWriter for InMemoryBalanceSheet {
    fn write_balances(&self, balances: &Balances) -> Result<(), LedgerStoreError> {
        let mut map = self.inner.write().map_err(|_| LedgerStoreError::LockPoisoned)?;
        map.clear();
        map.extend(balances.iter().map(|(p, b)| (p.clone(), b)));
        let mut writes = self.writes.write().map_err(|_| LedgerStoreError::LockPoisoned)?;
        *writes += 1;
        Ok(())
    }
}
