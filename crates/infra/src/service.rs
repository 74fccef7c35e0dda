//! Read → compute → write orchestration over injected store/notifier handles.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use stockledger_core::{DomainError, NotificationId, ProductId};
use stockledger_inventory::{
    compute_balances, filter_by_date, monthly_activity, movement_totals, parse_rows, AlertEvent,
    Balances, DateRange, LowStockPolicy, MovementTotals, NewRecord, TransactionRecord, YearMonth,
};

use crate::ledger_store::{LedgerReader, LedgerStoreError, LedgerWriter};
use crate::notifier::Notifier;
use crate::read_model::BalanceSheetWriter;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] LedgerStoreError),
}

/// Outcome of handing an alert to the notifier.
///
/// Dispatch failures are reported, never raised: balances computed before the
/// dispatch stay valid either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertDispatch {
    Sent(NotificationId),
    Failed(String),
}

impl AlertDispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, AlertDispatch::Sent(_))
    }
}

/// Result of a submission that reached the ledger.
///
/// The record is saved once this exists. A failed balance refresh afterwards
/// is carried alongside so callers do not mistake it for a failed save.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub record: TransactionRecord,
    pub refresh_error: Option<ServiceError>,
}

/// Stock service: ledger store + balance sheet + notifier, passed in explicitly.
#[derive(Debug)]
pub struct StockService<L, B, N> {
    ledger: L,
    sheet: B,
    notifier: N,
    policy: LowStockPolicy,
}

impl<L, B, N> StockService<L, B, N>
where
    L: LedgerReader + LedgerWriter,
    B: BalanceSheetWriter,
    N: Notifier,
{
    pub fn new(ledger: L, sheet: B, notifier: N, policy: LowStockPolicy) -> Self {
        Self {
            ledger,
            sheet,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> LowStockPolicy {
        self.policy
    }

    /// All ledger records, typed. Fails on the first malformed row.
    pub fn records(&self) -> Result<Vec<TransactionRecord>, ServiceError> {
        let rows = self.ledger.fetch_all_records()?;
        Ok(parse_rows(&rows)?)
    }

    /// Validate and append a new movement, then rebuild the balance sheet.
    ///
    /// `Err` means nothing was written. Refresh failures after the append are
    /// reported in [`SubmitOutcome::refresh_error`].
    pub fn submit(&self, form: NewRecord, date: NaiveDate) -> Result<SubmitOutcome, ServiceError> {
        let record = form.into_record(date)?;
        self.ledger.append(record.to_row())?;
        info!(
            product = %record.product(),
            kind = %record.kind(),
            quantity = record.quantity(),
            "ledger record saved"
        );
        let refresh_error = self.refresh_balances().err();
        if let Some(e) = &refresh_error {
            warn!(error = %e, "record saved but balance refresh failed");
        }
        Ok(SubmitOutcome {
            record,
            refresh_error,
        })
    }

    /// Current balances, recomputed from the full ledger.
    pub fn balances(&self) -> Result<Balances, ServiceError> {
        let records = self.records()?;
        Ok(compute_balances(&records)?)
    }

    /// Recompute balances and rewrite the balance sheet.
    pub fn refresh_balances(&self) -> Result<Balances, ServiceError> {
        let balances = self.balances()?;
        self.sheet.write_balances(&balances)?;
        info!(products = balances.len(), "balance sheet refreshed");
        Ok(balances)
    }

    /// Evaluate the low-stock policy against freshly computed balances.
    pub fn low_stock(&self) -> Result<Option<AlertEvent>, ServiceError> {
        let balances = self.balances()?;
        Ok(self.policy.evaluate(&balances))
    }

    pub fn dispatch_alert(&self, alert: &AlertEvent) -> AlertDispatch {
        match self.notifier.notify(&alert.subject, &alert.body) {
            Ok(id) => {
                info!(
                    notification_id = %id,
                    recipient = %self.notifier.recipient(),
                    products = alert.low_stock.len(),
                    "low stock alert sent"
                );
                AlertDispatch::Sent(id)
            }
            Err(e) => {
                warn!(error = %e, "failed to send low stock alert");
                AlertDispatch::Failed(e.to_string())
            }
        }
    }

    pub fn history(&self, range: DateRange) -> Result<Vec<TransactionRecord>, ServiceError> {
        let records = self.records()?;
        Ok(filter_by_date(&records, range).into_iter().cloned().collect())
    }

    pub fn movement_totals(&self) -> Result<BTreeMap<ProductId, MovementTotals>, ServiceError> {
        Ok(movement_totals(&self.records()?)?)
    }

    pub fn monthly_activity(&self) -> Result<BTreeMap<(ProductId, YearMonth), usize>, ServiceError> {
        Ok(monthly_activity(&self.records()?))
    }
}
