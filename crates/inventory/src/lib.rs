//! Inventory ledger domain.
//!
//! Pure, deterministic logic over stock movement records (no IO, no storage,
//! no transport): record parsing, the balance fold, the low-stock policy and
//! the history/analytics views.

pub mod alert;
pub mod analytics;
pub mod balance;
pub mod history;
pub mod record;

pub use alert::{AlertEvent, LowStockPolicy, ALERT_SUBJECT, DEFAULT_LOW_STOCK_THRESHOLD};
pub use analytics::{monthly_activity, movement_totals, MovementTotals, YearMonth};
pub use balance::{compute_balances, compute_balances_from_rows, parse_rows, Balances};
pub use history::{filter_by_date, DateRange};
pub use record::{LedgerRow, NewRecord, TransactionRecord, TransactionType, LEDGER_DATE_FORMAT};
