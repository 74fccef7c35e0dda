//! Disposable read models derived from the ledger.

pub mod balance_sheet;

pub use balance_sheet::{BalanceSheetWriter, CsvBalanceSheet, InMemoryBalanceSheet};
