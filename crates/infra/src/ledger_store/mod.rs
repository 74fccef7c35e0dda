//! Append-only ledger store boundary.
//!
//! The store hands out raw [`LedgerRow`](stockledger_inventory::LedgerRow)s
//! and accepts new ones; it never updates or deletes recorded rows and knows
//! nothing about balances.

pub mod csv_file;
pub mod in_memory;
pub mod r#trait;

pub use csv_file::CsvLedgerStore;
pub use in_memory::InMemoryLedgerStore;
pub use r#trait::{LedgerReader, LedgerStoreError, LedgerWriter};
