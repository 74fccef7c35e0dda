//! Infrastructure layer: ledger storage, balance sheet, notifiers, config,
//! and the service that wires them around the inventory domain.

pub mod config;
pub mod ledger_store;
pub mod notifier;
pub mod read_model;
pub mod service;

pub use service::{AlertDispatch, ServiceError, StockService, SubmitOutcome};
