//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures of ledger data (unknown
/// movement kinds, malformed quantities or dates, invariants). Store and
/// transport failures belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A record's movement type is not one of `In`, `Out`, `Adjustment`.
    #[error("invalid transaction type: {0}")]
    InvalidTransactionType(String),

    /// A record's quantity is missing, non-numeric or out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A record's date could not be parsed into a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A value failed validation (e.g. empty product name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_type(msg: impl Into<String>) -> Self {
        Self::InvalidTransactionType(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Prefix the message with the ledger row it came from, keeping the variant.
    pub fn at_row(self, index: usize) -> Self {
        let tag = |m: String| format!("row {index}: {m}");
        match self {
            Self::InvalidTransactionType(m) => Self::InvalidTransactionType(tag(m)),
            Self::InvalidQuantity(m) => Self::InvalidQuantity(tag(m)),
            Self::InvalidDate(m) => Self::InvalidDate(tag(m)),
            Self::Validation(m) => Self::Validation(tag(m)),
            Self::InvariantViolation(m) => Self::InvariantViolation(tag(m)),
            Self::InvalidId(m) => Self::InvalidId(tag(m)),
        }
    }
}
