//! Ledger errors

use crate::bill::BillId;
use thiserror::Error;

/// A bill submission that breaks one of the creation invariants.
///
/// Raised before anything is mutated; the first violated check wins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid title or amount: {0}")]
    InvalidTitleOrAmount(String),

    #[error("Bill must have at least one participant")]
    EmptyParticipants,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),

    #[error("Invalid share for {address}: {reason}")]
    InvalidShare { address: String, reason: String },

    #[error("Custom amounts must add up to the total amount: expected {expected}, got {actual}")]
    AmountMismatch { expected: f64, actual: f64 },
}

/// Errors raised by a `LedgerStore` implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    #[error("Participant {address} not found in bill {bill_id}")]
    ParticipantNotFound { bill_id: BillId, address: String },

    #[error("Only the bill creator can delete bill {bill_id} (requested by {requester})")]
    Forbidden { bill_id: BillId, requester: String },

    #[error("Ledger store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl LedgerError {
    /// True for `BillNotFound` and `ParticipantNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BillNotFound(_) | Self::ParticipantNotFound { .. }
        )
    }
}
