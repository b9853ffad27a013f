//! Error types for ledger anchoring.

use std::time::Duration;

use thiserror::Error;

use crate::request::{IdempotencyKey, TxId};

/// Errors that can occur while anchoring a payload.
#[derive(Debug, Error)]
pub enum AnchorError {
    /// The ledger refused the submission.
    #[error("ledger rejected submission: {0}")]
    Rejected(String),

    /// An idempotency key was replayed with a different payload.
    #[error("idempotency key {0} already used for a different payload")]
    KeyReused(IdempotencyKey),

    /// A replayed transaction does not describe the resubmitted sections.
    #[error("anchored payload for {0} does not match the resubmitted sections")]
    Diverged(TxId),

    /// The ledger did not answer in time.
    #[error("ledger submission timed out after {0:?}")]
    Timeout(Duration),

    /// The ledger could not be reached.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The request could not be serialized.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl AnchorError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Unavailable(_))
    }
}

/// Result type for anchoring operations.
pub type Result<T> = std::result::Result<T, AnchorError>;
