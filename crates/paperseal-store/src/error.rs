//! Error types for the store module.

use paperseal_core::DocumentId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with this id was already appended.
    #[error("document already exists: {0}")]
    Duplicate(DocumentId),

    /// A document for this ledger transaction was already appended.
    #[error("transaction already published: {0}")]
    DuplicateAnchor(String),

    /// The store has been closed and accepts no more appends.
    #[error("store is closed")]
    Closed,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
