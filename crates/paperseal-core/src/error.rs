//! Error types for Paperseal Core.

use thiserror::Error;

/// Errors raised by the pure pipeline stages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No recognizable section headings were found in the input.
    #[error("no recognizable sections found in {chars} characters of input")]
    SegmentationEmpty { chars: usize },

    /// Similarity aggregation was attempted over zero sections.
    #[error("cannot aggregate similarity over zero sections")]
    EmptyAggregation,

    /// A section reached aggregation without a similarity score.
    #[error("section {0} has not been scored")]
    Unscored(String),

    /// A section was scored twice.
    #[error("section {0} is already scored")]
    AlreadyScored(String),

    /// A fingerprint was applied to a section with different content.
    #[error("section {0} does not match the fingerprinted content")]
    FingerprintMismatch(String),

    /// A document was assembled with a required field missing.
    #[error("document is missing required field: {0}")]
    MissingField(&'static str),

    /// The reference corpus could not be loaded.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// I/O error while reading configuration input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
