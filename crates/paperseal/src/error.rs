//! Error types for the pipeline.

use std::fmt;

use paperseal_anchor::AnchorError;
use paperseal_core::CoreError;
use paperseal_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-document processing stages, in order.
///
/// A run moves `Received → Segmented → Fingerprinted → Scored → Anchored →
/// Completed`; any error moves it to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    Segmented,
    Fingerprinted,
    Scored,
    Anchored,
    Completed,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Segmented => "segmented",
            Self::Fingerprinted => "fingerprinted",
            Self::Scored => "scored",
            Self::Anchored => "anchored",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The submitted bytes are not valid UTF-8 text.
    #[error("input could not be decoded: {0}")]
    Parse(#[from] std::string::FromUtf8Error),

    /// Segmentation found nothing usable.
    #[error("segmentation failed: {0}")]
    Segmentation(#[source] CoreError),

    /// Scoring or aggregation failed.
    #[error("scoring failed: {0}")]
    Scoring(#[source] CoreError),

    /// The ledger call failed or timed out.
    #[error("ledger submission failed: {0}")]
    Ledger(#[from] AnchorError),

    /// The final record could not be assembled.
    #[error("document assembly failed: {0}")]
    Assembly(#[source] CoreError),

    /// The result collection refused the document.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid pipeline configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// The stage the run was trying to reach when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Parse(_) | Self::Config(_) => Stage::Received,
            Self::Segmentation(_) => Stage::Segmented,
            Self::Scoring(_) => Stage::Scored,
            Self::Ledger(_) => Stage::Anchored,
            Self::Assembly(_) | Self::Store(_) => Stage::Completed,
        }
    }

    /// No recognizable sections were found.
    pub fn is_segmentation_empty(&self) -> bool {
        matches!(
            self,
            Self::Segmentation(CoreError::SegmentationEmpty { .. })
        )
    }

    /// Aggregation ran over zero sections.
    pub fn is_empty_aggregation(&self) -> bool {
        matches!(
            self,
            Self::Scoring(CoreError::EmptyAggregation) | Self::Assembly(CoreError::EmptyAggregation)
        )
    }

    /// Whether resubmitting the same upload may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Ledger(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stage_of_errors() {
        let seg = PipelineError::Segmentation(CoreError::SegmentationEmpty { chars: 0 });
        assert_eq!(seg.stage(), Stage::Segmented);
        assert!(seg.is_segmentation_empty());
        assert!(!seg.is_retryable());

        let agg = PipelineError::Scoring(CoreError::EmptyAggregation);
        assert_eq!(agg.stage(), Stage::Scored);
        assert!(agg.is_empty_aggregation());

        let ledger = PipelineError::from(AnchorError::Timeout(Duration::from_secs(1)));
        assert_eq!(ledger.stage(), Stage::Anchored);
        assert!(ledger.is_retryable());
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::Received < Stage::Segmented);
        assert!(Stage::Anchored < Stage::Completed);
        assert_eq!(Stage::Fingerprinted.to_string(), "fingerprinted");
    }
}
