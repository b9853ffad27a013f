//! Pipeline configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use paperseal_core::{SegmentationFallback, SegmenterConfig, FLAG_THRESHOLD, MIN_SECTION_CHARS};

use crate::error::{PipelineError, Result};

/// Configuration for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// A document is flagged when its overall similarity exceeds this.
    pub flag_threshold: u8,
    /// Minimum trimmed length of a kept section, in characters.
    pub min_section_chars: usize,
    /// Policy for text without recognizable sections.
    pub fallback: SegmentationFallback,
    /// Upper bound on a single ledger submission, in milliseconds.
    pub ledger_timeout_ms: u64,
    /// Authors recorded when an upload names none.
    pub default_authors: Vec<String>,
    /// Institution recorded when an upload names none.
    pub default_institution: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            flag_threshold: FLAG_THRESHOLD,
            min_section_chars: MIN_SECTION_CHARS,
            fallback: SegmentationFallback::Reject,
            ledger_timeout_ms: 30_000,
            default_authors: vec!["Unknown Author".to_string()],
            default_institution: "Unknown Institution".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.flag_threshold > 100 {
            return Err(PipelineError::Config(format!(
                "flag_threshold must be at most 100, got {}",
                self.flag_threshold
            )));
        }
        if self.ledger_timeout_ms == 0 {
            return Err(PipelineError::Config(
                "ledger_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ledger_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger_timeout_ms)
    }

    pub fn segmenter(&self) -> SegmenterConfig {
        SegmenterConfig {
            min_section_chars: self.min_section_chars,
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.flag_threshold, 70);
        assert_eq!(config.min_section_chars, 50);
        assert_eq!(config.fallback, SegmentationFallback::Reject);
        assert_eq!(config.ledger_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            PipelineConfig::from_json(r#"{"fallback": "whole_document", "ledger_timeout_ms": 500}"#)
                .unwrap();
        assert_eq!(config.fallback, SegmentationFallback::WholeDocument);
        assert_eq!(config.ledger_timeout(), Duration::from_millis(500));
        assert_eq!(config.flag_threshold, 70);
        assert_eq!(config.segmenter().fallback, SegmentationFallback::WholeDocument);
    }

    #[test]
    fn test_invalid_config() {
        assert!(PipelineConfig::from_json(r#"{"flag_threshold": 101}"#).is_err());
        assert!(PipelineConfig::from_json(r#"{"ledger_timeout_ms": 0}"#).is_err());
        assert!(PipelineConfig::from_json("not json").is_err());
    }
}
