//! SectionSegmenter: split raw text into typed sections.
//!
//! Segmentation is an ordered keyword scan. For each kind in canonical
//! order, the span starts at the first case-insensitive occurrence of the
//! kind's keyword and runs up to the first occurrence, after that keyword,
//! of any keyword belonging to a *later* kind (or the end of text).
//!
//! Canonical order is the tie-break: an earlier kind is always matched
//! first and never terminated by the keyword of an earlier kind, whatever
//! the actual position of the keywords in the text.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::SectionKind;

/// Default minimum trimmed length, in characters, of a kept section.
pub const MIN_SECTION_CHARS: usize = 50;

/// What to do when no section keyword is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationFallback {
    /// Report `SegmentationEmpty`.
    #[default]
    Reject,
    /// Emit the whole trimmed text as a single `Body` section.
    WholeDocument,
}

/// Configuration for the segmenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Spans shorter than this (after trimming) are discarded.
    pub min_section_chars: usize,
    /// Policy for text with no recognized sections.
    pub fallback: SegmentationFallback,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_section_chars: MIN_SECTION_CHARS,
            fallback: SegmentationFallback::Reject,
        }
    }
}

/// A typed span of text, before fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSection {
    /// Locally unique within a document: `section-<canonical index>`.
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub content: String,
}

impl RawSection {
    fn new(kind: SectionKind, content: &str) -> Self {
        Self {
            id: format!("section-{}", kind.index()),
            kind,
            title: kind.title(),
            content: content.to_string(),
        }
    }
}

/// Splits raw text into canonical sections.
#[derive(Debug, Clone, Default)]
pub struct SectionSegmenter {
    config: SegmenterConfig,
}

impl SectionSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Split `text` into 0 to 6 sections in canonical order.
    ///
    /// Never fails; an empty result means nothing was recognized.
    pub fn segment(&self, text: &str) -> Vec<RawSection> {
        // ASCII folding keeps byte offsets aligned with `text`.
        let folded = text.to_ascii_lowercase();
        let mut sections = Vec::new();

        for kind in SectionKind::ALL {
            let keyword = kind.keyword();
            let Some(start) = folded.find(keyword) else {
                continue;
            };

            let after = start + keyword.len();
            let end = kind
                .later()
                .iter()
                .filter_map(|later| folded[after..].find(later.keyword()))
                .min()
                .map_or(text.len(), |offset| after + offset);

            let content = text[start..end].trim();
            if content.chars().count() < self.config.min_section_chars {
                tracing::debug!(
                    kind = kind.label(),
                    chars = content.chars().count(),
                    "discarding short section"
                );
                continue;
            }

            sections.push(RawSection::new(kind, content));
        }

        sections
    }

    /// Segment `text`, applying the configured fallback when nothing is
    /// recognized.
    pub fn segment_checked(&self, text: &str) -> Result<Vec<RawSection>> {
        let sections = self.segment(text);
        if !sections.is_empty() {
            return Ok(sections);
        }

        match self.config.fallback {
            SegmentationFallback::Reject => Err(CoreError::SegmentationEmpty {
                chars: text.chars().count(),
            }),
            SegmentationFallback::WholeDocument => {
                let content = text.trim();
                if content.chars().count() < self.config.min_section_chars {
                    return Err(CoreError::SegmentationEmpty {
                        chars: text.chars().count(),
                    });
                }
                Ok(vec![RawSection::new(SectionKind::Body, content)])
            }
        }
    }
}
