//! Strong type definitions for Paperseal.
//!
//! Identifiers are newtypes so a token id can never be passed where a
//! document id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix of every section token id.
pub const TOKEN_PREFIX: &str = "SIP";

/// Namespace prefix of every document id.
pub const DOCUMENT_PREFIX: &str = "paper";

/// Globally unique identifier assigned to a section at fingerprinting time.
///
/// Format: `SIP-<unix millis>-<16 hex chars>`. Not derived from content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Build a token id from a timestamp and random suffix bytes.
    pub fn new(millis: i64, suffix: &[u8; 8]) -> Self {
        Self(format!("{}-{}-{}", TOKEN_PREFIX, millis, hex::encode(suffix)))
    }

    /// Wrap an existing token id string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a processed document.
///
/// Format: `paper-<unix millis>-<12 hex chars>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Build a document id from a timestamp and random suffix bytes.
    pub fn new(millis: i64, suffix: &[u8; 6]) -> Self {
        Self(format!("{}-{}-{}", DOCUMENT_PREFIX, millis, hex::encode(suffix)))
    }

    /// Wrap an existing document id string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The structural role of a section.
///
/// Variants are declared in canonical order; that order is the segmenter's
/// precedence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Abstract,
    Introduction,
    LiteratureReview,
    Methodology,
    Results,
    Conclusion,
    /// Implicit whole-document section, produced only by the segmenter's
    /// fallback. Not part of the canonical order.
    Body,
}

impl SectionKind {
    /// All kinds in canonical order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::LiteratureReview,
        SectionKind::Methodology,
        SectionKind::Results,
        SectionKind::Conclusion,
    ];

    /// Position in canonical order. `Body` sorts after every canonical kind.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this kind takes part in keyword segmentation.
    pub fn is_canonical(self) -> bool {
        self != Self::Body
    }

    /// Snake-case label, as serialized.
    pub fn label(self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Introduction => "introduction",
            Self::LiteratureReview => "literature_review",
            Self::Methodology => "methodology",
            Self::Results => "results",
            Self::Conclusion => "conclusion",
            Self::Body => "body",
        }
    }

    /// Lowercase keyword that opens a section of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::LiteratureReview => "literature",
            other => other.label(),
        }
    }

    /// Human-readable title: underscores become spaces, words capitalized.
    pub fn title(self) -> String {
        self.label()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse from the snake-case label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .chain(std::iter::once(Self::Body))
            .find(|k| k.label() == label)
    }

    /// Kinds that come strictly after this one in canonical order.
    pub fn later(self) -> &'static [SectionKind] {
        if self.is_canonical() {
            &Self::ALL[self.index() + 1..]
        } else {
            &[]
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(SectionKind::Abstract.title(), "Abstract");
        assert_eq!(SectionKind::LiteratureReview.title(), "Literature Review");
    }

    #[test]
    fn test_canonical_order() {
        for (i, kind) in SectionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert!(SectionKind::Conclusion.later().is_empty());
        assert_eq!(SectionKind::Results.later(), &[SectionKind::Conclusion]);
        assert!(SectionKind::Body.later().is_empty());
        assert!(!SectionKind::ALL.contains(&SectionKind::Body));
    }

    #[test]
    fn test_label_roundtrip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(SectionKind::from_label("body"), Some(SectionKind::Body));
        assert_eq!(SectionKind::from_label("discussion"), None);
    }

    #[test]
    fn test_token_id_format() {
        let id = TokenId::new(1_700_000_000_000, &[0xab; 8]);
        assert_eq!(id.as_str(), "SIP-1700000000000-abababababababab");
    }

    #[test]
    fn test_serde_label() {
        let json = serde_json::to_string(&SectionKind::LiteratureReview).unwrap();
        assert_eq!(json, "\"literature_review\"");
    }
}
