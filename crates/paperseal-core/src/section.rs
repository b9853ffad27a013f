//! Section: a fingerprinted span of a document.
//!
//! A section's token id, hash and timestamp are fixed at fingerprinting
//! time. Its similarity score is written exactly once, by the scorer.

use serde::{Deserialize, Serialize};

use crate::crypto::ContentHash;
use crate::error::{CoreError, Result};
use crate::segment::RawSection;
use crate::types::{SectionKind, TokenId};

/// A fingerprinted, optionally scored section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: String,
    kind: SectionKind,
    title: String,
    content: String,
    token_id: TokenId,
    hash: ContentHash,
    timestamp: i64,
    similarity: Option<u8>,
    closest_reference: Option<usize>,
}

impl Section {
    /// Attach fingerprint data to a raw section.
    pub(crate) fn fingerprinted(raw: RawSection, token_id: TokenId, timestamp: i64) -> Self {
        let hash = ContentHash::of_content(&raw.content);
        Self {
            id: raw.id,
            kind: raw.kind,
            title: raw.title,
            content: raw.content,
            token_id,
            hash,
            timestamp,
            similarity: None,
            closest_reference: None,
        }
    }

    /// Record the similarity score. Fails if already scored.
    pub(crate) fn record_score(&mut self, similarity: u8, closest: Option<usize>) -> Result<()> {
        if self.similarity.is_some() {
            return Err(CoreError::AlreadyScored(self.id.clone()));
        }
        self.similarity = Some(similarity.min(100));
        self.closest_reference = closest;
        Ok(())
    }

    /// Take over a fingerprint issued earlier for the same content.
    ///
    /// Used when a retried run must reproduce the payload a ledger already
    /// anchored. The score is kept.
    pub fn adopt_fingerprint(
        mut self,
        token_id: TokenId,
        hash: &ContentHash,
        timestamp: i64,
    ) -> Result<Self> {
        if *hash != self.hash {
            return Err(CoreError::FingerprintMismatch(self.id));
        }
        self.token_id = token_id;
        self.timestamp = timestamp;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Fingerprinting time, Unix milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Similarity in `[0, 100]`, once scored.
    pub fn similarity(&self) -> Option<u8> {
        self.similarity
    }

    /// Index of the corpus entry that produced the similarity score.
    pub fn closest_reference(&self) -> Option<usize> {
        self.closest_reference
    }

    pub fn is_scored(&self) -> bool {
        self.similarity.is_some()
    }

    /// Risk band of the similarity score, once scored.
    pub fn risk(&self) -> Option<RiskLevel> {
        self.similarity.map(RiskLevel::from_similarity)
    }
}

/// Coarse risk band for a section similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 0 to 40.
    Low,
    /// 41 to 70.
    Elevated,
    /// Above 70.
    High,
}

impl RiskLevel {
    pub fn from_similarity(similarity: u8) -> Self {
        match similarity {
            0..=40 => Self::Low,
            41..=70 => Self::Elevated,
            _ => Self::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        let raw = RawSection {
            id: "section-0".into(),
            kind: SectionKind::Abstract,
            title: "Abstract".into(),
            content: "Abstract: some content".into(),
        };
        Section::fingerprinted(raw, TokenId::from_string("SIP-1-00"), 1)
    }

    #[test]
    fn test_score_set_once() {
        let mut s = section();
        assert!(!s.is_scored());
        s.record_score(42, Some(3)).unwrap();
        assert_eq!(s.similarity(), Some(42));
        assert_eq!(s.closest_reference(), Some(3));

        let err = s.record_score(10, None).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyScored(_)));
        assert_eq!(s.similarity(), Some(42));
    }

    #[test]
    fn test_adopt_fingerprint() {
        let mut s = section();
        s.record_score(5, None).unwrap();
        let hash = *s.hash();

        let adopted = s
            .clone()
            .adopt_fingerprint(TokenId::from_string("SIP-9-ff"), &hash, 9)
            .unwrap();
        assert_eq!(adopted.token_id().as_str(), "SIP-9-ff");
        assert_eq!(adopted.timestamp(), 9);
        assert_eq!(adopted.similarity(), Some(5));

        let other = ContentHash::of_content("something else");
        let err = s
            .adopt_fingerprint(TokenId::from_string("SIP-9-ff"), &other, 9)
            .unwrap_err();
        assert!(matches!(err, CoreError::FingerprintMismatch(_)));
    }

    #[test]
    fn test_hash_matches_content() {
        let s = section();
        assert_eq!(*s.hash(), ContentHash::of_content(s.content()));
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskLevel::from_similarity(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_similarity(40), RiskLevel::Low);
        assert_eq!(RiskLevel::from_similarity(41), RiskLevel::Elevated);
        assert_eq!(RiskLevel::from_similarity(70), RiskLevel::Elevated);
        assert_eq!(RiskLevel::from_similarity(71), RiskLevel::High);
    }
}
