//! The anchor request: the explicit, serializable ledger payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use paperseal_core::{
    payload_address, ContentAddress, ContentHash, IdSource, Section, SectionKind, TokenId,
};

use crate::error::{AnchorError, Result};

/// Caller-chosen key that makes ledger submission idempotent.
///
/// Resubmitting a request with the same key returns the original
/// transaction instead of anchoring twice.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey(pub [u8; 16]);

impl IdempotencyKey {
    /// Mint a fresh key.
    pub fn generate(ids: &dyn IdSource) -> Self {
        let mut bytes = [0u8; 16];
        ids.fill(&mut bytes);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 16] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdempotencyKey({})", self.to_hex())
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Opaque transaction identifier returned by a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-section view carried in the anchor payload.
///
/// Content itself is not sent; its hash commits to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoredSection {
    pub id: String,
    pub kind: SectionKind,
    pub token_id: TokenId,
    pub hash: ContentHash,
    pub timestamp: i64,
    pub similarity: Option<u8>,
}

impl From<&Section> for AnchoredSection {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id().to_string(),
            kind: section.kind(),
            token_id: section.token_id().clone(),
            hash: *section.hash(),
            timestamp: section.timestamp(),
            similarity: section.similarity(),
        }
    }
}

/// Submission to the ledger: `{ sections, timestamp }` plus the
/// idempotency key and the payload's content address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRequest {
    pub idempotency_key: IdempotencyKey,
    pub timestamp: i64,
    pub sections: Vec<AnchoredSection>,
    pub content_address: ContentAddress,
}

impl AnchorRequest {
    /// Build a request from scored sections.
    pub fn new(idempotency_key: IdempotencyKey, sections: &[Section], timestamp: i64) -> Self {
        Self {
            idempotency_key,
            timestamp,
            sections: sections.iter().map(AnchoredSection::from).collect(),
            content_address: payload_address(sections, timestamp),
        }
    }

    /// Section hashes in payload order.
    ///
    /// Unlike the content address these do not change when the same text
    /// is fingerprinted again, so they identify a retried submission.
    pub fn content_hashes(&self) -> Vec<ContentHash> {
        self.sections.iter().map(|s| s.hash).collect()
    }

    /// JSON form of the request, for ledgers speaking JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AnchorError::Encoding(e.to_string()))
    }
}

/// What a ledger committed for an idempotency key.
///
/// On a replay this describes the first submission under the key, not the
/// request that triggered the replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorReceipt {
    pub tx_id: TxId,
    pub timestamp: i64,
    pub sections: Vec<AnchoredSection>,
    pub content_address: ContentAddress,
    /// The key had already been anchored by an earlier submission.
    pub replayed: bool,
}

impl AnchorReceipt {
    /// Receipt for a first-time anchoring of `request`.
    pub fn new(tx_id: TxId, request: &AnchorRequest) -> Self {
        Self {
            tx_id,
            timestamp: request.timestamp,
            sections: request.sections.clone(),
            content_address: request.content_address,
            replayed: false,
        }
    }

    /// Section hashes in anchored order.
    pub fn content_hashes(&self) -> Vec<ContentHash> {
        self.sections.iter().map(|s| s.hash).collect()
    }

    /// Whether `request` is exactly the anchored payload.
    pub fn covers(&self, request: &AnchorRequest) -> bool {
        self.content_address == request.content_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperseal_core::{FixedClock, Fingerprinter, RawSection, SeededIds};
    use std::sync::Arc;

    fn sections() -> Vec<Section> {
        let fp = Fingerprinter::new(Arc::new(FixedClock::new(10)), Arc::new(SeededIds::new(3)));
        fp.fingerprint_all(vec![RawSection {
            id: "section-1".into(),
            kind: SectionKind::Introduction,
            title: "Introduction".into(),
            content: "Introduction text".into(),
        }])
    }

    #[test]
    fn test_request_carries_payload_address() {
        let sections = sections();
        let key = IdempotencyKey::from_bytes([7; 16]);
        let request = AnchorRequest::new(key, &sections, 99);

        assert_eq!(request.sections.len(), 1);
        assert_eq!(request.sections[0].token_id, *sections[0].token_id());
        assert_eq!(request.content_address, payload_address(&sections, 99));
    }

    #[test]
    fn test_request_json() {
        let request = AnchorRequest::new(IdempotencyKey::from_bytes([1; 16]), &sections(), 5);
        let json = request.to_json().unwrap();
        assert!(json.contains("\"introduction\""));

        let back: AnchorRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_receipt_mirrors_request() {
        let request = AnchorRequest::new(IdempotencyKey::from_bytes([2; 16]), &sections(), 7);
        let receipt = AnchorReceipt::new(TxId::new("0x01"), &request);

        assert!(receipt.covers(&request));
        assert!(!receipt.replayed);
        assert_eq!(receipt.timestamp, 7);
        assert_eq!(receipt.content_hashes(), request.content_hashes());

        let later = AnchorRequest::new(IdempotencyKey::from_bytes([2; 16]), &sections(), 8);
        assert!(!receipt.covers(&later));
    }

    #[test]
    fn test_idempotency_key_hex() {
        let key = IdempotencyKey::generate(&SeededIds::new(1));
        assert_eq!(IdempotencyKey::from_hex(&key.to_hex()).unwrap(), key);
        assert!(IdempotencyKey::from_hex("00").is_err());
    }
}
