//! Hashing primitives for Paperseal.
//!
//! Wraps Blake3 with strong types for section hashes and content addresses.
//! Blake3 is deterministic across platforms and process restarts, and a
//! single-character change in the input yields an unrelated digest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain tag mixed into every section content hash.
const SECTION_DOMAIN: &[u8] = b"paperseal-section-v0:";

/// Domain tag mixed into every content address.
const ADDRESS_DOMAIN: &[u8] = b"paperseal-address-v0:";

/// Prefix of the rendered content address.
pub const ADDRESS_PREFIX: &str = "b3";

/// Deterministic 32-byte digest of a section's content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Hash section content. A pure function of `content`.
    pub fn of_content(content: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(SECTION_DOMAIN);
        hasher.update(content.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Content-derived address of an anchored payload.
///
/// Computed as Blake3 over the canonical payload bytes, so two identical
/// payloads always share an address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentAddress(pub [u8; 32]);

impl ContentAddress {
    /// Derive the address of canonical payload bytes.
    pub fn derive(canonical: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(ADDRESS_DOMAIN);
        hasher.update(canonical);
        Self(*hasher.finalize().as_bytes())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (without prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentAddress({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, self.to_hex())
    }
}
