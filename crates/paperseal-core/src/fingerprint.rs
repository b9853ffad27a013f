//! Fingerprinter: assign token ids, content hashes and timestamps.

use std::sync::Arc;

use crate::provider::{Clock, IdSource, RandomIds, SystemClock};
use crate::section::Section;
use crate::segment::RawSection;
use crate::types::TokenId;

/// Assigns each section a unique token id, a content hash and a timestamp.
///
/// Token ids combine a millisecond timestamp with 64 random bits, so
/// collisions are negligible even under rapid repeated calls.
#[derive(Clone)]
pub struct Fingerprinter {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl Fingerprinter {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdSource>) -> Self {
        Self { clock, ids }
    }

    /// Mint a fresh token id.
    pub fn token_id(&self) -> TokenId {
        let mut suffix = [0u8; 8];
        self.ids.fill(&mut suffix);
        TokenId::new(self.clock.now_millis(), &suffix)
    }

    /// Fingerprint a single section.
    pub fn fingerprint(&self, raw: RawSection) -> Section {
        let timestamp = self.clock.now_millis();
        let token_id = self.token_id();
        Section::fingerprinted(raw, token_id, timestamp)
    }

    /// Fingerprint every section, preserving order.
    pub fn fingerprint_all(&self, raw: Vec<RawSection>) -> Vec<Section> {
        raw.into_iter().map(|r| self.fingerprint(r)).collect()
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIds))
    }
}

impl std::fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Fingerprinter")
    }
}
