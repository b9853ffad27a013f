//! Ledger abstraction for anchoring.
//!
//! The ledger is an external, possibly slow collaborator. Implementations
//! may talk to a blockchain, a notary service, or anything that hands back
//! an opaque transaction id.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::request::{AnchorReceipt, AnchorRequest, TxId};

/// Ledger trait for anchoring payloads.
///
/// Implementations must be thread-safe (Send + Sync) and should honor the
/// request's idempotency key: a repeated key yields a receipt for the
/// original submission, marked `replayed`.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Anchor the request and describe what was committed.
    async fn submit(&self, request: &AnchorRequest) -> Result<AnchorReceipt>;
}

#[async_trait]
impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    async fn submit(&self, request: &AnchorRequest) -> Result<AnchorReceipt> {
        (**self).submit(request).await
    }
}

/// A simple in-memory ledger.
///
/// Simulates submission latency and keeps every anchored payload so tests
/// can inspect them.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use paperseal_core::{IdSource, RandomIds};
    use tokio::sync::RwLock;

    use crate::error::AnchorError;
    use crate::request::IdempotencyKey;

    /// Configuration for the in-memory ledger.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryLedgerConfig {
        /// Delay applied to every submission before it is recorded.
        pub latency: Duration,
    }

    impl MemoryLedgerConfig {
        /// A two-second delay, like a slow public ledger.
        pub fn simulated() -> Self {
            Self {
                latency: Duration::from_secs(2),
            }
        }
    }

    #[derive(Default)]
    struct LedgerState {
        by_key: HashMap<IdempotencyKey, AnchorReceipt>,
        by_tx: HashMap<TxId, IdempotencyKey>,
        submissions: usize,
    }

    /// In-memory ledger implementation.
    pub struct MemoryLedger {
        config: MemoryLedgerConfig,
        ids: Arc<dyn IdSource>,
        state: RwLock<LedgerState>,
    }

    impl MemoryLedger {
        pub fn new(config: MemoryLedgerConfig) -> Self {
            Self::with_ids(config, Arc::new(RandomIds))
        }

        /// Use a specific identifier source for transaction ids.
        pub fn with_ids(config: MemoryLedgerConfig, ids: Arc<dyn IdSource>) -> Self {
            Self {
                config,
                ids,
                state: RwLock::new(LedgerState::default()),
            }
        }

        /// Look up an anchored payload by transaction id.
        pub async fn lookup(&self, tx_id: &TxId) -> Option<AnchorReceipt> {
            let state = self.state.read().await;
            state
                .by_tx
                .get(tx_id)
                .and_then(|key| state.by_key.get(key))
                .cloned()
        }

        /// Number of distinct anchored payloads.
        pub async fn anchored_count(&self) -> usize {
            self.state.read().await.by_key.len()
        }

        /// Number of `submit` calls received, replays included.
        pub async fn submission_count(&self) -> usize {
            self.state.read().await.submissions
        }

        fn mint_tx_id(&self) -> TxId {
            let mut bytes = [0u8; 8];
            self.ids.fill(&mut bytes);
            TxId::new(format!("0x{}", hex::encode(bytes)))
        }
    }

    impl Default for MemoryLedger {
        fn default() -> Self {
            Self::new(MemoryLedgerConfig::default())
        }
    }

    #[async_trait]
    impl Ledger for MemoryLedger {
        async fn submit(&self, request: &AnchorRequest) -> Result<AnchorReceipt> {
            if !self.config.latency.is_zero() {
                tokio::time::sleep(self.config.latency).await;
            }

            let mut state = self.state.write().await;
            state.submissions += 1;

            if let Some(existing) = state.by_key.get(&request.idempotency_key) {
                // A retry re-fingerprints, so only the section text must match.
                if existing.content_hashes() != request.content_hashes() {
                    return Err(AnchorError::KeyReused(request.idempotency_key));
                }
                tracing::debug!(
                    key = %request.idempotency_key,
                    tx = %existing.tx_id,
                    "replayed anchor submission"
                );
                return Ok(AnchorReceipt {
                    replayed: true,
                    ..existing.clone()
                });
            }

            let receipt = AnchorReceipt::new(self.mint_tx_id(), request);
            state
                .by_tx
                .insert(receipt.tx_id.clone(), request.idempotency_key);
            state
                .by_key
                .insert(request.idempotency_key, receipt.clone());

            tracing::debug!(
                tx = %receipt.tx_id,
                address = %receipt.content_address,
                sections = receipt.sections.len(),
                "anchored payload"
            );
            Ok(receipt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{MemoryLedger, MemoryLedgerConfig};
    use super::*;
    use crate::error::AnchorError;
    use crate::request::IdempotencyKey;
    use paperseal_core::{FixedClock, Fingerprinter, RawSection, SectionKind, SeededIds};
    use std::time::Duration;

    fn request(key: u8, content: &str) -> AnchorRequest {
        request_at(key, content, 1_000)
    }

    fn request_at(key: u8, content: &str, timestamp: i64) -> AnchorRequest {
        let fp = Fingerprinter::new(Arc::new(FixedClock::new(1)), Arc::new(SeededIds::new(1)));
        let sections = fp.fingerprint_all(vec![RawSection {
            id: "section-0".into(),
            kind: SectionKind::Abstract,
            title: "Abstract".into(),
            content: content.into(),
        }]);
        AnchorRequest::new(IdempotencyKey::from_bytes([key; 16]), &sections, timestamp)
    }

    #[tokio::test]
    async fn test_submit_returns_tx_id() {
        let ledger = MemoryLedger::default();
        let req = request(1, "abstract one");
        let receipt = ledger.submit(&req).await.unwrap();

        assert!(receipt.tx_id.as_str().starts_with("0x"));
        assert_eq!(receipt.tx_id.as_str().len(), 18);
        assert!(!receipt.replayed);
        assert!(receipt.covers(&req));

        let entry = ledger.lookup(&receipt.tx_id).await.unwrap();
        assert_eq!(entry, receipt);
    }

    #[tokio::test]
    async fn test_replay_is_idempotent() {
        let ledger = MemoryLedger::default();
        let req = request(1, "abstract one");

        let first = ledger.submit(&req).await.unwrap();
        let second = ledger.submit(&req).await.unwrap();

        assert_eq!(first.tx_id, second.tx_id);
        assert!(second.replayed);
        assert_eq!(ledger.anchored_count().await, 1);
        assert_eq!(ledger.submission_count().await, 2);
    }

    #[tokio::test]
    async fn test_replay_reports_first_payload() {
        let ledger = MemoryLedger::default();
        let first = request_at(1, "abstract one", 1_000);
        let retry = request_at(1, "abstract one", 2_000);
        assert_ne!(first.content_address, retry.content_address);

        let anchored = ledger.submit(&first).await.unwrap();
        let replay = ledger.submit(&retry).await.unwrap();

        assert!(replay.replayed);
        assert!(!replay.covers(&retry));
        assert_eq!(replay.content_address, first.content_address);
        assert_eq!(replay.timestamp, 1_000);
        assert_eq!(
            ledger.lookup(&anchored.tx_id).await.unwrap().content_address,
            replay.content_address
        );
    }

    #[tokio::test]
    async fn test_key_reuse_with_other_payload_rejected() {
        let ledger = MemoryLedger::default();
        ledger.submit(&request(1, "abstract one")).await.unwrap();

        let err = ledger.submit(&request(1, "abstract two")).await.unwrap_err();
        assert!(matches!(err, AnchorError::KeyReused(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_distinct_keys_distinct_tx() {
        let ledger = MemoryLedger::default();
        let first = ledger.submit(&request(1, "same")).await.unwrap();
        let second = ledger.submit(&request(2, "same")).await.unwrap();
        assert_ne!(first.tx_id, second.tx_id);
        assert_eq!(ledger.anchored_count().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let ledger = MemoryLedger::new(MemoryLedgerConfig::simulated());
        let start = tokio::time::Instant::now();
        ledger.submit(&request(1, "abstract")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_arc_ledger() {
        let ledger: Arc<dyn Ledger> = Arc::new(MemoryLedger::default());
        assert!(ledger.submit(&request(3, "abstract")).await.is_ok());
    }
}
