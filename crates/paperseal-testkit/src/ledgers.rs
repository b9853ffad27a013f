//! Scripted ledgers for failure injection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use paperseal_anchor::{AnchorError, AnchorReceipt, AnchorRequest, Ledger, Result, TxId};

/// What a scripted ledger does on one call.
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this transaction id.
    Succeed(String),
    /// Fail as unreachable.
    Unavailable,
    /// Reject the submission.
    Reject(String),
    /// Wait, then answer with this id.
    Delay(Duration, String),
}

/// A ledger that plays back a fixed script, then keeps succeeding.
///
/// Records every request it receives. It keeps no key index, so every
/// success is a first-time receipt.
pub struct ScriptedLedger {
    script: Mutex<Vec<Step>>,
    calls: AtomicUsize,
    received: Mutex<Vec<AnchorRequest>>,
}

impl ScriptedLedger {
    pub fn new(script: Vec<Step>) -> Self {
        let mut script = script;
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Always fails as unreachable.
    pub fn failing() -> Self {
        Self::new(vec![Step::Unavailable; 64])
    }

    /// Answers every call after `delay`.
    pub fn slow(delay: Duration) -> Self {
        Self::new(vec![Step::Delay(delay, "0xslow".to_string()); 64])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<AnchorRequest> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn next_step(&self) -> Step {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop()
            .unwrap_or_else(|| Step::Succeed(format!("0x{n:016x}")))
    }
}

#[async_trait]
impl Ledger for ScriptedLedger {
    async fn submit(&self, request: &AnchorRequest) -> Result<AnchorReceipt> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        match self.next_step() {
            Step::Succeed(tx) => Ok(AnchorReceipt::new(TxId::new(tx), request)),
            Step::Unavailable => Err(AnchorError::Unavailable("scripted outage".to_string())),
            Step::Reject(reason) => Err(AnchorError::Rejected(reason)),
            Step::Delay(delay, tx) => {
                tokio::time::sleep(delay).await;
                Ok(AnchorReceipt::new(TxId::new(tx), request))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperseal_anchor::IdempotencyKey;

    fn request() -> AnchorRequest {
        AnchorRequest::new(IdempotencyKey::from_bytes([0; 16]), &[], 0)
    }

    #[tokio::test]
    async fn test_script_then_default() {
        let ledger = ScriptedLedger::new(vec![Step::Unavailable, Step::Succeed("0xabc".into())]);

        assert!(ledger.submit(&request()).await.is_err());
        assert_eq!(ledger.submit(&request()).await.unwrap().tx_id.as_str(), "0xabc");
        assert_eq!(
            ledger.submit(&request()).await.unwrap().tx_id.as_str(),
            "0x0000000000000002"
        );
        assert_eq!(ledger.calls(), 3);
        assert_eq!(ledger.received().len(), 3);
    }
}
