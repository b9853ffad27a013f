//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use paperseal::{Pipeline, PipelineConfig, Upload};
use paperseal_anchor::{Ledger, MemoryLedger, MemoryLedgerConfig};
use paperseal_core::{Corpus, FixedClock, SeededIds};
use paperseal_store::MemoryStore;

/// Start time of every fixture clock: 2023-11-14T22:13:20Z.
pub const FIXTURE_EPOCH: i64 = 1_700_000_000_000;

/// Prose with no section keyword, 60+ characters.
pub const PROSE: &str =
    "the committee reviewed every submission carefully before publishing its findings";

/// Text overlapping heavily with the first built-in reference.
pub const DERIVATIVE: &str =
    "machine learning algorithms have revolutionized data analysis across multiple domains";

/// Build a submission from `(keyword, body)` pairs.
pub fn academic_text(parts: &[(&str, &str)]) -> String {
    parts
        .iter()
        .map(|(heading, body)| format!("{heading}: {body}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A three-section submission: abstract, introduction, conclusion.
pub fn three_section_text() -> String {
    academic_text(&[("Abstract", PROSE), ("Introduction", PROSE), ("Conclusion", PROSE)])
}

/// A pipeline wired to a deterministic clock and identifier source.
pub struct TestFixture<L: Ledger = MemoryLedger> {
    pub clock: Arc<FixedClock>,
    pub pipeline: Pipeline<MemoryStore, L>,
}

impl TestFixture<MemoryLedger> {
    /// Default configuration, default corpus, instant ledger.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default(), Corpus::default())
    }

    pub fn with_config(config: PipelineConfig, corpus: Corpus) -> Self {
        Self::with_ledger(
            MemoryLedger::with_ids(MemoryLedgerConfig::default(), Arc::new(SeededIds::new(7))),
            config,
            corpus,
        )
    }
}

impl<L: Ledger> TestFixture<L> {
    /// Use a custom ledger.
    pub fn with_ledger(ledger: L, config: PipelineConfig, corpus: Corpus) -> Self {
        let clock = Arc::new(FixedClock::stepping(FIXTURE_EPOCH, 1));
        let pipeline = Pipeline::with_providers(
            MemoryStore::new(),
            ledger,
            corpus,
            config,
            clock.clone(),
            Arc::new(SeededIds::new(1)),
        );
        Self { clock, pipeline }
    }

    /// A text upload named `name`.
    pub fn upload(&self, name: &str, text: impl Into<String>) -> Upload {
        Upload::new(name, text)
    }
}

impl Default for TestFixture<MemoryLedger> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperseal_store::DocumentStore;

    #[tokio::test]
    async fn test_fixture_processes_three_sections() {
        let fixture = TestFixture::new();
        let doc = fixture
            .pipeline
            .process(fixture.upload("paper.txt", three_section_text()))
            .await
            .unwrap();

        assert_eq!(doc.sections().len(), 3);
        assert_eq!(fixture.pipeline.store().len().await.unwrap(), 1);
    }

    #[test]
    fn test_academic_text_layout() {
        let text = academic_text(&[("Abstract", "a"), ("Results", "b")]);
        assert_eq!(text, "Abstract: a\n\nResults: b");
    }
}
