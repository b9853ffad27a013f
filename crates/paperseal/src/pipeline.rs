//! The Pipeline: per-document orchestration.
//!
//! The pipeline brings together segmentation, fingerprinting, scoring,
//! anchoring and the result collection. Each call to [`Pipeline::process`]
//! is an independent run; runs may execute concurrently.

use std::sync::Arc;

use tracing::Instrument;

use paperseal_anchor::{AnchorError, AnchorReceipt, AnchorRequest, IdempotencyKey, Ledger};
use paperseal_core::{
    payload_address, Clock, Corpus, Document, DocumentBuilder, DocumentId, Fingerprinter,
    IdSource, RandomIds, RawSection, Section, SectionSegmenter, SimilarityScorer, SystemClock,
};
use paperseal_store::{DocumentStore, StoreError};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result, Stage};
use crate::upload::Upload;

/// The main Pipeline struct.
///
/// Shared state is limited to the read-only corpus and the store. The
/// store is touched once per run, for the final append, after the ledger
/// call has completed.
pub struct Pipeline<S: DocumentStore, L: Ledger> {
    config: PipelineConfig,
    segmenter: SectionSegmenter,
    fingerprinter: Fingerprinter,
    scorer: SimilarityScorer,
    store: Arc<S>,
    ledger: Arc<L>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl<S: DocumentStore, L: Ledger> Pipeline<S, L> {
    /// Create a pipeline on the system clock and thread RNG.
    pub fn new(store: S, ledger: L, corpus: Corpus, config: PipelineConfig) -> Self {
        Self::with_providers(
            store,
            ledger,
            corpus,
            config,
            Arc::new(SystemClock),
            Arc::new(RandomIds),
        )
    }

    /// Create a pipeline with explicit time and identifier sources.
    pub fn with_providers(
        store: S,
        ledger: L,
        corpus: Corpus,
        config: PipelineConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            segmenter: SectionSegmenter::new(config.segmenter()),
            fingerprinter: Fingerprinter::new(Arc::clone(&clock), Arc::clone(&ids)),
            scorer: SimilarityScorer::new(corpus),
            config,
            store: Arc::new(store),
            ledger: Arc::new(ledger),
            clock,
            ids,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the ledger reference.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn corpus(&self) -> &Corpus {
        self.scorer.corpus()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stages
    // ─────────────────────────────────────────────────────────────────────────

    /// `Received → Segmented`. Applies the configured fallback.
    pub fn segment(&self, text: &str) -> Result<Vec<RawSection>> {
        self.segmenter
            .segment_checked(text)
            .map_err(PipelineError::Segmentation)
    }

    /// `Segmented → Fingerprinted`. Sections are independent of each other.
    pub fn fingerprint(&self, raw: Vec<RawSection>) -> Vec<Section> {
        self.fingerprinter.fingerprint_all(raw)
    }

    /// `Fingerprinted → Scored`. Returns the overall similarity.
    pub fn score(&self, sections: &mut [Section]) -> Result<u8> {
        self.scorer
            .score_all(sections)
            .map_err(PipelineError::Scoring)
    }

    /// `Scored → Anchored`. Bounded by the configured ledger timeout.
    pub async fn anchor(&self, request: &AnchorRequest) -> Result<AnchorReceipt> {
        let timeout = self.config.ledger_timeout();
        match tokio::time::timeout(timeout, self.ledger.submit(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AnchorError::Timeout(timeout).into()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Full run
    // ─────────────────────────────────────────────────────────────────────────

    /// Run the whole pipeline for one upload.
    ///
    /// On success the document has been appended to the store. On failure
    /// nothing was appended. Dropping the returned future before it
    /// completes also leaves the store untouched, though a ledger call that
    /// was already issued is not retracted; reuse the upload's idempotency
    /// key when retrying.
    ///
    /// A retry whose key was already anchored never publishes a second
    /// document. If the first run completed, its document is returned.
    /// Otherwise the new document is rebuilt on the anchored fingerprints,
    /// so its content address is the one the ledger recorded.
    pub async fn process(&self, upload: Upload) -> Result<Arc<Document>> {
        let span = tracing::info_span!("pipeline", upload = %upload.filename);
        let result = self.run(upload).instrument(span.clone()).await;

        if let Err(e) = &result {
            span.in_scope(|| {
                tracing::warn!(stage = %e.stage(), error = %e, "pipeline {}", Stage::Failed);
            });
        }
        result
    }

    async fn run(&self, upload: Upload) -> Result<Arc<Document>> {
        let upload_date = self.clock.now_millis();
        let document_id = self.mint_document_id(upload_date);
        tracing::debug!(id = %document_id, chars = upload.content.len(), "{}", Stage::Received);

        let raw = self.segment(&upload.content)?;
        tracing::debug!(sections = raw.len(), "{}", Stage::Segmented);

        let mut sections = self.fingerprint(raw);
        tracing::debug!(sections = sections.len(), "{}", Stage::Fingerprinted);

        let overall = self.score(&mut sections)?;
        tracing::debug!(overall, "{}", Stage::Scored);

        let key = upload
            .idempotency_key
            .unwrap_or_else(|| IdempotencyKey::generate(self.ids.as_ref()));
        let request = AnchorRequest::new(key, &sections, self.clock.now_millis());
        let receipt = self.anchor(&request).await?;
        tracing::debug!(
            tx = %receipt.tx_id,
            address = %receipt.content_address,
            replayed = receipt.replayed,
            "{}",
            Stage::Anchored
        );

        if receipt.replayed {
            if let Some(existing) = self.store.find_by_anchor(receipt.tx_id.as_str()).await? {
                tracing::info!(id = %existing.id(), tx = %receipt.tx_id, "already published");
                return Ok(existing);
            }
        }
        if !receipt.covers(&request) {
            sections = adopt_receipt(sections, &receipt)?;
        }

        let authors = if upload.authors.is_empty() {
            self.config.default_authors.clone()
        } else {
            upload.authors
        };
        let institution = upload
            .institution
            .unwrap_or_else(|| self.config.default_institution.clone());

        let document = DocumentBuilder::new(document_id, &upload.filename, upload_date)
            .authors(authors)
            .institution(institution)
            .sections(sections)
            .anchor_tx_id(receipt.tx_id.as_str())
            .content_address(receipt.content_address)
            .flag_threshold(self.config.flag_threshold)
            .build()
            .map_err(PipelineError::Assembly)?;

        let document = match self.store.append(document).await {
            Ok(document) => document,
            // A concurrent retry under the same key published first.
            Err(StoreError::DuplicateAnchor(tx)) => self
                .store
                .find_by_anchor(&tx)
                .await?
                .ok_or(StoreError::DuplicateAnchor(tx))?,
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            id = %document.id(),
            overall = document.overall_similarity(),
            status = ?document.status(),
            "{}",
            Stage::Completed
        );
        Ok(document)
    }

    fn mint_document_id(&self, millis: i64) -> DocumentId {
        let mut suffix = [0u8; 6];
        self.ids.fill(&mut suffix);
        DocumentId::new(millis, &suffix)
    }
}

/// Rebind sections to the fingerprints a replayed transaction recorded.
///
/// Content and scores must be unchanged; the result has to reproduce the
/// anchored content address exactly.
fn adopt_receipt(sections: Vec<Section>, receipt: &AnchorReceipt) -> Result<Vec<Section>> {
    let diverged = || PipelineError::Ledger(AnchorError::Diverged(receipt.tx_id.clone()));

    if sections.len() != receipt.sections.len() {
        return Err(diverged());
    }
    let adopted = sections
        .into_iter()
        .zip(&receipt.sections)
        .map(|(section, anchored)| {
            section
                .adopt_fingerprint(anchored.token_id.clone(), &anchored.hash, anchored.timestamp)
                .map_err(|_| diverged())
        })
        .collect::<Result<Vec<_>>>()?;

    if payload_address(&adopted, receipt.timestamp) != receipt.content_address {
        return Err(diverged());
    }
    Ok(adopted)
}
