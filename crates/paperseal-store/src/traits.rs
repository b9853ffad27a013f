//! DocumentStore trait: the abstract interface for the result collection.
//!
//! The collection is append-only. Documents are never updated or removed,
//! and readers only ever see fully assembled documents.

use std::sync::Arc;

use async_trait::async_trait;
use paperseal_core::{Document, DocumentId};

use crate::error::Result;
use crate::stats::StoreStats;

/// Async interface for the append-only document collection.
///
/// # Design Notes
///
/// - **Atomic append**: a document becomes visible in a single step.
/// - **No overwrite**: appending an existing id returns `Duplicate`.
/// - **Shared reads**: documents are handed out as `Arc<Document>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a fully assembled document.
    async fn append(&self, document: Document) -> Result<Arc<Document>>;

    /// Get a document by id.
    async fn get(&self, id: &DocumentId) -> Result<Option<Arc<Document>>>;

    /// The document published for a ledger transaction, if any.
    async fn find_by_anchor(&self, tx_id: &str) -> Result<Option<Arc<Document>>>;

    /// All documents in append order.
    async fn list(&self) -> Result<Vec<Arc<Document>>>;

    /// Up to `limit` documents, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Arc<Document>>>;

    /// Number of documents.
    async fn len(&self) -> Result<usize>;

    /// Aggregate statistics over the whole collection.
    async fn stats(&self) -> Result<StoreStats> {
        let documents = self.list().await?;
        Ok(StoreStats::compute(&documents))
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn append(&self, document: Document) -> Result<Arc<Document>> {
        (**self).append(document).await
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Arc<Document>>> {
        (**self).get(id).await
    }

    async fn find_by_anchor(&self, tx_id: &str) -> Result<Option<Arc<Document>>> {
        (**self).find_by_anchor(tx_id).await
    }

    async fn list(&self) -> Result<Vec<Arc<Document>>> {
        (**self).list().await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Arc<Document>>> {
        (**self).recent(limit).await
    }

    async fn len(&self) -> Result<usize> {
        (**self).len().await
    }

    async fn stats(&self) -> Result<StoreStats> {
        (**self).stats().await
    }
}
