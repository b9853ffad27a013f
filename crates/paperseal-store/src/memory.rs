//! In-memory implementation of the DocumentStore trait.
//!
//! Appends take the write lock only for the final push, so a pipeline never
//! holds it across an await point.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use paperseal_core::{Document, DocumentId};

use crate::error::{Result, StoreError};
use crate::traits::DocumentStore;

/// In-memory, append-only document store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Documents in append order.
    documents: Vec<Arc<Document>>,

    /// Id index into `documents`.
    by_id: HashMap<DocumentId, usize>,

    /// Anchor transaction index into `documents`.
    by_anchor: HashMap<String, usize>,

    closed: bool,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    /// Stop accepting appends. Reads keep working.
    pub fn close(&self) {
        self.write().closed = true;
    }

    /// Tear the store down, returning its documents in append order.
    pub fn into_documents(self) -> Vec<Arc<Document>> {
        self.inner
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
            .documents
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryStoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryStoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn append(&self, document: Document) -> Result<Arc<Document>> {
        let document = Arc::new(document);
        let mut inner = self.write();

        if inner.closed {
            return Err(StoreError::Closed);
        }
        if inner.by_id.contains_key(document.id()) {
            return Err(StoreError::Duplicate(document.id().clone()));
        }
        if inner.by_anchor.contains_key(document.anchor_tx_id()) {
            return Err(StoreError::DuplicateAnchor(
                document.anchor_tx_id().to_string(),
            ));
        }

        let position = inner.documents.len();
        inner.by_id.insert(document.id().clone(), position);
        inner
            .by_anchor
            .insert(document.anchor_tx_id().to_string(), position);
        inner.documents.push(Arc::clone(&document));

        tracing::debug!(id = %document.id(), position, "appended document");
        Ok(document)
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Arc<Document>>> {
        let inner = self.read();
        Ok(inner
            .by_id
            .get(id)
            .and_then(|&pos| inner.documents.get(pos))
            .cloned())
    }

    async fn find_by_anchor(&self, tx_id: &str) -> Result<Option<Arc<Document>>> {
        let inner = self.read();
        Ok(inner
            .by_anchor
            .get(tx_id)
            .and_then(|&pos| inner.documents.get(pos))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Arc<Document>>> {
        Ok(self.read().documents.clone())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Arc<Document>>> {
        Ok(self
            .read()
            .documents
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read().documents.len())
    }
}
