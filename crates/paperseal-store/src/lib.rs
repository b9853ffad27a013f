//! # Paperseal Store
//!
//! The append-only result collection for processed documents.
//!
//! ## Key Types
//!
//! - [`DocumentStore`] - The async trait for the collection
//! - [`MemoryStore`] - In-memory, lock-protected implementation
//! - [`StoreStats`] - Collection summary for dashboards
//!
//! ## Design Notes
//!
//! - **Append-only**: no update or delete operations exist
//! - **One document per anchor**: a ledger transaction is published at most once
//! - **Whole documents only**: a document is visible in full or not at all
//! - **Short critical sections**: the lock is held only for the push itself

pub mod error;
pub mod memory;
pub mod stats;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use stats::{StoreStats, UniquenessBucket};
pub use traits::DocumentStore;
