//! # Paperseal
//!
//! Verifiable records for academic text submissions.
//!
//! ## Overview
//!
//! A submission flows through a linear pipeline:
//!
//! ```text
//! raw text -> segment -> fingerprint -> score -> anchor -> append
//! ```
//!
//! - **Segment**: split the text into canonical sections
//! - **Fingerprint**: give each section a unique token id and content hash
//! - **Score**: Jaccard similarity of each section against a reference corpus
//! - **Anchor**: submit the scored sections to an external ledger
//! - **Append**: publish the finished [`Document`] to the result collection
//!
//! A failure at any stage aborts the run and nothing is published.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paperseal::{Pipeline, PipelineConfig, Upload};
//! use paperseal::anchor::MemoryLedger;
//! use paperseal::core::Corpus;
//! use paperseal::store::MemoryStore;
//!
//! async fn example() {
//!     let pipeline = Pipeline::new(
//!         MemoryStore::new(),
//!         MemoryLedger::default(),
//!         Corpus::default_references(),
//!         PipelineConfig::default(),
//!     );
//!
//!     let upload = Upload::new("paper.txt", "Abstract: ...");
//!     match pipeline.process(upload).await {
//!         Ok(doc) => println!("{} anchored as {}", doc.title(), doc.anchor_tx_id()),
//!         Err(e) => eprintln!("failed at {}: {}", e.stage(), e),
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `paperseal::core` - Segmentation, fingerprinting, scoring
//! - `paperseal::store` - The result collection
//! - `paperseal::anchor` - The ledger contract

pub mod config;
pub mod error;
pub mod pipeline;
pub mod upload;

// Re-export component crates
pub use paperseal_anchor as anchor;
pub use paperseal_core as core;
pub use paperseal_store as store;

// Re-export main types for convenience
pub use config::PipelineConfig;
pub use error::{PipelineError, Result, Stage};
pub use pipeline::Pipeline;
pub use upload::Upload;

// Re-export commonly used core types
pub use paperseal_core::{
    Corpus, Document, DocumentId, Section, SectionKind, SegmentationFallback, Status, TokenId,
};
