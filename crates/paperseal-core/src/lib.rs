//! # Paperseal Core
//!
//! Pure primitives for Paperseal: segmentation, fingerprinting and
//! similarity scoring of academic text.
//!
//! This crate contains no storage and no networking. Time and randomness
//! enter only through the [`Clock`] and [`IdSource`] traits.
//!
//! ## Key Types
//!
//! - [`SectionSegmenter`] - Splits raw text into canonical sections
//! - [`Fingerprinter`] - Assigns token ids, content hashes and timestamps
//! - [`SimilarityScorer`] - Jaccard scoring against a [`Corpus`]
//! - [`DocumentBuilder`] - Assembles a complete [`Document`]
//!
//! ## Canonicalization
//!
//! The anchor payload is encoded using deterministic CBOR. See [`canonical`].

pub mod canonical;
pub mod crypto;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod provider;
pub mod section;
pub mod segment;
pub mod similarity;
pub mod types;

pub use canonical::{payload_address, payload_bytes};
pub use crypto::{ContentAddress, ContentHash};
pub use document::{title_from_filename, Document, DocumentBuilder, Status, FLAG_THRESHOLD};
pub use error::{CoreError, Result};
pub use fingerprint::Fingerprinter;
pub use provider::{Clock, FixedClock, IdSource, RandomIds, SeededIds, SystemClock};
pub use section::{RiskLevel, Section};
pub use segment::{
    RawSection, SectionSegmenter, SegmentationFallback, SegmenterConfig, MIN_SECTION_CHARS,
};
pub use similarity::{aggregate, aggregate_scores, jaccard, Corpus, Score, SimilarityScorer};
pub use types::{DocumentId, SectionKind, TokenId};
