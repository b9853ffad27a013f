//! # Paperseal Testkit
//!
//! Testing utilities for Paperseal.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known hashes, payload bytes, scores and segmentations
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A deterministic pipeline and sample submissions
//! - **Scripted ledgers**: Ledgers that fail or stall on demand
//!
//! ## Golden Vectors
//!
//! ```rust
//! use paperseal_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed) in verify_all_vectors() {
//!     assert!(passed, "{name}");
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use paperseal_testkit::fixtures::{three_section_text, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let upload = fixture.upload("paper.txt", three_section_text());
//! ```

pub mod fixtures;
pub mod generators;
pub mod ledgers;
pub mod vectors;

pub use fixtures::{academic_text, three_section_text, TestFixture, DERIVATIVE, FIXTURE_EPOCH, PROSE};
pub use ledgers::{ScriptedLedger, Step};
pub use vectors::{
    aggregate_vectors, hash_vectors, payload_vectors, segment_vectors, similarity_vectors,
    verify_all_vectors,
};
