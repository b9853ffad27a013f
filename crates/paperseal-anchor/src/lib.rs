//! # Paperseal Anchor
//!
//! The contract between the pipeline and the external ledger.
//!
//! ## Overview
//!
//! A processed document is anchored by submitting an [`AnchorRequest`]
//! (its scored sections and a timestamp) to a [`Ledger`], which answers
//! with an [`AnchorReceipt`]: an opaque [`TxId`] plus the payload the ledger
//! actually recorded under it.
//!
//! ## Key Properties
//!
//! - **Explicit payload**: the request is a typed, serializable structure
//! - **Content-addressed**: every request carries the address of its
//!   canonical payload bytes
//! - **Idempotent**: a repeated [`IdempotencyKey`] returns the original
//!   receipt, so a caller's retry never anchors twice and can rebuild the
//!   document from what was anchored

pub mod error;
pub mod ledger;
pub mod request;

pub use error::{AnchorError, Result};
pub use ledger::memory::{MemoryLedger, MemoryLedgerConfig};
pub use ledger::Ledger;
pub use request::{AnchorReceipt, AnchorRequest, AnchoredSection, IdempotencyKey, TxId};
