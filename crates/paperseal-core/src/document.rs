//! Document: the fully assembled record of one processed upload.
//!
//! Documents are only produced by [`DocumentBuilder::build`], which refuses
//! to emit a record with any field missing. Fields are read-only, so the
//! overall similarity and status always agree with the sections.

use serde::{Deserialize, Serialize};

use crate::crypto::ContentAddress;
use crate::error::{CoreError, Result};
use crate::section::Section;
use crate::similarity::aggregate;
use crate::types::DocumentId;

/// Default similarity above which a document is flagged.
pub const FLAG_THRESHOLD: u8 = 70;

/// Verdict derived from the overall similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Verified,
    Flagged,
}

impl Status {
    /// `Flagged` iff `overall > threshold`.
    pub fn from_similarity(overall: u8, threshold: u8) -> Self {
        if overall > threshold {
            Self::Flagged
        } else {
            Self::Verified
        }
    }
}

/// Title of a document: the filename without its final extension.
///
/// Only the last path component is considered. A dot that starts or ends
/// that component is not an extension separator.
pub fn title_from_filename(filename: &str) -> String {
    let start = filename.rfind('/').map_or(0, |slash| slash + 1);
    match filename[start..].rfind('.') {
        Some(pos) if pos > 0 && start + pos + 1 < filename.len() => {
            filename[..start + pos].to_string()
        }
        _ => filename.to_string(),
    }
}

/// A processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: DocumentId,
    title: String,
    authors: Vec<String>,
    institution: String,
    upload_date: i64,
    sections: Vec<Section>,
    overall_similarity: u8,
    anchor_tx_id: String,
    content_address: ContentAddress,
    status: Status,
}

impl Document {
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// Unix milliseconds.
    pub fn upload_date(&self) -> i64 {
        self.upload_date
    }

    /// Scored sections in canonical order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Rounded mean of the section scores.
    pub fn overall_similarity(&self) -> u8 {
        self.overall_similarity
    }

    /// Transaction id returned by the ledger.
    pub fn anchor_tx_id(&self) -> &str {
        &self.anchor_tx_id
    }

    /// Address of the anchored payload.
    pub fn content_address(&self) -> &ContentAddress {
        &self.content_address
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// `100 - overall_similarity`.
    pub fn uniqueness(&self) -> u8 {
        100 - self.overall_similarity.min(100)
    }

    pub fn is_flagged(&self) -> bool {
        self.status == Status::Flagged
    }
}

/// Builder for [`Document`].
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    id: DocumentId,
    title: String,
    upload_date: i64,
    authors: Vec<String>,
    institution: String,
    sections: Vec<Section>,
    anchor_tx_id: Option<String>,
    content_address: Option<ContentAddress>,
    flag_threshold: u8,
}

impl DocumentBuilder {
    /// Start building a document.
    pub fn new(id: DocumentId, filename: &str, upload_date: i64) -> Self {
        Self {
            id,
            title: title_from_filename(filename),
            upload_date,
            authors: Vec::new(),
            institution: String::new(),
            sections: Vec::new(),
            anchor_tx_id: None,
            content_address: None,
            flag_threshold: FLAG_THRESHOLD,
        }
    }

    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    /// Set the scored sections, in segmentation order.
    pub fn sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn anchor_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.anchor_tx_id = Some(tx_id.into());
        self
    }

    pub fn content_address(mut self, address: ContentAddress) -> Self {
        self.content_address = Some(address);
        self
    }

    pub fn flag_threshold(mut self, threshold: u8) -> Self {
        self.flag_threshold = threshold;
        self
    }

    /// Assemble the document.
    ///
    /// Overall similarity and status are derived here from the sections, so
    /// they can never disagree with them.
    pub fn build(self) -> Result<Document> {
        let anchor_tx_id = self
            .anchor_tx_id
            .ok_or(CoreError::MissingField("anchor_tx_id"))?;
        let content_address = self
            .content_address
            .ok_or(CoreError::MissingField("content_address"))?;

        let overall_similarity = aggregate(&self.sections)?;
        let status = Status::from_similarity(overall_similarity, self.flag_threshold);

        Ok(Document {
            id: self.id,
            title: self.title,
            authors: self.authors,
            institution: self.institution,
            upload_date: self.upload_date,
            sections: self.sections,
            overall_similarity,
            anchor_tx_id,
            content_address,
            status,
        })
    }
}
