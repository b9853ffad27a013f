//! Upload: the raw input handed over by the upload collaborator.

use paperseal_anchor::IdempotencyKey;

use crate::error::Result;

/// A raw text submission.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content: String,
    pub authors: Vec<String>,
    pub institution: Option<String>,
    /// Reuse a key to make a retried submission idempotent at the ledger.
    pub idempotency_key: Option<IdempotencyKey>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            authors: Vec::new(),
            institution: None,
            idempotency_key: None,
        }
    }

    /// Decode raw bytes as UTF-8 text.
    pub fn from_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let content = String::from_utf8(bytes)?;
        Ok(Self::new(filename, content))
    }

    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    pub fn idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, Stage};

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = Upload::from_bytes("bad.txt", vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
        assert_eq!(err.stage(), Stage::Received);

        let ok = Upload::from_bytes("ok.txt", b"abstract".to_vec()).unwrap();
        assert_eq!(ok.content, "abstract");
    }
}
