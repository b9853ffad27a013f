//! Collection statistics for dashboards and analytics readers.

use std::sync::Arc;

use paperseal_core::{Document, Status};
use serde::{Deserialize, Serialize};

/// Uniqueness band of a document (`100 - overall_similarity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniquenessBucket {
    /// 90 to 100.
    Exceptional,
    /// 70 to 89.
    High,
    /// 50 to 69.
    Moderate,
    /// 30 to 49.
    Low,
    /// 0 to 29.
    Minimal,
}

impl UniquenessBucket {
    /// All buckets, highest uniqueness first.
    pub const ALL: [UniquenessBucket; 5] = [
        UniquenessBucket::Exceptional,
        UniquenessBucket::High,
        UniquenessBucket::Moderate,
        UniquenessBucket::Low,
        UniquenessBucket::Minimal,
    ];

    pub fn from_uniqueness(uniqueness: u8) -> Self {
        match uniqueness {
            90..=u8::MAX => Self::Exceptional,
            70..=89 => Self::High,
            50..=69 => Self::Moderate,
            30..=49 => Self::Low,
            _ => Self::Minimal,
        }
    }

    /// Display range, e.g. `"70-89%"`.
    pub fn range(self) -> &'static str {
        match self {
            Self::Exceptional => "90-100%",
            Self::High => "70-89%",
            Self::Moderate => "50-69%",
            Self::Low => "30-49%",
            Self::Minimal => "0-29%",
        }
    }
}

/// Summary of the document collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_documents: usize,
    pub total_sections: usize,
    /// Rounded mean uniqueness; `None` for an empty collection.
    pub average_uniqueness: Option<u8>,
    pub verified: usize,
    pub flagged: usize,
    /// Document counts per bucket, in [`UniquenessBucket::ALL`] order.
    pub buckets: [usize; 5],
}

impl StoreStats {
    pub fn compute(documents: &[Arc<Document>]) -> Self {
        let mut stats = StoreStats {
            total_documents: documents.len(),
            ..Default::default()
        };

        let mut uniqueness_sum = 0u64;
        for doc in documents {
            stats.total_sections += doc.sections().len();
            match doc.status() {
                Status::Verified => stats.verified += 1,
                Status::Flagged => stats.flagged += 1,
            }

            let uniqueness = doc.uniqueness();
            uniqueness_sum += u64::from(uniqueness);
            let bucket = UniquenessBucket::from_uniqueness(uniqueness);
            if let Some(pos) = UniquenessBucket::ALL.iter().position(|b| *b == bucket) {
                stats.buckets[pos] += 1;
            }
        }

        if !documents.is_empty() {
            let n = documents.len() as u64;
            stats.average_uniqueness = Some(((2 * uniqueness_sum + n) / (2 * n)) as u8);
        }

        stats
    }

    /// Count of documents in `bucket`.
    pub fn bucket(&self, bucket: UniquenessBucket) -> usize {
        UniquenessBucket::ALL
            .iter()
            .position(|b| *b == bucket)
            .map_or(0, |pos| self.buckets[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(UniquenessBucket::from_uniqueness(100), UniquenessBucket::Exceptional);
        assert_eq!(UniquenessBucket::from_uniqueness(90), UniquenessBucket::Exceptional);
        assert_eq!(UniquenessBucket::from_uniqueness(89), UniquenessBucket::High);
        assert_eq!(UniquenessBucket::from_uniqueness(50), UniquenessBucket::Moderate);
        assert_eq!(UniquenessBucket::from_uniqueness(30), UniquenessBucket::Low);
        assert_eq!(UniquenessBucket::from_uniqueness(29), UniquenessBucket::Minimal);
        assert_eq!(UniquenessBucket::from_uniqueness(0), UniquenessBucket::Minimal);
    }

    #[test]
    fn test_empty_stats() {
        let stats = StoreStats::compute(&[]);
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.average_uniqueness, None);
        assert_eq!(stats.buckets, [0; 5]);
    }
}
