//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the hashing, payload, scoring and segmentation
//! behaviour so that any reimplementation can be checked against the same
//! expected outputs.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use paperseal_core::{
    aggregate_scores, jaccard, payload_address, payload_bytes, ContentHash, Corpus, FixedClock,
    Fingerprinter, IdSource, RawSection, SectionKind, SectionSegmenter, SimilarityScorer, Status,
    FLAG_THRESHOLD,
};

/// A content hash vector.
#[derive(Debug, Clone)]
pub struct HashVector {
    pub name: &'static str,
    pub content: &'static str,
    pub expected_hex: &'static str,
}

/// An anchor payload vector.
///
/// Two sections fingerprinted at `FINGERPRINT_MILLIS` with token suffixes
/// `01..01` and `02..02`, scored against a one-text corpus, then encoded
/// with `timestamp`.
#[derive(Debug, Clone)]
pub struct PayloadVector {
    pub name: &'static str,
    pub sections: &'static [(&'static str, SectionKind, &'static str)],
    pub corpus: &'static str,
    pub timestamp: i64,
    pub expected_bytes_hex: &'static str,
    pub expected_address_hex: &'static str,
}

/// Clock reading used for every section of a payload vector.
pub const FINGERPRINT_MILLIS: i64 = 1_700_000_000_000;

/// A similarity vector.
#[derive(Debug, Clone)]
pub struct SimilarityVector {
    pub name: &'static str,
    pub a: &'static str,
    pub b: &'static str,
    pub expected: u8,
}

/// An aggregation vector.
#[derive(Debug, Clone)]
pub struct AggregateVector {
    pub name: &'static str,
    pub scores: &'static [u8],
    pub expected_overall: u8,
    pub expected_status: Status,
}

/// A segmentation vector.
#[derive(Debug, Clone)]
pub struct SegmentVector {
    pub name: &'static str,
    pub text: &'static str,
    pub expected_kinds: &'static [SectionKind],
}

/// Get all similarity vectors.
pub fn similarity_vectors() -> Vec<SimilarityVector> {
    vec![
        SimilarityVector {
            name: "half overlap",
            a: "alpha beta gamma",
            b: "alpha beta delta",
            expected: 50,
        },
        SimilarityVector {
            name: "identical",
            a: "the quick brown fox",
            b: "the quick brown fox",
            expected: 100,
        },
        SimilarityVector {
            name: "case and duplicates folded",
            a: "Rust rust RUST safety",
            b: "rust Safety",
            expected: 100,
        },
        SimilarityVector {
            name: "disjoint",
            a: "one two",
            b: "three four",
            expected: 0,
        },
        SimilarityVector {
            name: "empty union",
            a: "",
            b: "",
            expected: 0,
        },
        SimilarityVector {
            name: "rounds half up",
            a: "a",
            b: "a b c d e f g h",
            expected: 13,
        },
    ]
}

/// Get all content hash vectors.
pub fn hash_vectors() -> Vec<HashVector> {
    vec![
        HashVector {
            name: "empty content",
            content: "",
            expected_hex: "eba1e5325189fad3851055c42d2d03ee76c12e1d448caf31b3a60d00106d96c4",
        },
        HashVector {
            name: "abstract line",
            content: "Abstract: a study of things",
            expected_hex: "5625c8a0ed6fd6d82e5b3a549bc429f78d2e235fbddc5abb84d73b580b7412bb",
        },
        HashVector {
            name: "conclusion line",
            content: "Conclusion: structured comparison finds overlap",
            expected_hex: "77b1d3f92b2e463c74b14e72185a9dd300a3ed25b26cc8a4080841361faf3363",
        },
    ]
}

/// Get all payload vectors.
pub fn payload_vectors() -> Vec<PayloadVector> {
    vec![PayloadVector {
        name: "two scored sections",
        sections: &[
            ("section-0", SectionKind::Abstract, "alpha beta gamma delta"),
            ("section-5", SectionKind::Conclusion, "epsilon zeta"),
        ],
        corpus: "alpha beta gamma",
        timestamp: 1_700_000_000_500,
        expected_bytes_hex: concat!(
            "a30000011b0000018bcfe569f40282a6006973656374696f6e2d3001686162737472",
            "6163740278225349502d313730303030303030303030302d303130313031303130",
            "31303130313031035820012b0b9ed041fa51c8b3d45950fc4ba21cc555b9c91f3f",
            "3819459ee4c5704d65041b0000018bcfe5680005184ba6006973656374696f6e2d",
            "35016a636f6e636c7573696f6e0278225349502d313730303030303030303030302d",
            "30323032303230323032303230323032035820b0478b337ee618d962b2db03b6a5",
            "65f300d00416225b386a040ee9157084fd17041b0000018bcfe568000500",
        ),
        expected_address_hex: "2b2ddf69fc442fca815c9c2cd9d726b6f1880e31309fe877bbfaf0efdb92d616",
    }]
}

/// Fills the n-th identifier with the byte `n`, starting at 1.
struct CountingIds(AtomicU8);

impl IdSource for CountingIds {
    fn fill(&self, buf: &mut [u8]) {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        buf.fill(n);
    }
}

/// Encode a payload vector, returning `(bytes_hex, address_hex)`.
pub fn encode_payload_vector(v: &PayloadVector) -> Option<(String, String)> {
    let fingerprinter = Fingerprinter::new(
        Arc::new(FixedClock::new(FINGERPRINT_MILLIS)),
        Arc::new(CountingIds(AtomicU8::new(0))),
    );
    let raw = v
        .sections
        .iter()
        .map(|&(id, kind, content)| RawSection {
            id: id.to_string(),
            kind,
            title: kind.title(),
            content: content.to_string(),
        })
        .collect();
    let mut sections = fingerprinter.fingerprint_all(raw);
    SimilarityScorer::new(Corpus::new(vec![v.corpus.to_string()]))
        .score_all(&mut sections)
        .ok()?;

    Some((
        hex::encode(payload_bytes(&sections, v.timestamp)),
        payload_address(&sections, v.timestamp).to_hex(),
    ))
}

/// Get all aggregation vectors.
pub fn aggregate_vectors() -> Vec<AggregateVector> {
    vec![
        AggregateVector {
            name: "exactly at threshold",
            scores: &[80, 60],
            expected_overall: 70,
            expected_status: Status::Verified,
        },
        AggregateVector {
            name: "half rounds up over threshold",
            scores: &[80, 65],
            expected_overall: 73,
            expected_status: Status::Flagged,
        },
        AggregateVector {
            name: "single section",
            scores: &[71],
            expected_overall: 71,
            expected_status: Status::Flagged,
        },
        AggregateVector {
            name: "all original",
            scores: &[0, 0, 0],
            expected_overall: 0,
            expected_status: Status::Verified,
        },
    ]
}

/// Get all segmentation vectors.
pub fn segment_vectors() -> Vec<SegmentVector> {
    vec![
        SegmentVector {
            name: "abstract introduction conclusion",
            text: "Abstract: we describe a method for measuring overlap in written prose. \
                   Introduction: prior approaches compare whole documents without structure. \
                   Conclusion: structured comparison finds overlap that whole-document checks miss.",
            expected_kinds: &[
                SectionKind::Abstract,
                SectionKind::Introduction,
                SectionKind::Conclusion,
            ],
        },
        SegmentVector {
            name: "short abstract dropped",
            text: "Abstract: brief. \
                   Methodology: we sampled two hundred submissions and compared every pair of them.",
            expected_kinds: &[SectionKind::Methodology],
        },
        SegmentVector {
            name: "no headings",
            text: "a plain note with no structure whatsoever, long enough to matter but unlabelled",
            expected_kinds: &[],
        },
    ]
}

/// Check every vector, returning `(name, passed)` pairs.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let mut results = Vec::new();

    for v in hash_vectors() {
        let passed = ContentHash::of_content(v.content).to_hex() == v.expected_hex;
        results.push((v.name.to_string(), passed));
    }

    for v in payload_vectors() {
        let passed = encode_payload_vector(&v).is_some_and(|(bytes, address)| {
            bytes == v.expected_bytes_hex && address == v.expected_address_hex
        });
        results.push((v.name.to_string(), passed));
    }

    for v in similarity_vectors() {
        results.push((v.name.to_string(), jaccard(v.a, v.b) == v.expected));
    }

    for v in aggregate_vectors() {
        let passed = match aggregate_scores(v.scores) {
            Ok(overall) => {
                overall == v.expected_overall
                    && Status::from_similarity(overall, FLAG_THRESHOLD) == v.expected_status
            }
            Err(_) => false,
        };
        results.push((v.name.to_string(), passed));
    }

    let segmenter = SectionSegmenter::default();
    for v in segment_vectors() {
        let kinds: Vec<SectionKind> = segmenter.segment(v.text).iter().map(|s| s.kind).collect();
        results.push((v.name.to_string(), kinds == v.expected_kinds));
    }

    results
}
