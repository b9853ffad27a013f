//! SimilarityScorer: Jaccard similarity against a reference corpus.
//!
//! Texts are case-folded and split on whitespace into word sets. The score
//! is `|A ∩ B| / |A ∪ B|` as a percentage, rounded half-up. An empty union
//! scores 0.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CoreError, Result};
use crate::section::Section;

/// Built-in reference texts used when no corpus is configured.
const DEFAULT_REFERENCES: [&str; 5] = [
    "Machine learning algorithms have revolutionized data analysis across multiple domains",
    "Deep learning networks demonstrate superior performance in pattern recognition tasks",
    "Natural language processing enables computers to understand human communication",
    "Blockchain technology provides decentralized and secure transaction mechanisms",
    "Artificial intelligence systems continue to advance at unprecedented rates",
];

/// Case-folded whitespace word set.
fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// `numerator / denominator * 100`, rounded half-up. Zero denominator is 0.
fn percent_half_up(numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    ((200 * numerator + denominator) / (2 * denominator)).min(100) as u8
}

fn jaccard_sets(a: &HashSet<String>, b: &HashSet<String>) -> u8 {
    let intersection = a.intersection(b).count() as u64;
    let union = (a.len() + b.len()) as u64 - intersection;
    percent_half_up(intersection, union)
}

/// Jaccard similarity of two texts as an integer percentage in `[0, 100]`.
pub fn jaccard(a: &str, b: &str) -> u8 {
    jaccard_sets(&word_set(a), &word_set(b))
}

/// Rounded half-up mean of section scores.
///
/// Fails on an empty slice or on any unscored section.
pub fn aggregate(sections: &[Section]) -> Result<u8> {
    if sections.is_empty() {
        return Err(CoreError::EmptyAggregation);
    }

    let mut sum = 0u64;
    for section in sections {
        let score = section
            .similarity()
            .ok_or_else(|| CoreError::Unscored(section.id().to_string()))?;
        sum += u64::from(score);
    }

    Ok(mean_half_up(sum, sections.len() as u64))
}

/// Rounded half-up mean of raw scores. Fails on an empty slice.
pub fn aggregate_scores(scores: &[u8]) -> Result<u8> {
    if scores.is_empty() {
        return Err(CoreError::EmptyAggregation);
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    Ok(mean_half_up(sum, scores.len() as u64))
}

fn mean_half_up(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)).min(100) as u8
}

/// A read-only, ordered collection of reference texts.
///
/// Word sets are computed once at construction and shared between clones.
#[derive(Debug, Clone)]
pub struct Corpus {
    texts: Arc<Vec<String>>,
    word_sets: Arc<Vec<HashSet<String>>>,
}

impl Corpus {
    pub fn new(texts: Vec<String>) -> Self {
        let word_sets = texts.iter().map(|t| word_set(t)).collect();
        Self {
            texts: Arc::new(texts),
            word_sets: Arc::new(word_sets),
        }
    }

    /// An empty corpus. Every section scores 0 against it.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The built-in five-sentence reference set.
    pub fn default_references() -> Self {
        Self::new(DEFAULT_REFERENCES.iter().map(|s| s.to_string()).collect())
    }

    /// Load a newline-delimited corpus. Blank lines are skipped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let texts: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        tracing::debug!(path = %path.as_ref().display(), entries = texts.len(), "loaded corpus");
        Ok(Self::new(texts))
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let texts: Vec<String> =
            serde_json::from_str(json).map_err(|e| CoreError::Corpus(e.to_string()))?;
        Ok(Self::new(texts))
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(String::as_str)
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::default_references()
    }
}

/// The best match of a text against a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Maximum Jaccard similarity over the corpus.
    pub similarity: u8,
    /// Index of the first reference reaching that maximum.
    pub closest: Option<usize>,
}

/// Scores sections against a shared corpus.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    corpus: Corpus,
}

impl SimilarityScorer {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Max similarity of `content` over the corpus. An empty corpus scores 0.
    pub fn score_text(&self, content: &str) -> Score {
        let words = word_set(content);
        let mut best = Score {
            similarity: 0,
            closest: None,
        };

        for (index, reference) in self.corpus.word_sets.iter().enumerate() {
            let similarity = jaccard_sets(&words, reference);
            if best.closest.is_none() || similarity > best.similarity {
                best = Score {
                    similarity,
                    closest: Some(index),
                };
            }
        }

        best
    }

    /// Score one section in place.
    pub fn score(&self, section: &mut Section) -> Result<Score> {
        let score = self.score_text(section.content());
        section.record_score(score.similarity, score.closest)?;
        Ok(score)
    }

    /// Score every section and return the aggregate.
    pub fn score_all(&self, sections: &mut [Section]) -> Result<u8> {
        for section in sections.iter_mut() {
            self.score(section)?;
        }
        aggregate(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Fingerprinter;
    use crate::segment::RawSection;
    use crate::types::SectionKind;
    use proptest::prelude::*;
    use std::io::Write;

    fn section(content: &str) -> Section {
        Fingerprinter::default().fingerprint(RawSection {
            id: "section-0".into(),
            kind: SectionKind::Abstract,
            title: "Abstract".into(),
            content: content.into(),
        })
    }

    #[test]
    fn test_half_overlap() {
        assert_eq!(jaccard("alpha beta gamma", "alpha beta delta"), 50);
    }

    #[test]
    fn test_case_and_whitespace_folding() {
        assert_eq!(jaccard("Alpha  BETA\n\tgamma", "gamma beta alpha alpha"), 100);
    }

    #[test]
    fn test_empty_union_is_zero() {
        assert_eq!(jaccard("", ""), 0);
        assert_eq!(jaccard("   ", "\n"), 0);
        assert_eq!(jaccard("word", ""), 0);
    }

    #[test]
    fn test_rounding_half_up() {
        // 1/8 = 12.5% -> 13
        assert_eq!(jaccard("a", "a b c d e f g h"), 13);
        // 2/3 = 66.67% -> 67
        assert_eq!(jaccard("a b", "a b c"), 67);
    }

    #[test]
    fn test_aggregate_examples() {
        assert_eq!(aggregate_scores(&[80, 60]).unwrap(), 70);
        assert_eq!(aggregate_scores(&[80, 65]).unwrap(), 73);
        assert_eq!(aggregate_scores(&[0]).unwrap(), 0);
        assert!(matches!(
            aggregate_scores(&[]),
            Err(CoreError::EmptyAggregation)
        ));
        assert!(matches!(aggregate(&[]), Err(CoreError::EmptyAggregation)));
    }

    #[test]
    fn test_aggregate_rejects_unscored() {
        let sections = vec![section("some words here")];
        assert!(matches!(aggregate(&sections), Err(CoreError::Unscored(_))));
    }

    #[test]
    fn test_scorer_picks_best_reference() {
        let corpus = Corpus::new(vec![
            "nothing in common".into(),
            "alpha beta delta".into(),
            "alpha beta gamma".into(),
        ]);
        let scorer = SimilarityScorer::new(corpus);

        let score = scorer.score_text("alpha beta gamma");
        assert_eq!(score.similarity, 100);
        assert_eq!(score.closest, Some(2));
    }

    #[test]
    fn test_scorer_ties_keep_first() {
        let corpus = Corpus::new(vec!["x y".into(), "x z".into()]);
        let score = SimilarityScorer::new(corpus).score_text("x");
        assert_eq!(score.similarity, 50);
        assert_eq!(score.closest, Some(0));
    }

    #[test]
    fn test_empty_corpus_scores_zero() {
        let scorer = SimilarityScorer::new(Corpus::empty());
        let score = scorer.score_text("anything at all");
        assert_eq!(score.similarity, 0);
        assert_eq!(score.closest, None);
    }

    #[test]
    fn test_score_all_sets_every_section() {
        let scorer = SimilarityScorer::new(Corpus::new(vec!["alpha beta".into()]));
        let mut sections = vec![section("alpha beta"), section("alpha gamma")];
        let overall = scorer.score_all(&mut sections).unwrap();

        assert_eq!(sections[0].similarity(), Some(100));
        assert_eq!(sections[1].similarity(), Some(33));
        // (100 + 33) / 2 = 66.5 -> 67
        assert_eq!(overall, 67);

        // Scoring twice is refused.
        assert!(scorer.score(&mut sections[0]).is_err());
    }

    #[test]
    fn test_default_corpus() {
        let corpus = Corpus::default();
        assert_eq!(corpus.len(), 5);
        let scorer = SimilarityScorer::new(corpus.clone());
        let score = scorer.score_text(corpus.get(3).unwrap());
        assert_eq!(score.similarity, 100);
        assert_eq!(score.closest, Some(3));
    }

    #[test]
    fn test_corpus_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first reference text").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  second reference text  ").unwrap();

        let corpus = Corpus::from_path(file.path()).unwrap();
        assert_eq!(corpus.texts(), &["first reference text", "second reference text"]);
    }

    #[test]
    fn test_corpus_from_json() {
        let corpus = Corpus::from_json(r#"["one two", "three"]"#).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(matches!(Corpus::from_json("{}"), Err(CoreError::Corpus(_))));
    }

    fn words() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z]{1,8}", 1..20).prop_map(|w| w.join(" "))
    }

    proptest! {
        #[test]
        fn prop_self_similarity(a in words()) {
            prop_assert_eq!(jaccard(&a, &a), 100);
        }

        #[test]
        fn prop_range_and_symmetry(a in words(), b in words()) {
            let s = jaccard(&a, &b);
            prop_assert!(s <= 100);
            prop_assert_eq!(s, jaccard(&b, &a));
        }

        #[test]
        fn prop_aggregate_is_rounded_mean(scores in prop::collection::vec(0u8..=100, 1..12)) {
            let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
            let expected = (mean + 0.5).floor() as u8;
            prop_assert_eq!(aggregate_scores(&scores).unwrap(), expected);
        }
    }
}
