//! Proptest generators for property-based testing.

use proptest::prelude::*;

use paperseal_core::SectionKind;

/// A lowercase word with no section keyword inside it.
pub fn word() -> impl Strategy<Value = String> {
    "[b-z]{1,9}".prop_filter("contains a section keyword", |w| {
        SectionKind::ALL.iter().all(|k| !w.contains(k.keyword()))
    })
}

/// Whitespace-separated words, at least one.
pub fn words(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..=max.max(1)).prop_map(|w| w.join(" "))
}

/// A section body of at least `min_chars` characters, free of keywords.
pub fn section_body(min_chars: usize) -> impl Strategy<Value = String> {
    words(40).prop_map(move |mut body| {
        while body.chars().count() < min_chars {
            body.push_str(" filler");
        }
        body
    })
}

/// Any of the six canonical kinds.
pub fn section_kind() -> impl Strategy<Value = SectionKind> {
    prop::sample::select(SectionKind::ALL.to_vec())
}

/// A strictly increasing subset of canonical kinds, at least one.
pub fn kind_subset() -> impl Strategy<Value = Vec<SectionKind>> {
    prop::sample::subsequence(SectionKind::ALL.to_vec(), 1..=SectionKind::ALL.len())
}

/// A document whose headings follow canonical order.
///
/// Returns the expected kinds alongside the text.
pub fn structured_document() -> impl Strategy<Value = (Vec<SectionKind>, String)> {
    kind_subset().prop_flat_map(|kinds| {
        let n = kinds.len();
        (
            Just(kinds),
            prop::collection::vec(section_body(60), n..=n),
        )
            .prop_map(|(kinds, bodies)| {
                let text = kinds
                    .iter()
                    .zip(bodies.iter())
                    .map(|(kind, body)| format!("{}: {}", kind.keyword().to_uppercase(), body))
                    .collect::<Vec<_>>()
                    .join("\n");
                (kinds, text)
            })
    })
}

/// A similarity score.
pub fn score() -> impl Strategy<Value = u8> {
    0u8..=100
}
