//! Property-based tests for Phrase Variant generation
//!
//! Tests invariants:
//! - n+1 variants for n > 1 tokens, exactly 1 for n = 1
//! - No empty-string variants
//! - Deterministic output
//! - Canonical order: full phrase, then drop-one by dropped position
//! - Normalized tokens are never stopwords

use proptest::prelude::*;

use crate::core::preprocess::combinations::{phrase_variants, PhraseVariants};
use crate::core::preprocess::normalizer::TextNormalizer;
use crate::core::preprocess::stopwords::is_stopword;

// ============================================================================
// Strategies
// ============================================================================

/// Generate a single token (no whitespace)
fn arb_token() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,8}"
}

/// Generate a token sequence
fn arb_tokens(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_token(), min..max)
}

/// Generate free text with irregular whitespace, stopwords likely included
fn arb_free_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            arb_token(),
            Just("the".to_string()),
            Just("della".to_string()),
            Just("con".to_string()),
        ],
        0..8,
    )
    .prop_flat_map(|words| {
        let n = words.len();
        (
            Just(words),
            proptest::collection::vec(prop_oneof![Just(" "), Just("  "), Just("\t")], n),
        )
    })
    .prop_map(|(words, gaps)| {
        words
            .iter()
            .zip(gaps.iter())
            .map(|(w, g)| format!("{}{}", g, w))
            .collect::<String>()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: variant count depends on n alone
    #[test]
    fn prop_variant_count(tokens in arb_tokens(1, 12)) {
        let variants = phrase_variants(&tokens);
        let n = tokens.len();
        let expected = if n > 1 { n + 1 } else { 1 };
        prop_assert_eq!(variants.len(), expected);
    }

    /// Property: no variant is ever empty
    #[test]
    fn prop_no_empty_variants(tokens in arb_tokens(0, 12)) {
        for variant in phrase_variants(&tokens) {
            prop_assert!(!variant.is_empty(), "empty variant for {:?}", tokens);
        }
    }

    /// Property: identical input yields identical output and order
    #[test]
    fn prop_deterministic(tokens in arb_tokens(1, 12)) {
        let first = PhraseVariants::from_tokens(&tokens);
        let second = PhraseVariants::from_tokens(&tokens);
        prop_assert_eq!(first, second);
    }

    /// Property: full phrase first, then the phrase with token i removed at
    /// position i + 1
    #[test]
    fn prop_canonical_order(tokens in arb_tokens(2, 12)) {
        let variants = phrase_variants(&tokens);
        prop_assert_eq!(&variants[0], &tokens.join(" "));

        for skip in 0..tokens.len() {
            let expected: Vec<&str> = tokens
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, t)| t.as_str())
                .collect();
            prop_assert_eq!(&variants[skip + 1], &expected.join(" "));
        }
    }

    /// Property: every drop-one variant has exactly n-1 words
    #[test]
    fn prop_drop_one_word_counts(tokens in arb_tokens(2, 12)) {
        let variants = phrase_variants(&tokens);
        for variant in &variants[1..] {
            prop_assert_eq!(variant.split(' ').count(), tokens.len() - 1);
        }
    }

    /// Property: filtered tokens never contain stopwords; raw tokens keep
    /// every whitespace-separated word
    #[test]
    fn prop_normalizer_strips_stopwords(text in arb_free_text()) {
        let normalized = TextNormalizer::without_synonyms().normalize(&text);

        prop_assert_eq!(normalized.raw_tokens.len(), text.split_whitespace().count());
        for token in &normalized.tokens {
            prop_assert!(!is_stopword(token), "stopword {:?} survived", token);
        }
        prop_assert!(normalized.tokens.len() <= normalized.raw_tokens.len());
    }
}
