//! Property-based tests for the Relevance Scorer
//!
//! Tests invariants:
//! - Each term lies in [0, 33.33]; the total in [0, 100]
//! - No lexical overlap means a zero lexical term
//! - Rating term is monotone in mean rating at a fixed vote count
//! - Weight term is linear on 0..=10
//! - Queries over 10 tokens are an explicit error
//! - Re-rank output is sorted by total descending

use proptest::prelude::*;

use crate::core::preprocess::normalizer::TextNormalizer;
use crate::core::ranking::{rating_term, rerank, weight_term, RelevanceScorer, ScoringPlan, TERM_CAP};
use crate::core::search::error::SearchError;
use crate::core::search::models::{RatingCounts, ResolvedDocument};

const EPSILON: f64 = 1e-9;

// ============================================================================
// Strategies
// ============================================================================

/// Lower-case words over a small alphabet so overlaps actually happen
fn arb_word() -> impl Strategy<Value = String> {
    "[a-e]{2,4}"
}

/// Query of 1..=10 words
fn arb_query() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_word(), 1..=10).prop_map(|w| w.join(" "))
}

fn arb_field() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_word(), 0..6).prop_map(|w| w.join(" "))
}

fn arb_ratings() -> impl Strategy<Value = RatingCounts> {
    proptest::array::uniform5(0u64..500).prop_map(RatingCounts::new)
}

/// Resolved document with in-domain values
fn arb_document() -> impl Strategy<Value = ResolvedDocument> {
    (
        (arb_field(), arb_field(), arb_field()),
        (arb_field(), arb_field(), arb_field()),
        arb_ratings(),
        proptest::option::of(0.0f64..=10.0),
    )
        .prop_map(|((title, at, aa), (loc, ing, kw), ratings, weight)| ResolvedDocument {
            id: None,
            title,
            associated_title: at,
            associated_address: aa,
            locality: loc,
            ingredient_text: ing,
            keyword_text: kw,
            rating_counts: ratings,
            weight,
        })
}

fn plan(text: &str) -> ScoringPlan {
    ScoringPlan::from_text(text, &TextNormalizer::default()).expect("query within table domain")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: every term and the total stay within bounds
    #[test]
    fn prop_scores_bounded(query in arb_query(), doc in arb_document()) {
        let b = RelevanceScorer::default().explain(&plan(&query), &doc);

        for term in [b.lexical, b.rating, b.weight] {
            prop_assert!((0.0..=TERM_CAP).contains(&term), "term {} out of range", term);
        }
        prop_assert!(b.total >= 0.0 && b.total <= 100.0);
        prop_assert!((b.total - (b.lexical + b.rating + b.weight)).abs() < EPSILON);
    }

    /// Property: a document sharing no characters with the query gets no
    /// lexical credit
    #[test]
    fn prop_no_overlap_zero_lexical(query in arb_query(), words in proptest::collection::vec("[v-z]{2,4}", 0..8)) {
        let doc = ResolvedDocument {
            title: words.join(" "),
            keyword_text: words.join(","),
            ..Default::default()
        };
        let b = RelevanceScorer::default().explain(&plan(&query), &doc);
        prop_assert_eq!(b.lexical, 0.0);
        prop_assert_eq!(b.lexical_raw, 0.0);
    }

    /// Property: shifting one vote to a higher star level never lowers the
    /// rating term
    #[test]
    fn prop_rating_monotone(ratings in arb_ratings(), level in 0usize..4) {
        prop_assume!(ratings.0[level] > 0);

        let mut better = ratings;
        better.0[level] -= 1;
        better.0[level + 1] += 1;

        prop_assert!(rating_term(&better) + EPSILON >= rating_term(&ratings));
    }

    /// Property: weight term is linear on the 0..=10 scale
    #[test]
    fn prop_weight_linear(weight in 0.0f64..=10.0) {
        let term = weight_term(Some(weight));
        prop_assert!((term - weight / 10.0 * TERM_CAP).abs() < EPSILON);
    }

    /// Property: more than 10 query tokens is an explicit error
    #[test]
    fn prop_long_queries_rejected(words in proptest::collection::vec("[f-h]{3,5}", 11..20)) {
        let result = ScoringPlan::from_text(&words.join(" "), &TextNormalizer::default());
        let is_too_long = matches!(result, Err(SearchError::QueryTooLong { .. }));
        prop_assert!(is_too_long);
    }

    /// Property: re-rank output is ordered by total descending
    #[test]
    fn prop_rerank_sorted(query in arb_query(), docs in proptest::collection::vec(arb_document(), 0..12)) {
        let ranked = rerank(&plan(&query), &RelevanceScorer::default(), docs.clone());

        prop_assert_eq!(ranked.len(), docs.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].total() >= pair[1].total());
        }
    }

    /// Property: scoring is deterministic
    #[test]
    fn prop_score_deterministic(query in arb_query(), doc in arb_document()) {
        let scorer = RelevanceScorer::default();
        let plan = plan(&query);
        prop_assert_eq!(scorer.explain(&plan, &doc), scorer.explain(&plan, &doc));
    }
}
