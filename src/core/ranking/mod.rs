//! Relevance Ranking Module
//!
//! Per-document relevance score used as the primary sort key whenever free
//! text drives a search. Three terms, each rescaled into [0, 33.33]:
//! - lexical overlap between the query's phrase variants and the document text
//! - Wilson lower bound over the document's star ratings
//! - the document's manual weight
//!
//! The total is their sum, so in-domain scores lie in [0, 100].

pub mod lexical;
pub mod rerank;
pub mod scorer;
pub mod wilson;

pub use lexical::{
    document_segments, normalization_constant, PreparedVariant, VariantContribution,
    MAX_QUERY_TOKENS, NORMALIZATION_TABLE,
};
pub use rerank::{documents_from_hits, rerank, RankedDocument};
pub use scorer::{weight_term, RelevanceScorer, ScoreBreakdown, ScoringPlan};
pub use wilson::{rating_term, wilson_lower_bound};

/// Upper bound of each scoring term
pub const TERM_CAP: f64 = 33.33;

/// Clamp a term into [0, TERM_CAP]. Non-finite values count as 0.
pub fn clamp_term(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, TERM_CAP)
}
