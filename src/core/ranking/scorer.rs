//! Relevance Scorer
//!
//! Pure function of (query phrase variants, one resolved document) to a
//! total score. Scoring never fails: missing document fields degrade their
//! term toward 0. The only fallible step is building the [`ScoringPlan`],
//! which rejects queries longer than the normalization table covers.

use serde::{Deserialize, Serialize};

use super::lexical::{
    document_segments, lexical_overlap, normalization_constant, normalize_raw, PreparedVariant,
    VariantContribution,
};
use super::wilson::rating_term;
use super::{clamp_term, TERM_CAP};
use crate::core::preprocess::combinations::PhraseVariants;
use crate::core::preprocess::normalizer::TextNormalizer;
use crate::core::preprocess::synonyms::SynonymMap;
use crate::core::search::error::Result;
use crate::core::search::models::ResolvedDocument;

// ============================================================================
// Types
// ============================================================================

/// Query-side scoring inputs, computed once per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringPlan {
    variants: Vec<PreparedVariant>,
    token_count: usize,
    /// M(n); `None` when the query has no tokens left after normalization
    normalization: Option<f64>,
}

/// Score breakdown for transparency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Lexical overlap before normalization
    pub lexical_raw: f64,
    /// Lexical term in [0, 33.33]
    pub lexical: f64,
    /// Rating term in [0, 33.33]
    pub rating: f64,
    /// Weight term in [0, 33.33]
    pub weight: f64,
    /// Sum of the three terms
    pub total: f64,
    /// Per-variant lexical contributions, in variant order
    pub matches: Vec<VariantContribution>,
}

// ============================================================================
// Scoring Plan
// ============================================================================

impl ScoringPlan {
    /// Plan for an already generated variant list.
    ///
    /// Fails with `QueryTooLong` when the token count exceeds the
    /// normalization table.
    pub fn new(variants: &PhraseVariants) -> Result<Self> {
        let token_count = variants.token_count();
        let normalization = match token_count {
            0 => None,
            n => Some(normalization_constant(n)?),
        };

        Ok(Self {
            variants: variants.iter().map(|v| PreparedVariant::new(v)).collect(),
            token_count,
            normalization,
        })
    }

    /// Normalize `text` and build its plan.
    pub fn from_text(text: &str, normalizer: &TextNormalizer) -> Result<Self> {
        let normalized = normalizer.normalize(text);
        Self::new(&PhraseVariants::from_tokens(&normalized.tokens))
    }

    /// Lower-cased variants, in generation order.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.text.as_str())
    }

    pub fn prepared_variants(&self) -> &[PreparedVariant] {
        &self.variants
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn normalization(&self) -> Option<f64> {
        self.normalization
    }

    /// True when the lexical term is always 0.
    pub fn is_empty(&self) -> bool {
        self.normalization.is_none() || self.variants.is_empty()
    }
}

// ============================================================================
// Scorer
// ============================================================================

/// Scores resolved documents against a [`ScoringPlan`].
///
/// Holds the synonym table applied to document text; otherwise stateless and
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    synonyms: SynonymMap,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(SynonymMap::with_defaults())
    }
}

impl RelevanceScorer {
    pub fn new(synonyms: SynonymMap) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymMap {
        &self.synonyms
    }

    /// Total score for one document.
    pub fn score(&self, plan: &ScoringPlan, document: &ResolvedDocument) -> f64 {
        self.explain(plan, document).total
    }

    /// Full breakdown for one document.
    pub fn explain(&self, plan: &ScoringPlan, document: &ResolvedDocument) -> ScoreBreakdown {
        let (lexical_raw, lexical, matches) = match plan.normalization {
            Some(norm) if !plan.variants.is_empty() => {
                let segments = document_segments(&document.text_fields(), &self.synonyms);
                let (raw, matches) = lexical_overlap(&plan.variants, &segments);
                (raw, normalize_raw(raw, norm), matches)
            }
            _ => (0.0, 0.0, Vec::new()),
        };

        let rating = rating_term(&document.rating_counts);
        let weight = weight_term(document.weight);

        ScoreBreakdown {
            lexical_raw,
            lexical,
            rating,
            weight,
            total: lexical + rating + weight,
            matches,
        }
    }
}

/// Weight term: linear in the 0..=10 manual weight. Absent weight scores 0.
pub fn weight_term(weight: Option<f64>) -> f64 {
    match weight {
        Some(w) => clamp_term(w / 10.0 * TERM_CAP),
        None => 0.0,
    }
}
