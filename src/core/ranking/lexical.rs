//! Lexical Overlap Term
//!
//! Compares the query's phrase variants with the document's designated text
//! fields. The fields are lower-cased, joined with `,` so field boundaries
//! survive, stripped of stopwords and synonym-folded, then split back into
//! segments. Per segment:
//! - a variant that occurs as a literal substring scores wordcount / 2
//! - a variant whose words all occur in the segment (any order) scores wordcount
//!
//! The raw sum is divided by a per-token-count constant M(n) and rescaled
//! into [0, 33.33].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{clamp_term, TERM_CAP};
use crate::core::preprocess::stopwords::is_stopword;
use crate::core::preprocess::synonyms::SynonymMap;
use crate::core::search::error::{Result, SearchError};

/// Field delimiter inside the joined document text
pub const FIELD_DELIMITER: char = ',';

/// Longest query (in tokens) the normalization table covers
pub const MAX_QUERY_TOKENS: usize = 10;

/// M(n) for n = 1..=10.
///
/// Hand-tuned divisors with no recorded derivation; kept verbatim.
pub const NORMALIZATION_TABLE: [f64; MAX_QUERY_TOKENS] = [
    9.0, 36.0, 102.0, 252.0, 685.0, 1320.0, 2940.0, 6504.0, 14319.0, 31380.0,
];

/// M(n). Fails for n outside 1..=10 rather than dividing by something
/// undefined.
pub fn normalization_constant(token_count: usize) -> Result<f64> {
    match token_count {
        0 => Err(SearchError::InvalidRequest(
            "no query tokens to normalize against".to_string(),
        )),
        n if n > MAX_QUERY_TOKENS => Err(SearchError::QueryTooLong {
            tokens: n,
            max: MAX_QUERY_TOKENS,
        }),
        n => Ok(NORMALIZATION_TABLE[n - 1]),
    }
}

/// Raw score rescaled into [0, 33.33].
pub fn normalize_raw(raw: f64, normalization: f64) -> f64 {
    if normalization <= 0.0 {
        return 0.0;
    }
    clamp_term(raw / normalization * TERM_CAP)
}

// ============================================================================
// Document side
// ============================================================================

/// Lower-cased, stopword-free, synonym-folded segments of the document's
/// text fields. Empty segments are dropped.
///
/// Words split on ASCII whitespace only (space, tab, CR, LF, form feed), the
/// same set Painless's `StringTokenizer` uses in the engine-side script.
pub fn document_segments<S: AsRef<str>>(fields: &[S], synonyms: &SynonymMap) -> Vec<String> {
    let joined = fields
        .iter()
        .map(|f| f.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string());

    joined
        .split(FIELD_DELIMITER)
        .filter_map(|segment| {
            let kept: Vec<&str> = segment
                .split_ascii_whitespace()
                .filter(|w| !is_stopword(w))
                .collect();
            let folded = synonyms.fold_tokens(kept);
            if folded.is_empty() {
                None
            } else {
                Some(folded.join(" "))
            }
        })
        .collect()
}

// ============================================================================
// Matching
// ============================================================================

/// How one variant contributed to the raw lexical score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantContribution {
    pub variant: String,
    pub word_count: usize,
    /// Segments containing the variant as a literal substring
    pub substring_hits: usize,
    /// Segments containing every word of the variant
    pub word_set_hits: usize,
}

impl VariantContribution {
    pub fn points(&self) -> f64 {
        let words = self.word_count as f64;
        self.substring_hits as f64 * words / 2.0 + self.word_set_hits as f64 * words
    }
}

/// A lower-cased variant with its words pre-split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedVariant {
    pub text: String,
    pub words: Vec<String>,
}

impl PreparedVariant {
    pub fn new(variant: &str) -> Self {
        let text = variant.to_lowercase();
        let words = text.split_whitespace().map(str::to_string).collect();
        Self { text, words }
    }
}

/// Score `variants` against `segments`; returns the raw sum and the
/// per-variant breakdown (in variant order).
pub fn lexical_overlap(
    variants: &[PreparedVariant],
    segments: &[String],
) -> (f64, Vec<VariantContribution>) {
    let mut contributions: Vec<VariantContribution> = variants
        .iter()
        .map(|v| VariantContribution {
            variant: v.text.clone(),
            word_count: v.words.len(),
            substring_hits: 0,
            word_set_hits: 0,
        })
        .collect();

    for segment in segments {
        let segment_words: HashSet<&str> = segment.split_whitespace().collect();

        for (variant, contribution) in variants.iter().zip(contributions.iter_mut()) {
            if variant.words.is_empty() {
                continue;
            }
            if segment.contains(variant.text.as_str()) {
                contribution.substring_hits += 1;
            }
            if variant
                .words
                .iter()
                .all(|w| segment_words.contains(w.as_str()))
            {
                contribution.word_set_hits += 1;
            }
        }
    }

    let raw = contributions.iter().map(VariantContribution::points).sum();
    (raw, contributions)
}
