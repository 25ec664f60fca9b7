//! Text Normalizer
//!
//! Turns raw search text into the token sequence the rest of the pipeline
//! works on:
//! 1. Collapse whitespace runs and trim
//! 2. Split on whitespace
//! 3. Drop stopwords (exact, case-sensitive)
//! 4. Optionally fold synonyms to their canonical form
//!
//! Casing is preserved here; the scorer lower-cases on its own side.

use super::stopwords::is_stopword;
use super::synonyms::SynonymMap;

/// Result of normalizing one free-text request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    /// Whitespace-collapsed, trimmed input
    pub collapsed: String,
    /// Every whitespace-separated token of the input, stopwords included
    pub raw_tokens: Vec<String>,
    /// Stopword-filtered tokens as typed, before synonym folding
    pub filtered_tokens: Vec<String>,
    /// Stopword-filtered (and possibly synonym-folded) tokens
    pub tokens: Vec<String>,
}

impl NormalizedText {
    /// The filtered tokens joined with single spaces.
    pub fn phrase(&self) -> String {
        self.tokens.join(" ")
    }

    /// Number of filtered tokens (the `n` of the normalization table).
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// True when the input had no tokens at all.
    pub fn is_blank(&self) -> bool {
        self.raw_tokens.is_empty()
    }
}

/// Stateless normalizer; the synonym table is fixed at construction.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    synonyms: SynonymMap,
    fold_synonyms: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(SynonymMap::with_defaults())
    }
}

impl TextNormalizer {
    /// Normalizer that folds with the given synonym table.
    pub fn new(synonyms: SynonymMap) -> Self {
        Self {
            synonyms,
            fold_synonyms: true,
        }
    }

    /// Normalizer that only strips stopwords.
    pub fn without_synonyms() -> Self {
        Self {
            synonyms: SynonymMap::new(),
            fold_synonyms: false,
        }
    }

    /// The synonym table in use (empty when folding is off).
    pub fn synonyms(&self) -> &SynonymMap {
        &self.synonyms
    }

    pub fn folds_synonyms(&self) -> bool {
        self.fold_synonyms
    }

    /// Collapse whitespace runs to one space and trim both ends.
    pub fn collapse(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Normalize a free-text request.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let collapsed = Self::collapse(text);
        let raw_tokens: Vec<String> = collapsed
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let filtered_tokens: Vec<String> = raw_tokens
            .iter()
            .filter(|t| !is_stopword(t))
            .cloned()
            .collect();
        let tokens = if self.fold_synonyms {
            self.synonyms.fold_tokens(&filtered_tokens)
        } else {
            filtered_tokens.clone()
        };

        log::debug!(
            "Normalized '{}': {} raw tokens, {} kept",
            collapsed,
            raw_tokens.len(),
            tokens.len()
        );

        NormalizedText {
            collapsed,
            raw_tokens,
            filtered_tokens,
            tokens,
        }
    }
}
