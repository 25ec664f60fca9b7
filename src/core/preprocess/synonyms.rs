//! Synonym Folding
//!
//! One-way alias table: every alias folds to a single canonical form before
//! phrase variants are generated, so downstream matching only ever sees the
//! canonical spelling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Built-in aliases for the dish catalogue.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[("mcd", "mc donalds"), ("brgr", "burger")];

/// A single alias → canonical pair, as it appears in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub alias: String,
    pub canonical: String,
}

/// Alias → canonical lookup table.
///
/// Backed by a `BTreeMap` so iteration order (and therefore anything
/// serialized from it) is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymMap {
    entries: BTreeMap<String, String>,
}

impl SynonymMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the built-in aliases.
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for (alias, canonical) in DEFAULT_SYNONYMS {
            map.add(alias, canonical);
        }
        map
    }

    /// Register `alias` as folding to `canonical`. Later registrations win.
    ///
    /// Blank aliases or canonicals are ignored.
    pub fn add(&mut self, alias: &str, canonical: &str) {
        let alias = alias.trim();
        let canonical = canonical.split_whitespace().collect::<Vec<_>>().join(" ");
        if alias.is_empty() || canonical.is_empty() {
            return;
        }
        self.entries.insert(alias.to_string(), canonical);
    }

    /// Merge another table into this one; entries from `other` win.
    pub fn merge(&mut self, other: &SynonymMap) {
        for (alias, canonical) in &other.entries {
            self.entries.insert(alias.clone(), canonical.clone());
        }
    }

    /// Extend with config-provided entries.
    pub fn extend_entries<'a>(&mut self, entries: impl IntoIterator<Item = &'a SynonymEntry>) {
        for entry in entries {
            self.add(&entry.alias, &entry.canonical);
        }
    }

    /// Canonical form for `token`, if it is a known alias.
    pub fn canonical(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Fold a token sequence. Aliases are replaced by the words of their
    /// canonical form; other tokens pass through untouched.
    pub fn fold_tokens<I, S>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            match self.canonical(token) {
                Some(canonical) => folded.extend(canonical.split(' ').map(str::to_string)),
                None => folded.push(token.to_string()),
            }
        }
        folded
    }

    /// Iterate pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
