//! Phrase Variant Generation
//!
//! For a token sequence of length n the variant list is the full phrase
//! followed by every "drop exactly one token" phrase, in the order of the
//! dropped position (first token dropped first). For n = 1 only the phrase
//! itself is produced. Duplicates are kept: the scorer pairs this list with a
//! normalization constant keyed by n, so its shape must depend on n alone.

/// Ordered list of phrase variants for one query.
///
/// The list is built once per request and handed to whoever needs it; no
/// state is shared between requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhraseVariants {
    variants: Vec<String>,
    token_count: usize,
}

impl PhraseVariants {
    /// Build the variant list for `tokens`.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            variants: phrase_variants(tokens),
            token_count: tokens.len(),
        }
    }

    /// Token count of the query the list was built from.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn as_slice(&self) -> &[String] {
        &self.variants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.variants
    }
}

impl<'a> IntoIterator for &'a PhraseVariants {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

/// Full phrase plus every drop-one variant.
///
/// Returns an empty list for an empty sequence; never emits an empty string.
pub fn phrase_variants<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let words: Vec<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect();

    if words.is_empty() {
        return Vec::new();
    }

    let mut variants = Vec::with_capacity(words.len() + 1);
    variants.push(words.join(" "));

    if words.len() > 1 {
        variants.extend(drop_one(&words).map(|kept| kept.join(" ")));
    }

    variants
}

/// Every (n-1)-subsequence of `words`, original relative order kept,
/// yielded by ascending dropped position.
fn drop_one<'a>(words: &'a [&'a str]) -> impl Iterator<Item = Vec<&'a str>> + 'a {
    (0..words.len()).map(move |skip| {
        words
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, w)| *w)
            .collect()
    })
}
