//! Query Preprocessing
//!
//! Lexical front half of the pipeline: stopword tables, synonym folding,
//! tokenization and phrase-variant generation.

pub mod combinations;
pub mod normalizer;
pub mod stopwords;
pub mod synonyms;

pub use combinations::{phrase_variants, PhraseVariants};
pub use normalizer::{NormalizedText, TextNormalizer};
pub use stopwords::is_stopword;
pub use synonyms::{SynonymEntry, SynonymMap};
