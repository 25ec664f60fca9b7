pub mod logging;

// Tokenization, stopwords, synonyms and phrase variants
pub mod preprocess;

// Request model and query compilation
pub mod search;

// Relevance scoring and client-side re-rank
pub mod ranking;
