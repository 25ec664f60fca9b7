//! Property-based tests for dishrank
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! Run all property tests:
//! ```sh
//! cargo test property --release
//! ```
//!
//! Run a specific property test module:
//! ```sh
//! cargo test property::phrase_variant_props --release
//! ```
//!
//! ## Test Modules
//!
//! - `phrase_variant_props`: Tests for tokenization and variant generation
//!   - n+1 variants for n > 1 tokens, exactly 1 for a single token
//!   - No empty-string variants
//!   - Deterministic given the same tokens
//!   - Full phrase first, then drop-one variants by dropped position
//!   - Normalized tokens never contain stopwords
//!
//! - `relevance_score_props`: Tests for the relevance scorer
//!   - Every term lies in [0, 33.33]; the total in [0, 100]
//!   - No overlap yields a zero lexical term
//!   - Rating term is monotone in mean rating at a fixed vote count
//!   - Weight term is linear on 0..=10
//!   - Queries longer than 10 tokens are rejected
//!   - Re-rank output is sorted by total descending
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod phrase_variant_props;
mod relevance_score_props;
