//! dishrank - query compilation and relevance scoring for dish search
//!
//! Turns free-text dish searches into engine queries and ranks candidate
//! dishes by lexical overlap, rating confidence and manual weight.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub use crate::config::AppConfig;
pub use crate::core::ranking::{rerank, RelevanceScorer, ScoreBreakdown, ScoringPlan};
pub use crate::core::search::{CompiledQuery, QueryCompiler, SearchError, SearchRequest};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
