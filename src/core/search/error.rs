//! Search Error Types
//!
//! Error handling for query compilation and scoring.

use thiserror::Error;

use crate::config::ConfigError;

/// Search operation errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("query length unsupported: {tokens} tokens (maximum {max})")]
    QueryTooLong { tokens: usize, max: usize },

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Query execution failed: {0}")]
    ExecutionFailed(String),
}

impl SearchError {
    /// Whether the failure came from the engine rather than from compiling
    /// the request.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, SearchError::ExecutionFailed(_))
    }
}

impl From<ConfigError> for SearchError {
    fn from(err: ConfigError) -> Self {
        SearchError::ConfigError(err.to_string())
    }
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
