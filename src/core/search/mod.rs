//! Search Query Compilation
//!
//! Request model, compiled query tree and its wire format, filter and sort
//! assembly, and the engine-side scoring script.

pub mod compiler;
pub mod error;
pub mod filters;
pub mod models;
pub mod query;
pub mod script;
pub mod sort;

pub use compiler::QueryCompiler;
pub use error::{Result, SearchError};
pub use models::{
    AggregationSpec, Pagination, RatingCounts, ResolvedDocument, ScoreFieldNames, SearchRequest,
    SourceFields,
};
pub use query::{BoolQuery, CompiledQuery, Fuzziness, QueryNode, RangeBounds, ResultPage};
pub use script::{ScoreScript, ScriptSource};
pub use sort::{OrderBy, SortClause, SortOrder};
