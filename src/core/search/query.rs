//! Compiled Query Model
//!
//! Boolean expression tree plus sort, window, aggregation and source
//! settings, serialized to Elasticsearch's query DSL.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::error::Result;
use super::models::SourceFields;
use super::sort::SortClause;
use crate::core::ranking::ScoringPlan;

// ============================================================================
// Query Nodes
// ============================================================================

/// Bounds for a `range` node. Unset bounds are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
    pub format: Option<String>,
}

/// `bool` node: clauses that must, should, or must not match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<QueryNode>,
    pub should: Vec<QueryNode>,
    pub must_not: Vec<QueryNode>,
}

impl BoolQuery {
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }
}

/// Fuzzy `match` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fuzziness {
    /// Edit distance, `AUTO` scales with term length
    pub distance: String,
    pub max_expansions: u32,
    /// Leading characters that must match exactly
    pub prefix_length: u32,
}

impl Default for Fuzziness {
    fn default() -> Self {
        Self {
            distance: "AUTO".to_string(),
            max_expansions: 1,
            prefix_length: 1,
        }
    }
}

/// One node of the compiled boolean tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    MatchAll {
        boost: f64,
    },
    MatchPhrasePrefix {
        field: String,
        query: String,
    },
    FuzzyMatch {
        field: String,
        query: String,
        fuzziness: Fuzziness,
    },
    Term {
        field: String,
        value: Value,
    },
    Terms {
        field: String,
        values: Vec<Value>,
    },
    Range {
        field: String,
        bounds: RangeBounds,
    },
    Bool(BoolQuery),
    /// Wraps a query with a random score function (`orderby=rand`)
    RandomScore(Box<QueryNode>),
    /// Pre-translated engine syntax, emitted verbatim
    Raw(Value),
}

impl QueryNode {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        QueryNode::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        QueryNode::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        QueryNode::Range {
            field: field.into(),
            bounds,
        }
    }

    pub fn must(clauses: Vec<QueryNode>) -> Self {
        QueryNode::Bool(BoolQuery {
            must: clauses,
            ..Default::default()
        })
    }

    pub fn should(clauses: Vec<QueryNode>) -> Self {
        QueryNode::Bool(BoolQuery {
            should: clauses,
            ..Default::default()
        })
    }

    /// Engine DSL for this node.
    pub fn to_json(&self) -> Value {
        match self {
            QueryNode::MatchAll { boost } => json!({ "match_all": { "boost": boost } }),
            QueryNode::MatchPhrasePrefix { field, query } => {
                json!({ "match_phrase_prefix": { field.as_str(): query } })
            }
            QueryNode::FuzzyMatch {
                field,
                query,
                fuzziness,
            } => json!({
                "match": {
                    field.as_str(): {
                        "query": query,
                        "fuzziness": fuzziness.distance,
                        "max_expansions": fuzziness.max_expansions,
                        "prefix_length": fuzziness.prefix_length,
                    }
                }
            }),
            QueryNode::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            QueryNode::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            QueryNode::Range { field, bounds } => {
                let mut body = Map::new();
                for (key, bound) in [
                    ("gt", &bounds.gt),
                    ("gte", &bounds.gte),
                    ("lt", &bounds.lt),
                    ("lte", &bounds.lte),
                ] {
                    if let Some(v) = bound {
                        body.insert(key.to_string(), v.clone());
                    }
                }
                if let Some(format) = &bounds.format {
                    body.insert("format".to_string(), Value::String(format.clone()));
                }
                json!({ "range": { field.as_str(): body } })
            }
            QueryNode::Bool(b) => {
                let mut body = Map::new();
                for (key, clauses) in [("must", &b.must), ("should", &b.should), ("must_not", &b.must_not)] {
                    if !clauses.is_empty() {
                        body.insert(
                            key.to_string(),
                            Value::Array(clauses.iter().map(QueryNode::to_json).collect()),
                        );
                    }
                }
                json!({ "bool": body })
            }
            QueryNode::RandomScore(inner) => json!({
                "function_score": {
                    "query": inner.to_json(),
                    "random_score": {},
                }
            }),
            QueryNode::Raw(value) => value.clone(),
        }
    }
}

impl Serialize for QueryNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// ============================================================================
// Compiled Query
// ============================================================================

/// Window of ranked results the request asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub from: u64,
    pub size: u64,
}

/// Everything the execution layer needs to run one search.
///
/// `from`/`size` are the engine window. They equal `page` except in re-rank
/// mode, where the engine returns every candidate up to the end of the
/// requested page and `page_of` cuts the page after re-ranking.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub from: u64,
    pub size: u64,
    /// Requested window over the final ordering
    pub page: ResultPage,
    pub query: QueryNode,
    /// Filter branch, applied after scoring
    pub post_filter: Option<QueryNode>,
    pub sort: Vec<SortClause>,
    /// Finished `aggs` block
    pub aggs: Option<Value>,
    pub source: Option<SourceFields>,
    /// Scoring plan for the active free text, if any
    pub scoring: Option<ScoringPlan>,
}

impl CompiledQuery {
    /// Request body in engine wire format.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("from".to_string(), json!(self.from));
        body.insert("size".to_string(), json!(self.size));
        body.insert("query".to_string(), self.query.to_json());
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(SortClause::to_json).collect()),
            );
        }
        if let Some(filter) = &self.post_filter {
            body.insert("post_filter".to_string(), filter.to_json());
        }
        if let Some(aggs) = &self.aggs {
            body.insert("aggs".to_string(), aggs.clone());
        }
        if let Some(source) = &self.source {
            body.insert("_source".to_string(), json!({ "include": source.includes() }));
        }
        Value::Object(body)
    }

    /// Serialized request body, ready for literal submission.
    pub fn to_body_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    /// Whether results must be re-ranked client-side before use.
    pub fn needs_rerank(&self) -> bool {
        self.scoring.is_some() && !self.sort.iter().any(SortClause::is_script)
    }

    /// Cut the requested page out of results fetched with this query's
    /// engine window, in their final order.
    pub fn page_of<T>(&self, ranked: Vec<T>) -> Vec<T> {
        let skip = self.page.from.saturating_sub(self.from);
        ranked
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.page.size).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Serialize for CompiledQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match_json() {
        let node = QueryNode::FuzzyMatch {
            field: "search_fields".into(),
            query: "burgr".into(),
            fuzziness: Fuzziness::default(),
        };
        assert_eq!(
            node.to_json(),
            json!({
                "match": {
                    "search_fields": {
                        "query": "burgr",
                        "fuzziness": "AUTO",
                        "max_expansions": 1,
                        "prefix_length": 1
                    }
                }
            })
        );
    }

    #[test]
    fn test_phrase_prefix_json() {
        let node = QueryNode::MatchPhrasePrefix {
            field: "search_fields".into(),
            query: "burger".into(),
        };
        assert_eq!(
            node.to_json(),
            json!({ "match_phrase_prefix": { "search_fields": "burger" } })
        );
    }

    #[test]
    fn test_bool_omits_empty_clauses() {
        let node = QueryNode::must(vec![QueryNode::term("post_status", "publish")]);
        assert_eq!(
            node.to_json(),
            json!({ "bool": { "must": [ { "term": { "post_status": "publish" } } ] } })
        );
    }

    #[test]
    fn test_range_json() {
        let node = QueryNode::range(
            "post_date",
            RangeBounds {
                gte: Some(json!("2020-01-01")),
                lt: Some(json!("2021-01-01")),
                format: Some("yyyy-MM-dd".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            node.to_json(),
            json!({
                "range": {
                    "post_date": { "gte": "2020-01-01", "lt": "2021-01-01", "format": "yyyy-MM-dd" }
                }
            })
        );
    }

    #[test]
    fn test_terms_and_raw() {
        let node = QueryNode::terms("post_type.raw", ["piatto"]);
        assert_eq!(node.to_json(), json!({ "terms": { "post_type.raw": ["piatto"] } }));

        let raw = json!({ "exists": { "field": "terms.city.slug" } });
        assert_eq!(QueryNode::Raw(raw.clone()).to_json(), raw);
    }

    #[test]
    fn test_random_score_wraps_query() {
        let node = QueryNode::RandomScore(Box::new(QueryNode::MatchAll { boost: 1.0 }));
        assert_eq!(
            node.to_json(),
            json!({
                "function_score": {
                    "query": { "match_all": { "boost": 1.0 } },
                    "random_score": {}
                }
            })
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let node = QueryNode::should(vec![QueryNode::MatchAll { boost: 1.0 }]);
        assert_eq!(serde_json::to_value(&node).unwrap(), node.to_json());
    }
}
