//! Query Compiler
//!
//! Translates a [`SearchRequest`] into a [`CompiledQuery`].
//!
//! With free text the query is two OR-ed eligibility paths over the
//! composite field:
//! 1. every stopword-filtered token phrase-prefix matches, as typed
//! 2. every raw token fuzzy matches
//!
//! and the primary sort key is the relevance score (engine script or
//! client-side re-rank), tie-broken by the title ascending. In re-rank mode
//! the engine window starts at 0 so the requested page is cut after
//! re-ranking. Without free text the query matches everything and sorts by
//! the request's orderby, or by date.

use std::path::Path;

use serde_json::{json, Map, Value};

use super::error::Result;
use super::filters::{status_restriction, type_restriction, FilterBranch};
use super::models::{AggregationSpec, Pagination, SearchRequest};
use super::query::{CompiledQuery, QueryNode, ResultPage};
use super::script::ScoreScript;
use super::sort::{resolve_orderby, OrderBy, SortClause, SortOrder};
use crate::config::{AppConfig, ScoringConfig, ScoringMode, SearchConfig};
use crate::core::preprocess::combinations::PhraseVariants;
use crate::core::preprocess::normalizer::{NormalizedText, TextNormalizer};
use crate::core::ranking::{RelevanceScorer, ScoringPlan};

/// Aggregation name used when the request gives none
pub const DEFAULT_AGGREGATION_NAME: &str = "aggregation_name";

/// Compiles search requests. Immutable after construction; share freely.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    search: SearchConfig,
    scoring: ScoringConfig,
    normalizer: TextNormalizer,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(SearchConfig::default(), ScoringConfig::default())
    }
}

impl QueryCompiler {
    pub fn new(search: SearchConfig, scoring: ScoringConfig) -> Self {
        let normalizer = TextNormalizer::new(scoring.synonym_map());
        Self {
            search,
            scoring,
            normalizer,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.search.clone(), config.scoring.clone())
    }

    /// Compiler for a config file. Unlike `AppConfig::load`, a missing or
    /// invalid file is an error.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = AppConfig::from_file(path)?;
        Ok(Self::from_config(&config))
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Scorer sharing this compiler's synonym table, for the re-rank step.
    pub fn scorer(&self) -> RelevanceScorer {
        RelevanceScorer::new(self.normalizer.synonyms().clone())
    }

    /// Compile one request.
    ///
    /// Fails only when the free text has more tokens than the scorer's
    /// normalization table covers.
    pub fn compile(&self, request: &SearchRequest) -> Result<CompiledQuery> {
        let order = SortOrder::parse(request.order.as_deref());

        let (mut query, sort, scoring) = match request.free_text() {
            Some(text) => {
                let normalized = self.normalizer.normalize(text);
                let plan = ScoringPlan::new(&PhraseVariants::from_tokens(&normalized.tokens))?;
                let query = self.text_query(&normalized);
                let sort = self.scored_sort(&plan);
                (query, sort, Some(plan))
            }
            None => {
                let query = QueryNode::MatchAll { boost: 1.0 };
                let sort = browse_sort(request.orderby.as_ref(), order, request.meta_key.as_deref());
                (query, sort, None)
            }
        };

        if request.orderby.as_ref().is_some_and(OrderBy::wants_random) {
            query = QueryNode::RandomScore(Box::new(query));
        }

        let page = self.window(&request.pagination);
        let (from, size) = match self.scoring.mode {
            ScoringMode::Rerank if scoring.is_some() => (
                0,
                page.from
                    .saturating_add(page.size)
                    .min(self.search.max_result_window),
            ),
            _ => (page.from, page.size),
        };
        let post_filter = self.filter_branch(request);
        let aggs = request
            .aggs
            .as_ref()
            .and_then(|spec| build_aggregations(spec, post_filter.as_ref()));

        log::debug!(
            "Compiled query: from={} size={} page={}+{} sort_clauses={} filtered={} scored={}",
            from,
            size,
            page.from,
            page.size,
            sort.len(),
            post_filter.is_some(),
            scoring.is_some()
        );

        Ok(CompiledQuery {
            from,
            size,
            page,
            query,
            post_filter,
            sort,
            aggs,
            source: request.fields,
            scoring,
        })
    }

    // ========================================================================
    // Free text
    // ========================================================================

    /// Phrase-prefix branch OR fuzzy branch. A branch with no clauses is left
    /// out, since an empty `bool` would match every document. Synonym folding
    /// only feeds the scorer; the indexed text holds what users typed.
    fn text_query(&self, normalized: &NormalizedText) -> QueryNode {
        let field = &self.search.composite_field;
        let fuzziness = self.search.fuzziness();

        let phrase_branch: Vec<QueryNode> = normalized
            .filtered_tokens
            .iter()
            .map(|token| QueryNode::MatchPhrasePrefix {
                field: field.clone(),
                query: token.clone(),
            })
            .collect();

        let fuzzy_branch: Vec<QueryNode> = normalized
            .raw_tokens
            .iter()
            .map(|token| QueryNode::FuzzyMatch {
                field: field.clone(),
                query: token.clone(),
                fuzziness: fuzziness.clone(),
            })
            .collect();

        let branches = [phrase_branch, fuzzy_branch]
            .into_iter()
            .filter(|b| !b.is_empty())
            .map(QueryNode::must)
            .collect();

        QueryNode::should(branches)
    }

    fn scored_sort(&self, plan: &ScoringPlan) -> Vec<SortClause> {
        let primary = match self.scoring.mode {
            ScoringMode::Engine => SortClause::Script {
                script: ScoreScript::new(
                    plan,
                    &self.scoring.fields,
                    self.normalizer.synonyms(),
                    self.scoring.stored_script_id.as_deref(),
                ),
                order: SortOrder::Desc,
            },
            ScoringMode::Rerank => SortClause::field("_score", SortOrder::Desc),
        };

        vec![
            primary,
            SortClause::field(self.search.secondary_sort_field.clone(), SortOrder::Asc),
        ]
    }

    // ========================================================================
    // Window and filters
    // ========================================================================

    /// Resolve the requested page. Malformed values are coerced, never fatal.
    fn window(&self, pagination: &Pagination) -> ResultPage {
        let size = match pagination.per_page {
            None => self.search.default_per_page,
            Some(-1) => self.search.max_result_window,
            Some(n) if n > 0 => (n as u64).min(self.search.max_result_window),
            Some(n) => {
                log::warn!("Ignoring invalid per_page {}, using default", n);
                self.search.default_per_page
            }
        };

        let mut from = match pagination.offset {
            None => 0,
            Some(n) if n >= 0 => n as u64,
            Some(n) => {
                log::warn!("Ignoring negative offset {}", n);
                0
            }
        };

        if let Some(paged) = pagination.paged.filter(|p| *p > 1) {
            from = size.saturating_mul(paged as u64 - 1);
        }

        ResultPage { from, size }
    }

    fn filter_branch(&self, request: &SearchRequest) -> Option<QueryNode> {
        let mut branch = FilterBranch::new();
        branch.extend_raw(&request.filters);

        let has_text = request.free_text().is_some();
        if let Some(clause) = type_restriction(
            request.post_types.as_deref(),
            has_text,
            &self.search.default_post_type,
        ) {
            branch.push(clause);
        }
        if let Some(clause) = status_restriction(
            request.post_status.as_deref(),
            &self.search.default_post_status,
        ) {
            branch.push(clause);
        }

        branch.into_node()
    }
}

/// Sort for requests without free text: the explicit orderby, or date.
fn browse_sort(orderby: Option<&OrderBy>, order: SortOrder, meta_key: Option<&str>) -> Vec<SortClause> {
    match orderby.filter(|o| !o.is_empty()) {
        Some(orderby) => resolve_orderby(orderby, order, meta_key),
        None => resolve_orderby(&OrderBy::parse("date"), order, meta_key),
    }
}

/// Named aggregation block, wrapped with the filter branch when requested.
fn build_aggregations(spec: &AggregationSpec, post_filter: Option<&QueryNode>) -> Option<Value> {
    let empty = match &spec.aggs {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    };
    if empty {
        return None;
    }

    let name = spec
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_AGGREGATION_NAME);

    let body = match post_filter {
        Some(filter) if spec.use_filter => json!({
            "filter": filter.to_json(),
            "aggs": spec.aggs,
        }),
        _ => spec.aggs.clone(),
    };

    let mut aggs = Map::new();
    aggs.insert(name.to_string(), body);
    Some(Value::Object(aggs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::error::SearchError;
    use crate::core::search::models::SourceFields;

    fn compile(request: &SearchRequest) -> CompiledQuery {
        QueryCompiler::default().compile(request).unwrap()
    }

    fn rerank_compiler() -> QueryCompiler {
        QueryCompiler::new(
            SearchConfig::default(),
            ScoringConfig {
                mode: ScoringMode::Rerank,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_text_query_branches() {
        let compiled = compile(&SearchRequest::with_text("the burger  king"));
        let query = compiled.query.to_json();

        let phrase = &query["bool"]["should"][0]["bool"]["must"];
        assert_eq!(phrase.as_array().unwrap().len(), 2);
        assert_eq!(phrase[0], json!({ "match_phrase_prefix": { "search_fields": "burger" } }));
        assert_eq!(phrase[1], json!({ "match_phrase_prefix": { "search_fields": "king" } }));

        let fuzzy = &query["bool"]["should"][1]["bool"]["must"];
        assert_eq!(fuzzy.as_array().unwrap().len(), 3);
        assert_eq!(fuzzy[0]["match"]["search_fields"]["query"], "the");
        assert_eq!(fuzzy[0]["match"]["search_fields"]["fuzziness"], "AUTO");
        assert_eq!(fuzzy[0]["match"]["search_fields"]["max_expansions"], 1);
        assert_eq!(fuzzy[0]["match"]["search_fields"]["prefix_length"], 1);
    }

    #[test]
    fn test_all_stopwords_keeps_only_fuzzy_branch() {
        let compiled = compile(&SearchRequest::with_text("the of"));
        let should = compiled.query.to_json()["bool"]["should"].clone();
        assert_eq!(should.as_array().unwrap().len(), 1);
        assert!(should[0]["bool"]["must"][0].get("match").is_some());
        assert!(compiled.scoring.unwrap().is_empty());
    }

    #[test]
    fn test_text_sort_is_script_then_title() {
        let compiled = compile(&SearchRequest::with_text("burger king"));
        assert_eq!(compiled.sort.len(), 2);
        assert!(compiled.sort[0].is_script());
        assert_eq!(
            compiled.sort[1],
            SortClause::field("post_title.raw", SortOrder::Asc)
        );

        let json = compiled.to_json();
        assert_eq!(json["sort"][0]["_script"]["type"], "number");
        assert_eq!(json["sort"][0]["_script"]["order"], "desc");
        assert_eq!(
            json["sort"][0]["_script"]["script"]["params"]["variants"],
            json!(["burger king", "king", "burger"])
        );
        assert!(!compiled.needs_rerank());
    }

    #[test]
    fn test_text_ignores_orderby() {
        let mut request = SearchRequest::with_text("pizza");
        request.orderby = Some(OrderBy::parse("date"));
        let compiled = compile(&request);
        assert!(compiled.sort[0].is_script());
    }

    #[test]
    fn test_rerank_mode_sorts_by_score() {
        let compiled = rerank_compiler()
            .compile(&SearchRequest::with_text("burger"))
            .unwrap();
        assert_eq!(compiled.sort[0], SortClause::field("_score", SortOrder::Desc));
        assert!(compiled.needs_rerank());
        assert_eq!(compiled.scoring.as_ref().unwrap().token_count(), 1);
    }

    #[test]
    fn test_rerank_mode_fetches_from_first_candidate() {
        let mut request = SearchRequest::with_text("burger king");
        request.pagination = Pagination {
            per_page: Some(5),
            paged: Some(2),
            ..Default::default()
        };

        let compiled = rerank_compiler().compile(&request).unwrap();
        assert_eq!((compiled.from, compiled.size), (0, 10));
        assert_eq!(compiled.page, ResultPage { from: 5, size: 5 });

        let body = compiled.to_json();
        assert_eq!(body["from"], 0);
        assert_eq!(body["size"], 10);

        let ranked: Vec<u32> = (0..10).collect();
        assert_eq!(compiled.page_of(ranked), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_rerank_window_is_capped() {
        let mut request = SearchRequest::with_text("pizza");
        request.pagination = Pagination {
            offset: Some(9_995),
            per_page: Some(20),
            ..Default::default()
        };

        let compiled = rerank_compiler().compile(&request).unwrap();
        assert_eq!((compiled.from, compiled.size), (0, 10_000));
        assert_eq!(compiled.page, ResultPage { from: 9_995, size: 20 });
    }

    #[test]
    fn test_engine_mode_pages_in_the_engine() {
        let mut request = SearchRequest::with_text("burger king");
        request.pagination.per_page = Some(5);
        request.pagination.paged = Some(2);

        let compiled = compile(&request);
        assert_eq!((compiled.from, compiled.size), (5, 5));
        assert_eq!(compiled.page, ResultPage { from: 5, size: 5 });
        assert_eq!(compiled.page_of(vec!["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_browse_in_rerank_mode_pages_in_the_engine() {
        let mut request = SearchRequest::default();
        request.pagination.offset = Some(30);

        let compiled = rerank_compiler().compile(&request).unwrap();
        assert_eq!((compiled.from, compiled.size), (30, 10));
        assert!(!compiled.needs_rerank());
    }

    #[test]
    fn test_long_query_is_rejected() {
        let text = "one1 two2 three3 four4 five5 six6 seven7 eight8 nine9 ten10 eleven11 twelve12";
        let err = QueryCompiler::default()
            .compile(&SearchRequest::with_text(text))
            .unwrap_err();
        assert!(matches!(err, SearchError::QueryTooLong { tokens: 12, .. }));
    }

    #[test]
    fn test_browse_defaults() {
        let compiled = compile(&SearchRequest::default());
        let json = compiled.to_json();

        assert_eq!(json["query"], json!({ "match_all": { "boost": 1.0 } }));
        assert_eq!(json["sort"], json!([{ "post_date": { "order": "desc" } }]));
        assert_eq!(json["from"], 0);
        assert_eq!(json["size"], 10);
        assert_eq!(
            json["post_filter"],
            json!({
                "bool": {
                    "must": [
                        { "term": { "post_type.raw": "post" } },
                        { "terms": { "post_status": ["publish"] } }
                    ]
                }
            })
        );
        assert!(compiled.scoring.is_none());
    }

    #[test]
    fn test_browse_orderby_and_order() {
        let request = SearchRequest {
            orderby: Some(OrderBy::parse("title")),
            order: Some("ASC".into()),
            ..Default::default()
        };
        let compiled = compile(&request);
        assert_eq!(
            compiled.sort,
            vec![SortClause::field("post_title.sortable", SortOrder::Asc)]
        );
    }

    #[test]
    fn test_rand_wraps_query() {
        let request = SearchRequest {
            orderby: Some(OrderBy::parse("rand")),
            ..Default::default()
        };
        let compiled = compile(&request);
        assert!(compiled.sort.is_empty());
        assert!(compiled.query.to_json()["function_score"]["random_score"].is_object());
    }

    #[test]
    fn test_pagination_rules() {
        let compiler = QueryCompiler::default();
        let window = |offset, per_page, paged| {
            let page = compiler.window(&Pagination {
                offset,
                per_page,
                paged,
            });
            (page.from, page.size)
        };

        assert_eq!(window(None, None, None), (0, 10));
        assert_eq!(window(Some(20), Some(5), None), (20, 5));
        assert_eq!(window(Some(20), Some(5), Some(3)), (10, 5));
        assert_eq!(window(Some(7), Some(5), Some(1)), (7, 5));
        assert_eq!(window(None, Some(-1), None), (0, 10_000));
        assert_eq!(window(Some(-4), Some(-7), None), (0, 10));
        assert_eq!(window(None, Some(0), None), (0, 10));
    }

    #[test]
    fn test_filters_inserted_verbatim_before_restrictions() {
        let raw = json!({ "range": { "post_date": { "gte": "2020-01-01" } } });
        let request = SearchRequest {
            text: Some("pizza".into()),
            filters: vec![raw.clone()],
            post_types: Some(vec!["piatto".into()]),
            post_status: Some(vec!["publish".into()]),
            ..Default::default()
        };
        let json = compile(&request).to_json();
        assert_eq!(
            json["post_filter"]["bool"]["must"],
            json!([
                raw,
                { "terms": { "post_type.raw": ["piatto"] } },
                { "term": { "post_status": "publish" } }
            ])
        );
    }

    #[test]
    fn test_source_fields() {
        let request = SearchRequest {
            fields: Some(SourceFields::Ids),
            ..Default::default()
        };
        assert_eq!(
            compile(&request).to_json()["_source"],
            json!({ "include": ["post_id"] })
        );
    }

    #[test]
    fn test_aggregations() {
        let body = json!({ "cities": { "terms": { "field": "terms.city.slug" } } });

        let plain = SearchRequest {
            aggs: Some(AggregationSpec {
                name: None,
                use_filter: false,
                aggs: body.clone(),
            }),
            ..Default::default()
        };
        assert_eq!(
            compile(&plain).to_json()["aggs"],
            json!({ "aggregation_name": body.clone() })
        );

        let filtered = SearchRequest {
            aggs: Some(AggregationSpec {
                name: Some("by_city".into()),
                use_filter: true,
                aggs: body.clone(),
            }),
            ..Default::default()
        };
        let compiled = compile(&filtered);
        let aggs = compiled.to_json()["aggs"]["by_city"].clone();
        assert_eq!(aggs["aggs"], body);
        assert_eq!(aggs["filter"], compiled.post_filter.as_ref().unwrap().to_json());
    }

    #[test]
    fn test_empty_aggregation_is_dropped() {
        let request = SearchRequest {
            aggs: Some(AggregationSpec::default()),
            ..Default::default()
        };
        assert!(compile(&request).aggs.is_none());
    }

    #[test]
    fn test_synonyms_fold_before_variants() {
        let compiled = compile(&SearchRequest::with_text("mcd"));
        let plan = compiled.scoring.unwrap();
        assert_eq!(plan.variants().next(), Some("mc donalds"));
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\nmode = \"rerank\"\n").unwrap();

        let compiled = QueryCompiler::from_config_file(&path)
            .unwrap()
            .compile(&SearchRequest::with_text("pizza"))
            .unwrap();
        assert!(compiled.needs_rerank());
    }

    #[test]
    fn test_bad_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndefault_per_page = 0\n").unwrap();
        let err = QueryCompiler::from_config_file(&path).unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));

        let err = QueryCompiler::from_config_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_phrase_branch_keeps_typed_tokens() {
        let compiled = compile(&SearchRequest::with_text("menu mcd"));
        let query = compiled.query.to_json();

        let phrase = &query["bool"]["should"][0]["bool"]["must"];
        assert_eq!(
            phrase,
            &json!([
                { "match_phrase_prefix": { "search_fields": "menu" } },
                { "match_phrase_prefix": { "search_fields": "mcd" } }
            ])
        );
        assert_eq!(compiled.scoring.unwrap().token_count(), 3);
    }
}
