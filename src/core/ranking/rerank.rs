//! Post-Retrieval Re-rank
//!
//! Client-side alternative to the engine-side script sort: score every
//! candidate in parallel, then one stable sort by total descending with the
//! title ascending as tie-break.

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use super::scorer::{RelevanceScorer, ScoreBreakdown, ScoringPlan};
use crate::core::search::models::{ResolvedDocument, ScoreFieldNames};

/// A candidate with its score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct RankedDocument {
    pub document: ResolvedDocument,
    pub breakdown: ScoreBreakdown,
}

impl RankedDocument {
    pub fn total(&self) -> f64 {
        self.breakdown.total
    }
}

/// Score and order `candidates`.
pub fn rerank(
    plan: &ScoringPlan,
    scorer: &RelevanceScorer,
    candidates: Vec<ResolvedDocument>,
) -> Vec<RankedDocument> {
    let span = tracing::debug_span!("rerank", candidates = candidates.len());
    let _enter = span.enter();

    let mut ranked: Vec<RankedDocument> = candidates
        .into_par_iter()
        .map(|document| {
            let breakdown = scorer.explain(plan, &document);
            RankedDocument {
                document,
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(compare_ranked);

    if let Some(top) = ranked.first() {
        tracing::debug!(top_score = top.total(), "rerank complete");
    }
    ranked
}

/// Total descending, then title ascending.
fn compare_ranked(a: &RankedDocument, b: &RankedDocument) -> Ordering {
    b.breakdown
        .total
        .total_cmp(&a.breakdown.total)
        .then_with(|| a.document.title.cmp(&b.document.title))
}

/// Resolve the `hits.hits` of an engine response into scorer input.
///
/// Hits without a `_source` object are skipped.
pub fn documents_from_hits(response: &Value, names: &ScoreFieldNames) -> Vec<ResolvedDocument> {
    let Some(hits) = response
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
    else {
        log::warn!("Engine response has no hits array");
        return Vec::new();
    };

    hits.iter()
        .filter_map(|hit| {
            let source = hit.get("_source").filter(|s| s.is_object())?;
            let id = match hit.get("_id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            Some(ResolvedDocument::from_engine_source(id, source, names))
        })
        .collect()
}
