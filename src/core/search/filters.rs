//! Filter Branch Assembly
//!
//! Collects the `post_filter` clauses: caller-supplied sub-trees (already in
//! engine syntax, inserted verbatim) followed by the document type and
//! status restrictions derived from the request.

use serde_json::Value;

use super::query::QueryNode;

/// Request value that disables a type or status restriction
pub const ANY: &str = "any";

pub const POST_TYPE_FIELD: &str = "post_type.raw";
pub const POST_STATUS_FIELD: &str = "post_status";

/// Conjunction of filter clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBranch {
    clauses: Vec<QueryNode>,
}

impl FilterBranch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: QueryNode) {
        self.clauses.push(clause);
    }

    /// Add pre-translated sub-trees unchanged. `null` entries are skipped.
    pub fn extend_raw<'a>(&mut self, filters: impl IntoIterator<Item = &'a Value>) {
        for filter in filters {
            if filter.is_null() {
                log::debug!("Skipping null filter sub-tree");
                continue;
            }
            self.clauses.push(QueryNode::Raw(filter.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `bool.must` of all clauses, or `None` when nothing was added.
    pub fn into_node(self) -> Option<QueryNode> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(QueryNode::must(self.clauses))
        }
    }
}

/// Flatten a type/status list: comma-separated entries are split, blanks
/// dropped.
fn flatten(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_any(values: &[String]) -> bool {
    values.iter().any(|v| v == ANY)
}

/// Document type restriction.
///
/// Explicit types restrict with `terms`; `any` disables the restriction.
/// Without explicit types, a text-less request is limited to `default_type`
/// and a free-text request is unrestricted.
pub fn type_restriction(
    post_types: Option<&[String]>,
    has_text: bool,
    default_type: &str,
) -> Option<QueryNode> {
    let types = post_types.map(flatten).unwrap_or_default();

    if !types.is_empty() {
        if is_any(&types) {
            return None;
        }
        return Some(QueryNode::terms(POST_TYPE_FIELD, types));
    }

    if has_text || default_type.is_empty() {
        None
    } else {
        Some(QueryNode::term(POST_TYPE_FIELD, default_type))
    }
}

/// Status restriction.
///
/// One status restricts with `term`, several with `terms`; `any` disables
/// the restriction. Without explicit statuses the defaults apply as `terms`.
pub fn status_restriction(statuses: Option<&[String]>, defaults: &[String]) -> Option<QueryNode> {
    let statuses = statuses.map(flatten).unwrap_or_default();

    if statuses.is_empty() {
        let defaults = flatten(defaults);
        if defaults.is_empty() {
            return None;
        }
        return Some(QueryNode::terms(POST_STATUS_FIELD, defaults));
    }

    if is_any(&statuses) {
        return None;
    }

    match statuses.as_slice() {
        [single] => Some(QueryNode::term(POST_STATUS_FIELD, single.as_str())),
        _ => Some(QueryNode::terms(POST_STATUS_FIELD, statuses)),
    }
}
