//! Sort Specification
//!
//! Parses `order` / `orderby` request values and resolves orderby aliases to
//! engine sort clauses. Unknown orderby names are passed through literally;
//! whether the engine knows the field is only discovered at execution time.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use super::script::ScoreScript;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any casing is ascending; anything else, including nothing,
    /// is descending.
    pub fn parse(order: Option<&str>) -> Self {
        match order {
            Some(o) if o.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// ============================================================================
// Orderby input
// ============================================================================

/// One orderby entry: a field or alias with an optional own direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderByEntry {
    pub field: String,
    pub order: Option<String>,
}

/// Explicit orderby list.
///
/// Accepts a space-separated string (`"date title"`), an array of names, or
/// an object mapping names to directions (`{"date": "asc"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderBy(pub Vec<OrderByEntry>);

impl OrderBy {
    /// Parse the space-separated form.
    pub fn parse(spec: &str) -> Self {
        OrderBy(
            spec.split_whitespace()
                .map(|f| OrderByEntry {
                    field: f.to_string(),
                    order: None,
                })
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a random ordering was requested.
    pub fn wants_random(&self) -> bool {
        self.0.iter().any(|e| e.field == "rand")
    }
}

impl<'de> Deserialize<'de> for OrderBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderByVisitor;

        impl<'de> Visitor<'de> for OrderByVisitor {
            type Value = OrderBy;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an orderby string, list, or field-to-order map")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<OrderBy, E> {
                Ok(OrderBy::parse(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OrderBy, A::Error> {
                let mut entries = Vec::new();
                while let Some(field) = seq.next_element::<String>()? {
                    entries.push(OrderByEntry { field, order: None });
                }
                Ok(OrderBy(entries))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderBy, A::Error> {
                let mut entries = Vec::new();
                while let Some((field, order)) = map.next_entry::<String, String>()? {
                    entries.push(OrderByEntry {
                        field,
                        order: Some(order),
                    });
                }
                Ok(OrderBy(entries))
            }
        }

        deserializer.deserialize_any(OrderByVisitor)
    }
}

// ============================================================================
// Sort clauses
// ============================================================================

/// One engine sort clause.
#[derive(Debug, Clone, PartialEq)]
pub enum SortClause {
    Field { field: String, order: SortOrder },
    Script { script: ScoreScript, order: SortOrder },
}

impl SortClause {
    pub fn field(field: impl Into<String>, order: SortOrder) -> Self {
        SortClause::Field {
            field: field.into(),
            order,
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, SortClause::Script { .. })
    }

    pub fn to_json(&self) -> Value {
        match self {
            SortClause::Field { field, order } => {
                json!({ field.as_str(): { "order": order.as_str() } })
            }
            SortClause::Script { script, order } => json!({
                "_script": {
                    "type": "number",
                    "script": script.to_json(),
                    "order": order.as_str(),
                }
            }),
        }
    }
}

/// Resolve orderby entries to sort clauses.
///
/// `rand` contributes no clause (the caller wraps the query instead), and the
/// meta aliases are dropped when no `meta_key` is available.
pub fn resolve_orderby(
    orderby: &OrderBy,
    default_order: SortOrder,
    meta_key: Option<&str>,
) -> Vec<SortClause> {
    let meta_key = meta_key.filter(|k| !k.is_empty());
    let mut sort = Vec::new();

    for entry in &orderby.0 {
        let order = match entry.order.as_deref() {
            Some(o) => SortOrder::parse(Some(o)),
            None => default_order,
        };

        let field = match entry.field.as_str() {
            "" | "rand" => continue,
            "relevance" => "_score".to_string(),
            "date" => "post_date".to_string(),
            "type" => "post_type.raw".to_string(),
            "modified" => "post_modified".to_string(),
            "name" => "post_name.raw".to_string(),
            "title" => "post_title.sortable".to_string(),
            "meta_value" => match meta_key {
                Some(key) => format!("meta.{}.raw", key),
                None => {
                    log::debug!("Dropping meta_value orderby without meta_key");
                    continue;
                }
            },
            "meta_value_num" => match meta_key {
                Some(key) => format!("meta.{}.long", key),
                None => {
                    log::debug!("Dropping meta_value_num orderby without meta_key");
                    continue;
                }
            },
            other => other.to_string(),
        };

        sort.push(SortClause::Field { field, order });
    }

    sort
}
