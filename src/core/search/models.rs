//! Search Request and Document Models
//!
//! Inputs to the query compiler (the request) and to the relevance scorer
//! (the resolved per-document record supplied by ingestion).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::sort::OrderBy;

// ============================================================================
// Search Request
// ============================================================================

/// One search request. Immutable once handed to the compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Free text typed by the user
    #[serde(deserialize_with = "lenient_text")]
    pub text: Option<String>,
    /// Filter sub-trees, already in engine syntax; inserted verbatim
    pub filters: Vec<Value>,
    /// Document types to restrict to (`any` disables the restriction)
    pub post_types: Option<Vec<String>>,
    /// Statuses to restrict to (`any` disables the restriction)
    pub post_status: Option<Vec<String>>,
    /// Result window
    pub pagination: Pagination,
    /// Sort direction applied to orderby entries without their own
    pub order: Option<String>,
    /// Explicit sort fields
    pub orderby: Option<OrderBy>,
    /// Meta key used by the `meta_value` / `meta_value_num` orderby aliases
    pub meta_key: Option<String>,
    /// Restrict the returned `_source`
    pub fields: Option<SourceFields>,
    /// Aggregation block
    pub aggs: Option<AggregationSpec>,
}

impl SearchRequest {
    /// Request with free text and everything else defaulted.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// The free text, if it contains anything besides whitespace.
    pub fn free_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Pagination input. Every value is optional and coerced defensively.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
    /// Absolute offset of the first hit
    #[serde(deserialize_with = "lenient_int")]
    pub offset: Option<i64>,
    /// Page size; `-1` means "as many as the engine allows"
    #[serde(deserialize_with = "lenient_int")]
    pub per_page: Option<i64>,
    /// 1-based page number; overrides `offset` when greater than 1
    #[serde(deserialize_with = "lenient_int")]
    pub paged: Option<i64>,
}

/// `_source` restriction presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceFields {
    /// Only the document id
    #[serde(rename = "ids")]
    Ids,
    /// Document id and parent id
    #[serde(rename = "id=>parent")]
    IdParent,
}

impl SourceFields {
    pub fn includes(&self) -> &'static [&'static str] {
        match self {
            SourceFields::Ids => &["post_id"],
            SourceFields::IdParent => &["post_id", "post_parent"],
        }
    }
}

/// Aggregation request passed through to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregationSpec {
    /// Aggregation name; `aggregation_name` when absent
    pub name: Option<String>,
    /// Apply the filter branch to the aggregation as well
    #[serde(rename = "use-filter", alias = "use_filter")]
    pub use_filter: bool,
    /// Engine aggregation body
    pub aggs: Value,
}

// ============================================================================
// Resolved Document (scoring input)
// ============================================================================

/// Rating counts per star level 1..=5.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingCounts(pub [u64; 5]);

impl RatingCounts {
    pub fn new(counts: [u64; 5]) -> Self {
        Self(counts)
    }

    /// Count at `level` (1..=5); any other level reads as 0.
    pub fn level(&self, level: usize) -> u64 {
        match level {
            1..=5 => self.0[level - 1],
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// Per-document record resolved by ingestion. Absent fields are empty / 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolvedDocument {
    pub id: Option<String>,
    pub title: String,
    pub associated_title: String,
    pub associated_address: String,
    pub locality: String,
    pub ingredient_text: String,
    pub keyword_text: String,
    pub rating_counts: RatingCounts,
    /// Manual weight on a 0..=10 scale
    pub weight: Option<f64>,
}

impl ResolvedDocument {
    /// Designated text fields, in scoring order.
    pub fn text_fields(&self) -> [&str; 6] {
        [
            &self.title,
            &self.associated_title,
            &self.associated_address,
            &self.locality,
            &self.ingredient_text,
            &self.keyword_text,
        ]
    }

    /// Build from an engine hit's `_source`, reading the same field names the
    /// engine-side script uses (a trailing `.raw` sub-field suffix is dropped).
    pub fn from_engine_source(id: Option<String>, source: &Value, names: &ScoreFieldNames) -> Self {
        let text = |field: &str| -> String {
            let key = field.strip_suffix(".raw").unwrap_or(field);
            match source.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            }
        };
        let count = |field: &str| -> u64 {
            match source.get(field) {
                Some(Value::Number(n)) => n
                    .as_u64()
                    .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
                    .unwrap_or(0),
                Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
                _ => 0,
            }
        };
        let weight = match source.get(&names.weight) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        let ratings = &names.ratings;
        Self {
            id,
            title: text(&names.title),
            associated_title: text(&names.associated_title),
            associated_address: text(&names.associated_address),
            locality: text(&names.locality),
            ingredient_text: text(&names.ingredients),
            keyword_text: text(&names.keywords),
            rating_counts: RatingCounts([
                count(&ratings[0]),
                count(&ratings[1]),
                count(&ratings[2]),
                count(&ratings[3]),
                count(&ratings[4]),
            ]),
            weight,
        }
    }
}

/// Engine field names feeding the scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoreFieldNames {
    pub title: String,
    pub associated_title: String,
    pub associated_address: String,
    pub locality: String,
    pub ingredients: String,
    pub keywords: String,
    pub ratings: [String; 5],
    pub weight: String,
}

impl Default for ScoreFieldNames {
    fn default() -> Self {
        Self {
            title: "post_title.raw".to_string(),
            associated_title: "restaurant_title.raw".to_string(),
            associated_address: "restaurant_address.raw".to_string(),
            locality: "city.raw".to_string(),
            ingredients: "food_ingredients.raw".to_string(),
            keywords: "food_keywords.raw".to_string(),
            ratings: [
                "r1".to_string(),
                "r2".to_string(),
                "r3".to_string(),
                "r4".to_string(),
                "r5".to_string(),
            ],
            weight: "weight".to_string(),
        }
    }
}

impl ScoreFieldNames {
    /// Text fields in scoring order.
    pub fn text_fields(&self) -> [&str; 6] {
        [
            &self.title,
            &self.associated_title,
            &self.associated_address,
            &self.locality,
            &self.ingredients,
            &self.keywords,
        ]
    }
}

// ============================================================================
// Lenient decoding
// ============================================================================

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            log::warn!("Ignoring non-string search text: {}", other);
            None
        }
    })
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let parsed = s.trim().parse::<i64>().ok();
            if parsed.is_none() {
                log::warn!("Ignoring non-numeric pagination value: {:?}", s);
            }
            parsed
        }
        Value::Null => None,
        other => {
            log::warn!("Ignoring non-numeric pagination value: {}", other);
            None
        }
    })
}
