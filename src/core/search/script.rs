//! Engine-Side Scoring Script
//!
//! The relevance score evaluated inside the engine as a `_script` sort key.
//! The Painless program is a fixed constant; everything request-specific
//! (variants, normalization constant, field names, stopwords, synonyms)
//! travels in `params`, so search text never becomes part of the script body.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::core::preprocess::stopwords::stopword_set;
use crate::core::preprocess::synonyms::SynonymMap;
use crate::core::ranking::{ScoringPlan, TERM_CAP};

use super::models::ScoreFieldNames;

/// Script language
pub const SCRIPT_LANG: &str = "painless";

/// Relevance score program. Mirrors `RelevanceScorer::explain` step for step:
/// - fields joined with `FIELD_DELIMITER`, lower-cased, then split into
///   segments (`document_segments`)
/// - words split with `StringTokenizer`, i.e. ASCII whitespace
/// - stopwords dropped before synonyms fold, empty segments skipped
/// - substring and word-set hits per variant (`lexical_overlap`)
/// - Wilson bound and weight with the same constants and clamps
///
/// Field values come from doc values here and from `_source` in the re-rank
/// path, so multi-valued fields contribute only their first value here.
/// Changes to either side must be made to both.
pub const SCORE_SCRIPT_SOURCE: &str = r#"
double cap = params.cap;
String text = '';
for (int i = 0; i < params.fields.size(); ++i) {
  String f = params.fields[i];
  if (i > 0) { text += ','; }
  if (doc.containsKey(f) && doc[f].size() > 0) { text += doc[f].value; }
}
text = text.toLowerCase();

Set stop = new HashSet(params.stopwords);
Map syn = params.synonyms;
List segments = new ArrayList();
for (String field : text.splitOnToken(',')) {
  List words = new ArrayList();
  StringTokenizer tok = new StringTokenizer(field);
  while (tok.hasMoreTokens()) {
    String w = tok.nextToken();
    if (stop.contains(w)) { continue; }
    if (syn.containsKey(w)) {
      for (String c : syn.get(w).splitOnToken(' ')) { words.add(c); }
    } else {
      words.add(w);
    }
  }
  if (!words.isEmpty()) { segments.add(String.join(' ', words)); }
}

double raw = 0;
for (String seg : segments) {
  Set segWords = new HashSet();
  for (String w : seg.splitOnToken(' ')) { segWords.add(w); }
  for (String v : params.variants) {
    List vw = new ArrayList();
    for (String w : v.splitOnToken(' ')) { if (!w.isEmpty()) { vw.add(w); } }
    if (vw.isEmpty()) { continue; }
    if (seg.contains(v)) { raw += vw.size() / 2.0; }
    if (segWords.containsAll(vw)) { raw += vw.size(); }
  }
}
double lexical = params.norm > 0 ? Math.min(cap, Math.max(0, raw / params.norm * cap)) : 0;

double[] pos = new double[] {0.0, 0.25, 0.5, 0.75, 1.0};
double p = 0;
double q = 0;
for (int i = 0; i < 5; ++i) {
  String f = params.rating_fields[i];
  long c = doc.containsKey(f) && doc[f].size() > 0 ? doc[f].value : 0L;
  p += c * pos[i];
  q += c * (1.0 - pos[i]);
}
double n = p + q;
double rating = 0;
if (n > 0) {
  double lb = ((p + 1.9208) / n - 1.96 * Math.sqrt(p * q / n + 0.9604) / n) / (1 + 3.8416 / n);
  rating = Math.min(cap, Math.max(0, lb * cap));
}

double weight = 0;
String wf = params.weight_field;
if (doc.containsKey(wf) && doc[wf].size() > 0) {
  weight = Math.min(cap, Math.max(0, ((double) doc[wf].value) / 10.0 * cap));
}

return lexical + rating + weight;
"#;

/// Where the engine finds the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// Program shipped with every request
    Inline,
    /// Program registered once under this id
    Stored(String),
}

/// Bound script parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptParams {
    /// Lower-cased phrase variants
    pub variants: Vec<String>,
    /// M(n), or 0 when the query has no tokens
    pub norm: f64,
    pub token_count: usize,
    /// Designated text fields, in scoring order
    pub fields: Vec<String>,
    /// Rating count fields for star levels 1..=5
    pub rating_fields: Vec<String>,
    pub weight_field: String,
    /// Merged stopword table, sorted
    pub stopwords: Vec<String>,
    /// Alias → canonical
    pub synonyms: BTreeMap<String, String>,
    pub cap: f64,
}

/// Script sort key for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreScript {
    pub source: ScriptSource,
    pub params: ScriptParams,
}

impl ScoreScript {
    /// Bind `plan` to the script. `stored_id` selects a pre-registered
    /// program instead of the inline source.
    pub fn new(
        plan: &ScoringPlan,
        names: &ScoreFieldNames,
        synonyms: &SynonymMap,
        stored_id: Option<&str>,
    ) -> Self {
        let mut stopwords: Vec<String> = stopword_set().iter().map(|s| s.to_string()).collect();
        stopwords.sort();

        let params = ScriptParams {
            variants: plan.variants().map(str::to_string).collect(),
            norm: plan.normalization().unwrap_or(0.0),
            token_count: plan.token_count(),
            fields: names.text_fields().iter().map(|f| f.to_string()).collect(),
            rating_fields: names.ratings.to_vec(),
            weight_field: names.weight.clone(),
            stopwords,
            synonyms: synonyms
                .iter()
                .map(|(a, c)| (a.to_string(), c.to_string()))
                .collect(),
            cap: TERM_CAP,
        };

        let source = match stored_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => ScriptSource::Stored(id.to_string()),
            None => ScriptSource::Inline,
        };

        Self { source, params }
    }

    /// `script` object for the sort clause.
    pub fn to_json(&self) -> Value {
        let params = serde_json::to_value(&self.params).unwrap_or_else(|e| {
            log::warn!("Failed to encode script params: {}", e);
            Value::Object(Default::default())
        });

        match &self.source {
            ScriptSource::Inline => json!({
                "lang": SCRIPT_LANG,
                "source": SCORE_SCRIPT_SOURCE,
                "params": params,
            }),
            ScriptSource::Stored(id) => json!({
                "id": id,
                "params": params,
            }),
        }
    }

    /// Body for registering the program under a stored-script id.
    pub fn stored_script_body() -> Value {
        json!({
            "script": {
                "lang": SCRIPT_LANG,
                "source": SCORE_SCRIPT_SOURCE,
            }
        })
    }
}
