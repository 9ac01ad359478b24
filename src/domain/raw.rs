//! Read-only views over the untrusted PageSpeed payload.
//!
//! The payload is kept as a `serde_json::Value` so it can be handed back
//! verbatim; every accessor here tolerates missing nodes and wrong types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw response body of the analysis API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawReport(pub Value);

impl RawReport {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `lighthouseResult` node, if present and an object.
    pub fn lighthouse(&self) -> Option<LighthouseView<'_>> {
        self.0
            .get("lighthouseResult")
            .and_then(Value::as_object)
            .map(|node| LighthouseView { node })
    }
}

impl From<Value> for RawReport {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Borrowed view of `lighthouseResult`.
#[derive(Debug, Clone, Copy)]
pub struct LighthouseView<'a> {
    node: &'a Map<String, Value>,
}

impl<'a> LighthouseView<'a> {
    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.node.get(key).and_then(Value::as_str)
    }

    pub fn requested_url(&self) -> Option<&'a str> {
        self.str_field("requestedUrl")
    }

    pub fn final_url(&self) -> Option<&'a str> {
        self.str_field("finalUrl")
    }

    /// `fetchTime` as text; numeric values are rendered as their JSON text.
    pub fn fetch_time(&self) -> Option<String> {
        match self.node.get("fetchTime")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn categories(&self) -> Option<&'a Map<String, Value>> {
        self.node.get("categories").and_then(Value::as_object)
    }

    /// 0-1 score of a category, `None` when absent or not a number.
    pub fn category_score(&self, key: &str) -> Option<f64> {
        self.categories()?
            .get(key)?
            .get("score")
            .and_then(Value::as_f64)
    }

    /// Audit ids referenced by a category, in payload order.
    pub fn audit_refs(&self, key: &str) -> Vec<&'a str> {
        self.categories()
            .and_then(|c| c.get(key))
            .and_then(|c| c.get("auditRefs"))
            .and_then(Value::as_array)
            .map(|refs| {
                refs.iter()
                    .filter_map(|r| r.get("id").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn audits(&self) -> Option<&'a Map<String, Value>> {
        self.node.get("audits").and_then(Value::as_object)
    }

    /// Materialize one audit by id.
    pub fn audit(&self, id: &str) -> Option<Audit> {
        self.audits()?
            .get(id)
            .filter(|v| v.is_object())
            .map(|v| Audit::from_value(id, v))
    }

    /// Materialize every audit in the payload.
    pub fn all_audits(&self) -> Vec<Audit> {
        self.audits()
            .map(|audits| {
                audits
                    .iter()
                    .filter(|(_, v)| v.is_object())
                    .map(|(id, v)| Audit::from_value(id, v))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First record of `audits.<id>.details.items`.
    pub fn first_detail_item(&self, id: &str) -> Option<&'a Map<String, Value>> {
        self.audits()?
            .get(id)?
            .get("details")?
            .get("items")?
            .as_array()?
            .first()?
            .as_object()
    }
}

/// Whether an audit's score is meaningful or advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreDisplayMode {
    Binary,
    Numeric,
    Manual,
    Informative,
    NotApplicable,
    Error,
    Unknown(String),
}

impl ScoreDisplayMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("binary") => Self::Binary,
            Some("numeric") => Self::Numeric,
            Some("manual") => Self::Manual,
            Some("informative") => Self::Informative,
            Some("notApplicable") => Self::NotApplicable,
            Some("error") => Self::Error,
            Some(other) => Self::Unknown(other.to_string()),
            None => Self::Unknown(String::new()),
        }
    }

    /// Advisory modes never produce a recommendation.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::Manual | Self::Informative | Self::NotApplicable)
    }
}

/// One audit record lifted out of the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Audit {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Score when the payload carries a JSON number.
    pub score: Option<f64>,
    /// Score exactly as found, for non-numeric encodings.
    pub raw_score: Value,
    pub display_mode: ScoreDisplayMode,
    pub numeric_value: Option<f64>,
}

impl Audit {
    pub fn from_value(id: &str, value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let raw_score = value.get("score").cloned().unwrap_or(Value::Null);
        Self {
            id: id.to_string(),
            title: text("title"),
            description: text("description"),
            score: raw_score.as_f64(),
            raw_score,
            display_mode: ScoreDisplayMode::parse(
                value.get("scoreDisplayMode").and_then(Value::as_str),
            ),
            numeric_value: value.get("numericValue").and_then(Value::as_f64),
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.score == Some(1.0)
    }

    /// Title and description both present and non-empty.
    pub fn has_text(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.title) && filled(&self.description)
    }
}
