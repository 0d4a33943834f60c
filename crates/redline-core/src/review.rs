//! Review responses and their normalization into one canonical view.
//!
//! The review service answers in one of two shapes:
//!
//! - structured: `{ "summary": "...", "flags": [...], "meta": {...} }`
//! - raw: `{ "result": "<string>" }`, where the string may itself be a
//!   JSON-encoded structured body or plain prose
//!
//! [`ReviewResponse::classify`] decides which shape a body has and
//! [`normalize`] reduces any body to a [`NormalizedResult`]. Normalization is
//! total: malformed input degrades instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Flags
// ─────────────────────────────────────────────────────────────────────────────

/// Severity attached to a flag by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Med,
    High,
    /// Anything the model invented that is not one of the three levels
    Other(String),
}

impl Severity {
    /// Parse a severity label, case-insensitively
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Severity::Low,
            "med" | "medium" | "moderate" => Severity::Med,
            "high" => Severity::High,
            _ => Severity::Other(raw.trim().to_string()),
        }
    }

    /// Read a severity from any JSON value; null and empty strings mean absent
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(Severity::parse(s)),
            other => Some(Severity::Other(other.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Severity::Low => "low",
            Severity::Med => "med",
            Severity::High => "high",
            Severity::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single issue the service found in the document.
///
/// Every field is optional; renderers substitute placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub issue: Option<String>,
    pub severity: Option<Severity>,
    pub clause: Option<String>,
    pub note: Option<String>,
}

impl Flag {
    /// Build a flag from one element of the `flags` array.
    ///
    /// The live service sends bare strings; richer models send objects with
    /// `issue`/`reason`, `severity`, `clause`/`section` and `note`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self {
                issue: non_empty(s),
                ..Self::default()
            },
            Value::Object(obj) => Self {
                issue: first_text(obj, &["issue", "reason", "title"]),
                severity: obj.get("severity").and_then(Severity::from_value),
                clause: first_text(obj, &["clause", "section"]),
                note: first_text(obj, &["note"]),
            },
            Value::Null => Self::default(),
            other => Self {
                issue: Some(other.to_string()),
                ..Self::default()
            },
        }
    }

    /// Issue text, or a placeholder when the model left it out
    pub fn issue_or_placeholder(&self) -> &str {
        self.issue.as_deref().unwrap_or("(no description)")
    }

    /// Severity label, `?` when absent
    pub fn severity_label(&self) -> &str {
        self.severity.as_ref().map(Severity::label).unwrap_or("?")
    }

    /// The metadata line shown under the issue: severity always, clause
    /// only when present
    pub fn meta_line(&self) -> String {
        match &self.clause {
            Some(clause) => format!("severity: {} · clause: {}", self.severity_label(), clause),
            None => format!("severity: {}", self.severity_label()),
        }
    }
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        other => Some(other.to_string()),
    })
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// The shape of a review response body
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewResponse {
    /// Already structured: has a `flags` or `summary` key
    Structured(Map<String, Value>),
    /// `{ "result": "<string>" }`
    Raw(String),
    /// Neither shape; only displayable as raw JSON
    Opaque(Value),
}

impl ReviewResponse {
    /// Decide which shape a response body has
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Object(obj) if obj.contains_key("flags") || obj.contains_key("summary") => {
                ReviewResponse::Structured(obj)
            }
            Value::Object(mut obj) if matches!(obj.get("result"), Some(Value::String(_))) => {
                match obj.remove("result") {
                    Some(Value::String(result)) => ReviewResponse::Raw(result),
                    _ => ReviewResponse::Opaque(Value::Object(obj)),
                }
            }
            other => ReviewResponse::Opaque(other),
        }
    }
}

/// Canonical, render-ready review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReport {
    pub summary: String,
    pub flags: Vec<Flag>,
    pub meta: Map<String, Value>,
    /// The full normalized document, exported as-is
    pub document: Value,
}

impl ReviewReport {
    /// Read a report out of a structured object without failing on bad fields
    pub fn from_object(obj: Map<String, Value>) -> Self {
        let summary = match obj.get("summary") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let flags = match obj.get("flags") {
            Some(Value::Array(items)) => items.iter().map(Flag::from_value).collect(),
            _ => Vec::new(),
        };
        let meta = match obj.get("meta") {
            Some(Value::Object(meta)) => meta.clone(),
            _ => Map::new(),
        };

        Self {
            summary,
            flags,
            meta,
            document: Value::Object(obj),
        }
    }

    /// Report synthesized from a `result` string that was not JSON
    pub fn from_plain_text(text: String) -> Self {
        let mut obj = Map::new();
        obj.insert("summary".to_string(), Value::String(text.clone()));
        obj.insert("flags".to_string(), Value::Array(Vec::new()));
        Self {
            summary: text,
            flags: Vec::new(),
            meta: Map::new(),
            document: Value::Object(obj),
        }
    }

    /// The `flags` array exactly as the service sent it (`[]` when absent)
    pub fn flags_json(&self) -> Value {
        match self.document.get("flags") {
            Some(flags @ Value::Array(_)) => flags.clone(),
            _ => Value::Array(Vec::new()),
        }
    }

    /// Known metadata fields as display pairs, in a stable order
    pub fn meta_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(model) = self.meta.get("model_id").and_then(Value::as_str) {
            pairs.push(("model", model.to_string()));
        }
        if let Some(adapter) = self.meta.get("adapter").and_then(Value::as_str) {
            pairs.push(("adapter", adapter.to_string()));
        }
        if let Some(latency) = self.meta.get("latency_ms").and_then(Value::as_u64) {
            pairs.push(("latency", format!("{} ms", latency)));
        }
        match self.meta.get("tokens") {
            Some(Value::Number(n)) => pairs.push(("tokens", n.to_string())),
            Some(Value::Object(usage)) => {
                let parts: Vec<String> = usage
                    .iter()
                    .filter_map(|(k, v)| v.as_u64().map(|n| format!("{} {}", k, n)))
                    .collect();
                if !parts.is_empty() {
                    pairs.push(("tokens", parts.join(", ")));
                }
            }
            _ => {}
        }
        pairs
    }
}

/// Result of normalizing any response body
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    Report(ReviewReport),
    /// No summary or flags could be found; show the raw body only
    Opaque(Value),
}

impl NormalizedResult {
    pub fn report(&self) -> Option<&ReviewReport> {
        match self {
            NormalizedResult::Report(report) => Some(report),
            NormalizedResult::Opaque(_) => None,
        }
    }

    /// What gets exported: the normalized document, or the raw body
    pub fn export_value(&self) -> &Value {
        match self {
            NormalizedResult::Report(report) => &report.document,
            NormalizedResult::Opaque(value) => value,
        }
    }
}

/// Reduce any response body to a renderable result. Never fails.
pub fn normalize(body: Value) -> NormalizedResult {
    match ReviewResponse::classify(body) {
        ReviewResponse::Structured(obj) => NormalizedResult::Report(ReviewReport::from_object(obj)),
        ReviewResponse::Raw(result) => match serde_json::from_str::<Value>(&result) {
            Ok(Value::Object(obj)) => NormalizedResult::Report(ReviewReport::from_object(obj)),
            Ok(_) | Err(_) => {
                tracing::debug!("review result is not a JSON object; using it as the summary");
                NormalizedResult::Report(ReviewReport::from_plain_text(result))
            }
        },
        ReviewResponse::Opaque(value) => NormalizedResult::Opaque(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_passthrough() {
        let body = json!({"flags": [{"clause": "A", "reason": "bad"}], "summary": "ok"});
        let result = normalize(body.clone());

        let report = result.report().expect("structured body yields a report");
        assert_eq!(report.summary, "ok");
        assert_eq!(report.flags.len(), 1);
        assert_eq!(report.flags[0].issue.as_deref(), Some("bad"));
        assert_eq!(report.flags[0].clause.as_deref(), Some("A"));
        assert_eq!(report.document, body);
    }

    #[test]
    fn test_result_string_with_embedded_json() {
        let body = json!({"result": "{\"summary\":\"hi\",\"flags\":[]}"});
        let report = normalize(body).report().cloned().unwrap();

        assert_eq!(report.summary, "hi");
        assert!(report.flags.is_empty());
        assert_eq!(report.document, json!({"summary": "hi", "flags": []}));
    }

    #[test]
    fn test_result_plain_text_degrades_to_summary() {
        let body = json!({"result": "plain text, not json"});
        let report = normalize(body).report().cloned().unwrap();

        assert_eq!(report.summary, "plain text, not json");
        assert!(report.flags.is_empty());
        assert_eq!(
            report.document,
            json!({"summary": "plain text, not json", "flags": []})
        );
    }

    #[test]
    fn test_result_json_that_is_not_an_object() {
        let report = normalize(json!({"result": "[1, 2]"})).report().cloned().unwrap();
        assert_eq!(report.summary, "[1, 2]");
        assert!(report.flags.is_empty());
    }

    #[test]
    fn test_empty_object_is_opaque() {
        assert_eq!(normalize(json!({})), NormalizedResult::Opaque(json!({})));
    }

    #[test]
    fn test_non_object_bodies_are_opaque() {
        for body in [json!(null), json!(42), json!("text"), json!([1, 2, 3])] {
            assert!(matches!(normalize(body), NormalizedResult::Opaque(_)));
        }
    }

    #[test]
    fn test_non_string_result_is_opaque() {
        let body = json!({"result": {"summary": "nested"}});
        assert_eq!(normalize(body.clone()), NormalizedResult::Opaque(body));
    }

    #[test]
    fn test_summary_key_alone_is_structured() {
        let report = normalize(json!({"summary": "only"})).report().cloned().unwrap();
        assert_eq!(report.summary, "only");
        assert!(report.flags.is_empty());
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let body = json!({"summary": 12, "flags": "not a list", "meta": []});
        let report = normalize(body).report().cloned().unwrap();
        assert_eq!(report.summary, "12");
        assert!(report.flags.is_empty());
        assert!(report.meta.is_empty());
        assert_eq!(report.flags_json(), json!([]));
    }

    #[test]
    fn test_null_summary_is_empty() {
        let report = normalize(json!({"summary": null, "flags": null}))
            .report()
            .cloned()
            .unwrap();
        assert_eq!(report.summary, "");
        assert!(report.flags.is_empty());
    }

    #[test]
    fn test_string_flags_from_live_service() {
        let body = json!({
            "flags": ["Liquidation preference 2x", "Full ratchet anti-dilution"],
            "summary": "Investor friendly",
            "meta": {"model_id": "auto", "adapter": null, "latency_ms": 912}
        });
        let report = normalize(body).report().cloned().unwrap();

        assert_eq!(report.flags[0].issue.as_deref(), Some("Liquidation preference 2x"));
        assert_eq!(report.flags[1].severity, None);
        assert_eq!(
            report.meta_pairs(),
            vec![("model", "auto".to_string()), ("latency", "912 ms".to_string())]
        );
    }

    #[test]
    fn test_flag_field_aliases() {
        let flag = Flag::from_value(&json!({
            "issue": "Board control",
            "severity": "HIGH",
            "section": "4.2",
            "note": "Seed round"
        }));
        assert_eq!(flag.issue.as_deref(), Some("Board control"));
        assert_eq!(flag.severity, Some(Severity::High));
        assert_eq!(flag.clause.as_deref(), Some("4.2"));
        assert_eq!(flag.note.as_deref(), Some("Seed round"));
    }

    #[test]
    fn test_flag_meta_line() {
        let with_clause = Flag {
            issue: Some("x".into()),
            severity: None,
            clause: Some("7".into()),
            note: None,
        };
        assert_eq!(with_clause.meta_line(), "severity: ? · clause: 7");

        let without_clause = Flag {
            severity: Some(Severity::Low),
            ..Flag::default()
        };
        assert_eq!(without_clause.meta_line(), "severity: low");
        assert_eq!(without_clause.issue_or_placeholder(), "(no description)");
    }

    #[test]
    fn test_odd_flag_values() {
        assert_eq!(Flag::from_value(&json!(null)), Flag::default());
        assert_eq!(Flag::from_value(&json!(3)).issue.as_deref(), Some("3"));
        assert_eq!(Flag::from_value(&json!({"severity": 2})).severity_label(), "2");
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("MEDIUM"), Severity::Med);
        assert_eq!(Severity::parse(" low "), Severity::Low);
        assert_eq!(
            Severity::parse("critical"),
            Severity::Other("critical".to_string())
        );
    }

    #[test]
    fn test_export_value() {
        let opaque = normalize(json!({"detail": "x"}));
        assert_eq!(opaque.export_value(), &json!({"detail": "x"}));

        let report = normalize(json!({"result": "prose"}));
        assert_eq!(report.export_value()["summary"], json!("prose"));
    }

    #[test]
    fn test_meta_pairs_tokens() {
        let report = ReviewReport::from_object(
            json!({"summary": "", "meta": {"tokens": {"prompt": 1200, "completion": 300}}})
                .as_object()
                .unwrap()
                .clone(),
        );
        assert_eq!(
            report.meta_pairs(),
            vec![("tokens", "completion 300, prompt 1200".to_string())]
        );

        let report = ReviewReport::from_object(
            json!({"summary": "", "meta": {"tokens": 512}}).as_object().unwrap().clone(),
        );
        assert_eq!(report.meta_pairs(), vec![("tokens", "512".to_string())]);
    }
}
