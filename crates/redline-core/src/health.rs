//! Review service health states and the mapping from `/health` bodies.

use serde::Serialize;
use serde_json::Value;

/// What the health badge shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// `ok` and the model is loaded
    Healthy,
    /// `ok` but the model is still loading (or failed to load)
    Pending,
    /// The service answered but reported itself not ok
    Error,
    /// No JSON answer at all
    Unreachable,
}

impl HealthStatus {
    /// Map a `/health` JSON body to a status.
    ///
    /// Only a literal `true` counts for either field.
    pub fn from_body(body: &Value) -> Self {
        let ok = body.get("ok").and_then(Value::as_bool).unwrap_or(false);
        let loaded = body
            .get("model_loaded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        match (ok, loaded) {
            (true, true) => HealthStatus::Healthy,
            (true, false) => HealthStatus::Pending,
            (false, _) => HealthStatus::Error,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Model ready",
            HealthStatus::Pending => "Model loading",
            HealthStatus::Error => "API error",
            HealthStatus::Unreachable => "Unreachable",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// One probe result: the status plus the service's load error, if it sent one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub load_error: Option<String>,
}

impl HealthReport {
    pub fn from_body(body: &Value) -> Self {
        Self {
            status: HealthStatus::from_body(body),
            load_error: body
                .get("load_error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            status: HealthStatus::Unreachable,
            load_error: None,
        }
    }
}
