//! Headless mode - JSON event output for scripts and CI
//!
//! Instead of the TUI, headless mode reviews one file (or probes health once)
//! and writes structured events to stdout.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"file_selected","name":"msa.pdf","size":48213,"mime":"application/pdf","timestamp":1704700001000}
//! {"event":"upload_progress","percent":50,"sent":24107,"total":48213,"timestamp":1704700001020}
//! {"event":"review_completed","flag_count":2,"summary":"...","document":{...},"timestamp":1704700004000}
//! ```

pub mod runner;

use std::io::Write;

use chrono::Utc;
use redline_core::{HealthStatus, SelectedFile};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

pub use runner::{run_health, run_review};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The file was read and passed validation
    FileSelected {
        name: String,
        size: u64,
        mime: String,
        timestamp: i64,
    },

    /// Upload crossed another 10% step
    UploadProgress {
        percent: u8,
        sent: u64,
        total: u64,
        timestamp: i64,
    },

    /// The service answered with a review
    ReviewCompleted {
        flag_count: usize,
        summary: Option<String>,
        document: Value,
        timestamp: i64,
    },

    /// Reading, validating or uploading failed
    ReviewFailed {
        error: String,
        unreachable: bool,
        timestamp: i64,
    },

    /// Result of a single `/health` probe
    Health {
        status: HealthStatus,
        load_error: Option<String>,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as one NDJSON line
    pub fn write_to(&self, out: &mut impl Write) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn file_selected(file: &SelectedFile) -> Self {
        Self::FileSelected {
            name: file.name.clone(),
            size: file.size,
            mime: file.mime.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn upload_progress(percent: u8, sent: u64, total: u64) -> Self {
        Self::UploadProgress {
            percent,
            sent,
            total,
            timestamp: Self::now(),
        }
    }

    pub fn review_completed(flag_count: usize, summary: Option<String>, document: Value) -> Self {
        Self::ReviewCompleted {
            flag_count,
            summary,
            document,
            timestamp: Self::now(),
        }
    }

    pub fn review_failed(error: String, unreachable: bool) -> Self {
        Self::ReviewFailed {
            error,
            unreachable,
            timestamp: Self::now(),
        }
    }

    pub fn health(status: HealthStatus, load_error: Option<String>) -> Self {
        Self::Health {
            status,
            load_error,
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_value(event: &HeadlessEvent) -> Value {
        let mut out = Vec::new();
        event.write_to(&mut out);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        serde_json::from_str(&text).expect("invalid JSON")
    }

    #[test]
    fn test_file_selected_serialization() {
        let file = SelectedFile {
            path: "/tmp/msa.pdf".into(),
            name: "msa.pdf".into(),
            size: 4096,
            mime: "application/pdf".into(),
        };
        let value = to_value(&HeadlessEvent::file_selected(&file));

        assert_eq!(value["event"], "file_selected");
        assert_eq!(value["name"], "msa.pdf");
        assert_eq!(value["size"], 4096);
        assert_eq!(value["mime"], "application/pdf");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_upload_progress_serialization() {
        let value = to_value(&HeadlessEvent::upload_progress(40, 400, 1000));

        assert_eq!(value["event"], "upload_progress");
        assert_eq!(value["percent"], 40);
        assert_eq!(value["sent"], 400);
        assert_eq!(value["total"], 1000);
    }

    #[test]
    fn test_review_completed_serialization() {
        let document = json!({"summary": "ok", "flags": []});
        let value = to_value(&HeadlessEvent::review_completed(
            0,
            Some("ok".into()),
            document.clone(),
        ));

        assert_eq!(value["event"], "review_completed");
        assert_eq!(value["flag_count"], 0);
        assert_eq!(value["summary"], "ok");
        assert_eq!(value["document"], document);
    }

    #[test]
    fn test_review_failed_serialization() {
        let value = to_value(&HeadlessEvent::review_failed("boom".into(), true));

        assert_eq!(value["event"], "review_failed");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["unreachable"], true);
    }

    #[test]
    fn test_health_serialization() {
        let value = to_value(&HeadlessEvent::health(
            HealthStatus::Pending,
            Some("loading".into()),
        ));

        assert_eq!(value["event"], "health");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["load_error"], "loading");
    }
}
