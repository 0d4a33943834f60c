//! Review service HTTP client
//!
//! One [`ReviewClient`] per session. It owns the `reqwest` connection pool
//! and the resolved API base URL, and exposes the two calls the front-end
//! makes: `GET /health` and `POST /review`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde_json::Value;
use url::Url;

use redline_core::prelude::*;
use redline_core::{HealthReport, SelectedFile};

use crate::upload::{progress_stream, ProgressSender};

/// Version of the client, used in the User-Agent header
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest server error body kept in an error message
const MAX_ERROR_BODY: usize = 2_000;

/// HTTP client for the review service
#[derive(Debug, Clone)]
pub struct ReviewClient {
    base_url: String,
    client: Client,
}

impl ReviewClient {
    /// Create a client for an API base such as `http://127.0.0.1:8000`.
    ///
    /// Fails when the base is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("redline/{VERSION}"))
                .unwrap_or_else(|_| HeaderValue::from_static("redline")),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Probe `GET /health`.
    ///
    /// Never fails: a transport error or a body that is not JSON maps to
    /// [`HealthStatus::Unreachable`](redline_core::HealthStatus::Unreachable).
    pub async fn health(&self) -> HealthReport {
        let url = self.endpoint("health");
        let response = match self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Health probe to {} failed: {}", url, e);
                return HealthReport::unreachable();
            }
        };

        match response.json::<Value>().await {
            Ok(body) => HealthReport::from_body(&body),
            Err(e) => {
                debug!("Health probe returned a non-JSON body: {}", e);
                HealthReport::unreachable()
            }
        }
    }

    /// Upload a document to `POST /review` as multipart field `file`.
    ///
    /// Progress is reported on `progress` as the body is streamed. Returns the
    /// raw JSON body; shape resolution is left to
    /// [`normalize`](redline_core::normalize).
    pub async fn review(&self, file: &SelectedFile, progress: ProgressSender) -> Result<Value> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| Error::unreadable(&file.path, e.to_string()))?;
        let total = bytes.len() as u64;

        let part = Part::stream_with_length(Body::wrap_stream(progress_stream(bytes, progress)), total)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| Error::transport(format!("Invalid content type {}: {}", file.mime, e)))?;
        let form = Form::new().part("file", part);

        let url = self.endpoint("review");
        info!("Uploading {} ({} bytes) to {}", file.name, total, url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| to_transport_error(&url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| to_transport_error(&url, e))?;

        if !status.is_success() {
            warn!("Review request failed with {}", status);
            return Err(Error::server(status.as_u16(), error_body_text(&text)));
        }

        serde_json::from_str(&text).map_err(|_| {
            Error::server(
                status.as_u16(),
                format!("Response was not JSON: {}", truncate(&text)),
            )
        })
    }
}

/// Validate an API base and strip trailing slashes
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| Error::config(format!("Invalid API base '{}': {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::config(format!(
            "Invalid API base '{}': unsupported scheme {}",
            raw, other
        ))),
    }
}

/// Convert a reqwest error into a transport error with a readable message
fn to_transport_error(url: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::transport(format!("Request to {} timed out", url))
    } else if e.is_connect() {
        Error::transport(format!("Could not connect to {}", url))
    } else {
        Error::transport(e.to_string())
    }
}

/// Pull the `detail` message out of a FastAPI-style error body, falling
/// back to the raw text
fn error_body_text(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => match obj.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            _ => truncate(text),
        },
        _ if text.trim().is_empty() => "(empty response body)".to_string(),
        _ => truncate(text),
    }
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_ERROR_BODY {
        return text.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
