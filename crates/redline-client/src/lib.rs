//! # redline-client - Review Service Client
//!
//! HTTP access to the review service:
//!
//! - [`ReviewClient::health()`] - `GET /health`, mapped to a [`HealthReport`](redline_core::HealthReport)
//! - [`ReviewClient::review()`] - multipart `POST /review` with upload progress
//! - [`ReviewApi`] - trait seam for substituting the client in tests

pub mod api;
pub mod client;
pub mod upload;

pub use api::{LocalReviewApi, ReviewApi};
pub use client::{normalize_base_url, ReviewClient};
pub use upload::{ProgressSender, UploadProgress, CHUNK_SIZE};
