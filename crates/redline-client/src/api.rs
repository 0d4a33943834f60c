//! Service seam used by the application layer
//!
//! The app talks to the review service through [`ReviewApi`] so tests can
//! substitute an in-memory implementation for the HTTP client.

use serde_json::Value;

use redline_core::prelude::*;
use redline_core::{HealthReport, SelectedFile};

use crate::client::ReviewClient;
use crate::upload::ProgressSender;

#[trait_variant::make(ReviewApi: Send)]
pub trait LocalReviewApi {
    /// Probe service health; never fails
    async fn health(&self) -> HealthReport;

    /// Upload a document and return the raw response body
    async fn review(&self, file: &SelectedFile, progress: ProgressSender) -> Result<Value>;
}

impl ReviewApi for ReviewClient {
    async fn health(&self) -> HealthReport {
        ReviewClient::health(self).await
    }

    async fn review(&self, file: &SelectedFile, progress: ProgressSender) -> Result<Value> {
        ReviewClient::review(self, file, progress).await
    }
}
