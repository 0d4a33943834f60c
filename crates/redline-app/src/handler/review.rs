//! Review lifecycle handlers: submit, progress, settle

use redline_client::UploadProgress;
use redline_core::prelude::*;
use redline_core::{normalize, validate, HealthReport};
use serde_json::Value;

use crate::state::{AppState, UploadState};

use super::{UpdateAction, UpdateResult};

/// Validate the selection and start the upload.
///
/// A second submit while one is in flight is a no-op. Validation failures
/// are shown inline and nothing is sent.
pub(super) fn handle_submit(state: &mut AppState) -> UpdateResult {
    if state.upload.is_in_flight() {
        debug!("Submit ignored: upload already in flight");
        return UpdateResult::none();
    }

    let Some(file) = state.selected.clone() else {
        state.set_notice("Choose a file first (press o or drop one here)");
        return UpdateResult::none();
    };

    if let Err(e) = validate(&file) {
        info!("Rejected {}: {}", file.name, e);
        state.last_error = Some(e.to_string());
        return UpdateResult::none();
    }

    state.last_error = None;
    state.result = None;
    state.result_source = Some(file.name.clone());
    state.result_view.reset();
    state.upload = UploadState::Uploading { percent: 0 };

    UpdateResult::action(UpdateAction::StartReview { file })
}

pub(super) fn handle_upload_progress(state: &mut AppState, progress: UploadProgress) -> UpdateResult {
    if !state.upload.is_in_flight() {
        return UpdateResult::none();
    }

    state.upload = if progress.is_complete() {
        UploadState::Analyzing
    } else {
        UploadState::Uploading {
            percent: progress.percent().min(99),
        }
    };
    UpdateResult::none()
}

pub(super) fn handle_review_completed(state: &mut AppState, body: Value) -> UpdateResult {
    state.upload = UploadState::Idle;
    state.last_error = None;
    state.result = Some(normalize(body));
    state.result_view.reset();
    state.set_notice("Review complete");
    UpdateResult::none()
}

pub(super) fn handle_review_failed(
    state: &mut AppState,
    error: String,
    unreachable: bool,
) -> UpdateResult {
    state.upload = UploadState::Idle;
    state.last_error = Some(error);
    if unreachable {
        state.health = Some(HealthReport::unreachable());
    }
    UpdateResult::none()
}
