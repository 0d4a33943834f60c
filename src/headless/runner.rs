//! Headless mode runner - one review or one health probe, no TUI
//!
//! Both entry points return whether the run succeeded; the binary turns that
//! into the exit code.

use std::io::Write;
use std::path::Path;

use tokio::sync::mpsc;
use tracing::{info, warn};

use redline_client::{ReviewApi, UploadProgress};
use redline_core::{normalize, validate, Error, NormalizedResult, SelectedFile};

use super::HeadlessEvent;

/// Progress events are emitted once per step of this many percent
const PROGRESS_STEP: u8 = 10;

/// Probe `/health` once and emit a `health` event.
///
/// Returns `true` only when the model is loaded and ready.
pub async fn run_health<A: ReviewApi>(api: &A, out: &mut impl Write) -> bool {
    let report = api.health().await;
    info!("Health probe: {:?}", report.status);
    let healthy = report.status.is_healthy();
    HeadlessEvent::health(report.status, report.load_error).write_to(out);
    healthy
}

/// Validate and upload one file, emitting NDJSON events.
///
/// With `json_only` the only output is the normalized document. Returns
/// `true` when the service answered with a review.
pub async fn run_review<A: ReviewApi>(
    api: &A,
    path: &Path,
    json_only: bool,
    out: &mut impl Write,
) -> bool {
    let file = match SelectedFile::from_path(path).and_then(|file| {
        validate(&file)?;
        Ok(file)
    }) {
        Ok(file) => file,
        Err(e) => {
            report_failure(&e, json_only, out);
            return false;
        }
    };

    if !json_only {
        HeadlessEvent::file_selected(&file).write_to(out);
    }

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<UploadProgress>();
    let mut last_step = None;

    let review = api.review(&file, progress_tx);
    tokio::pin!(review);

    let outcome = loop {
        tokio::select! {
            result = &mut review => break result,
            Some(progress) = progress_rx.recv() => {
                if !json_only {
                    emit_step(progress, &mut last_step, out);
                }
            }
        }
    };
    while let Ok(progress) = progress_rx.try_recv() {
        if !json_only {
            emit_step(progress, &mut last_step, out);
        }
    }

    match outcome {
        Ok(body) => {
            let result = normalize(body);
            if json_only {
                write_document(&result, out);
            } else {
                let (flag_count, summary) = match result.report() {
                    Some(report) => (report.flags.len(), Some(report.summary.clone())),
                    None => (0, None),
                };
                HeadlessEvent::review_completed(flag_count, summary, result.export_value().clone())
                    .write_to(out);
            }
            true
        }
        Err(e) => {
            report_failure(&e, json_only, out);
            false
        }
    }
}

/// Emit a progress event when the upload crosses into a new step
fn emit_step(progress: UploadProgress, last_step: &mut Option<u8>, out: &mut impl Write) {
    let step = progress.percent() / PROGRESS_STEP * PROGRESS_STEP;
    if last_step.is_some_and(|last| step <= last) {
        return;
    }
    *last_step = Some(step);
    HeadlessEvent::upload_progress(step, progress.sent, progress.total).write_to(out);
}

fn write_document(result: &NormalizedResult, out: &mut impl Write) {
    match serde_json::to_string_pretty(result.export_value()) {
        Ok(text) => {
            if let Err(e) = writeln!(out, "{}", text) {
                warn!("Failed to write document: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize document: {}", e),
    }
}

fn report_failure(error: &Error, json_only: bool, out: &mut impl Write) {
    warn!("Headless review failed: {}", error);
    if json_only {
        eprintln!("redline: {}", error);
    } else {
        let unreachable = matches!(error, Error::Transport { .. });
        HeadlessEvent::review_failed(error.to_string(), unreachable).write_to(out);
    }
}
