//! Clipboard and export handlers
//!
//! All of them operate on the current normalized result. The actual I/O
//! happens in actions; these handlers only build the payloads.

use chrono::Local;

use redline_core::{export_file_name, html_report, json_export, NormalizedResult};

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

const NO_RESULT: &str = "No review yet";

pub(super) fn handle_copy_summary(state: &mut AppState) -> UpdateResult {
    let text = match &state.result {
        Some(NormalizedResult::Report(report)) => report.summary.clone(),
        Some(NormalizedResult::Opaque(_)) => {
            state.set_notice("This response has no summary");
            return UpdateResult::none();
        }
        None => {
            state.set_notice(NO_RESULT);
            return UpdateResult::none();
        }
    };

    UpdateResult::action(UpdateAction::CopyToClipboard {
        text,
        what: "summary".to_string(),
    })
}

pub(super) fn handle_copy_flags(state: &mut AppState) -> UpdateResult {
    let flags = match &state.result {
        Some(NormalizedResult::Report(report)) => report.flags_json(),
        Some(NormalizedResult::Opaque(_)) => serde_json::Value::Array(Vec::new()),
        None => {
            state.set_notice(NO_RESULT);
            return UpdateResult::none();
        }
    };

    match serde_json::to_string_pretty(&flags) {
        Ok(text) => UpdateResult::action(UpdateAction::CopyToClipboard {
            text,
            what: "flags".to_string(),
        }),
        Err(e) => {
            state.set_error_notice(format!("Could not encode flags: {}", e));
            UpdateResult::none()
        }
    }
}

pub(super) fn handle_export_json(state: &mut AppState) -> UpdateResult {
    let Some(result) = &state.result else {
        state.set_notice(NO_RESULT);
        return UpdateResult::none();
    };

    match json_export(result) {
        Ok(contents) => {
            let path = state
                .export_dir
                .join(export_file_name(state.export_stem(), "json"));
            UpdateResult::action(UpdateAction::WriteExport { path, contents })
        }
        Err(e) => {
            state.set_error_notice(format!("Export failed: {}", e));
            UpdateResult::none()
        }
    }
}

pub(super) fn handle_export_html(state: &mut AppState) -> UpdateResult {
    let Some(result) = &state.result else {
        state.set_notice(NO_RESULT);
        return UpdateResult::none();
    };

    let contents = html_report(result, state.result_source.as_deref(), Local::now());
    let path = state
        .export_dir
        .join(export_file_name(state.export_stem(), "html"));
    UpdateResult::action(UpdateAction::WriteExport { path, contents })
}
