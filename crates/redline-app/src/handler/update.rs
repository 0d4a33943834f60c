//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use redline_core::prelude::*;

use crate::message::Message;
use crate::paste::clean_pasted_path;
use crate::state::{AppPhase, AppState, UiMode};

use super::{keys::handle_key, output, review, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Paste(text) => handle_paste(state, text),

        Message::Tick => {
            state.expire_notice(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // File Selection
        // ─────────────────────────────────────────────────────────
        Message::OpenPathInput => {
            state.ui_mode = UiMode::PathInput;
            state.path_input.clear();
            UpdateResult::none()
        }

        Message::PathInput { text } => {
            state.path_input = text;
            UpdateResult::none()
        }

        Message::SubmitPathInput => {
            let raw = std::mem::take(&mut state.path_input);
            state.ui_mode = UiMode::Normal;
            match clean_pasted_path(&raw) {
                Some(path) => UpdateResult::message(Message::PickPath(path)),
                None => UpdateResult::none(),
            }
        }

        Message::CancelPathInput => {
            state.path_input.clear();
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }

        Message::PickPath(path) => UpdateResult::action(UpdateAction::InspectFile { path }),

        Message::FilePicked(file) => {
            info!("Selected {} ({}, {})", file.name, file.display_size(), file.mime);
            state.set_picked(file);
            UpdateResult::none()
        }

        Message::FilePickFailed { error } => {
            state.last_error = Some(error);
            UpdateResult::none()
        }

        Message::ClearSelection => {
            if state.upload.is_in_flight() {
                state.set_notice("Upload in progress");
            } else {
                state.clear_selection();
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Review
        // ─────────────────────────────────────────────────────────
        Message::Submit => review::handle_submit(state),
        Message::UploadProgress(progress) => review::handle_upload_progress(state, progress),
        Message::ReviewCompleted { body } => review::handle_review_completed(state, body),
        Message::ReviewFailed { error, unreachable } => {
            review::handle_review_failed(state, error, unreachable)
        }

        Message::HealthChecked(report) => {
            if state.health.as_ref().map(|h| h.status) != Some(report.status) {
                debug!("Health is now {:?}", report.status);
            }
            state.health = Some(report);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Theme
        // ─────────────────────────────────────────────────────────
        Message::ToggleTheme => UpdateResult::message(Message::SetTheme(state.theme.toggled())),

        Message::SetTheme(theme) => {
            state.theme = theme;
            state.theme_locked = true;
            UpdateResult::action(UpdateAction::PersistTheme(theme))
        }

        Message::SystemThemeChanged(theme) => {
            if state.theme_locked {
                debug!("Ignoring system theme change to {}: theme is pinned", theme);
            } else {
                state.theme = theme;
            }
            UpdateResult::none()
        }

        Message::PreferenceSaveFailed { error } => {
            state.set_error_notice(format!("Could not save preferences: {}", error));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Result Actions
        // ─────────────────────────────────────────────────────────
        Message::ToggleRaw => {
            state.show_raw = !state.show_raw;
            state.result_view.reset();
            UpdateResult::none()
        }

        Message::CopySummary => output::handle_copy_summary(state),
        Message::CopyFlags => output::handle_copy_flags(state),
        Message::ExportJson => output::handle_export_json(state),
        Message::ExportHtml => output::handle_export_html(state),

        Message::Copied { what } => {
            state.set_notice(format!("Copied {} to clipboard", what));
            UpdateResult::none()
        }

        Message::ClipboardFailed { error } => {
            state.set_error_notice(error);
            UpdateResult::none()
        }

        Message::Exported { path } => {
            state.set_notice(format!("Saved {}", path.display()));
            UpdateResult::none()
        }

        Message::ExportFailed { error } => {
            state.set_error_notice(format!("Export failed: {}", error));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Scroll Messages
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp => {
            state.result_view.scroll_up(1);
            UpdateResult::none()
        }
        Message::ScrollDown => {
            state.result_view.scroll_down(1);
            UpdateResult::none()
        }
        Message::ScrollToTop => {
            state.result_view.scroll_to_top();
            UpdateResult::none()
        }
        Message::ScrollToBottom => {
            state.result_view.scroll_to_bottom();
            UpdateResult::none()
        }
        Message::PageUp => {
            state.result_view.page_up();
            UpdateResult::none()
        }
        Message::PageDown => {
            state.result_view.page_down();
            UpdateResult::none()
        }
    }
}

/// A paste in the prompt is typed text; anywhere else it is a dropped file
fn handle_paste(state: &mut AppState, text: String) -> UpdateResult {
    match state.ui_mode {
        UiMode::PathInput => {
            if let Some(line) = text.lines().find(|l| !l.trim().is_empty()) {
                state.path_input.push_str(line.trim_end());
            }
            UpdateResult::none()
        }
        UiMode::Normal => match clean_pasted_path(&text) {
            Some(path) => UpdateResult::message(Message::PickPath(path)),
            None => UpdateResult::none(),
        },
    }
}
