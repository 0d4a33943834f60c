//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use serde_json::Value;

use redline_client::UploadProgress;
use redline_core::{HealthReport, SelectedFile, Theme};

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Text pasted into the terminal (also how a dropped file arrives)
    Paste(String),

    /// Periodic tick from the event loop
    Tick,

    /// Quit (q, Esc, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // File Selection
    // ─────────────────────────────────────────────────────────
    /// Open the path prompt
    OpenPathInput,
    /// Replace the path prompt text
    PathInput { text: String },
    /// Pick the path currently typed into the prompt
    SubmitPathInput,
    /// Close the path prompt without picking
    CancelPathInput,
    /// Inspect a path and select it
    PickPath(PathBuf),
    /// A path was inspected and is now the selection
    FilePicked(SelectedFile),
    /// A path could not be inspected; the previous selection stays
    FilePickFailed { error: String },
    /// Drop the current selection
    ClearSelection,

    // ─────────────────────────────────────────────────────────
    // Review
    // ─────────────────────────────────────────────────────────
    /// Validate and upload the selection
    Submit,
    /// Upload progress from the review task
    UploadProgress(UploadProgress),
    /// The service answered with a JSON body
    ReviewCompleted { body: Value },
    /// The review failed; `unreachable` marks transport failures
    ReviewFailed { error: String, unreachable: bool },

    /// Result of a health probe
    HealthChecked(HealthReport),

    // ─────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────
    /// Flip between light and dark and persist the choice
    ToggleTheme,
    /// Apply and persist an explicit theme
    SetTheme(Theme),
    /// The system appearance changed
    SystemThemeChanged(Theme),
    /// Writing preferences failed
    PreferenceSaveFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Result Actions
    // ─────────────────────────────────────────────────────────
    ToggleRaw,
    CopySummary,
    CopyFlags,
    ExportJson,
    ExportHtml,
    /// Clipboard write finished
    Copied { what: String },
    ClipboardFailed { error: String },
    /// Export file written
    Exported { path: PathBuf },
    ExportFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Scroll Messages
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,
}
