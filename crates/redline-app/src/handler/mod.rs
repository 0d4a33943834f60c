//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `review`: Submit, progress and settling of the review upload
//! - `output`: Clipboard and export handlers

pub(crate) mod keys;
pub(crate) mod output;
pub(crate) mod review;
pub(crate) mod update;


use std::path::PathBuf;

use redline_core::{SelectedFile, Theme};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Stat and sniff a path, answering with `FilePicked` or `FilePickFailed`
    InspectFile { path: PathBuf },

    /// Upload a validated file; always settles with `ReviewCompleted` or
    /// `ReviewFailed`
    StartReview { file: SelectedFile },

    /// Write the theme choice to the preference store
    PersistTheme(Theme),

    /// Put text on the system clipboard
    CopyToClipboard { text: String, what: String },

    /// Write an export file
    WriteExport { path: PathBuf, contents: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
