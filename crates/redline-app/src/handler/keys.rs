//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::PathInput => handle_key_path_input(state, key),
    }
}

/// Handle key events in normal mode
fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::CharCtrl('c') => Some(Message::Quit),

        // ─────────────────────────────────────────────────────────
        // File
        // ─────────────────────────────────────────────────────────
        InputKey::Char('o') => Some(Message::OpenPathInput),
        InputKey::Char('x') => Some(Message::ClearSelection),
        InputKey::Enter | InputKey::Char('s') => Some(Message::Submit),

        // ─────────────────────────────────────────────────────────
        // View
        // ─────────────────────────────────────────────────────────
        InputKey::Char('t') => Some(Message::ToggleTheme),
        InputKey::Char('j') => Some(Message::ToggleRaw),

        // ─────────────────────────────────────────────────────────
        // Copy / Export
        // ─────────────────────────────────────────────────────────
        InputKey::Char('y') => Some(Message::CopySummary),
        InputKey::Char('f') => Some(Message::CopyFlags),
        InputKey::Char('e') => Some(Message::ExportJson),
        InputKey::Char('h') => Some(Message::ExportHtml),

        // ─────────────────────────────────────────────────────────
        // Scrolling
        // ─────────────────────────────────────────────────────────
        InputKey::Up => Some(Message::ScrollUp),
        InputKey::Down => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::Home => Some(Message::ScrollToTop),
        InputKey::End => Some(Message::ScrollToBottom),

        _ => None,
    }
}

/// Handle key events while the path prompt is open
fn handle_key_path_input(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelPathInput),
        InputKey::Enter => Some(Message::SubmitPathInput),

        InputKey::Backspace => {
            let mut text = state.path_input.clone();
            text.pop();
            Some(Message::PathInput { text })
        }

        // Clear all input
        InputKey::CharCtrl('u') => Some(Message::PathInput {
            text: String::new(),
        }),

        InputKey::Char(c) => {
            let mut text = state.path_input.clone();
            text.push(c);
            Some(Message::PathInput { text })
        }

        // Force quit even in the prompt
        InputKey::CharCtrl('c') => Some(Message::Quit),

        _ => None,
    }
}
