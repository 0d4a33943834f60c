//! Terminal setup and restoration

use std::io::stdout;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use redline_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Turn on bracketed paste so dropped files arrive as one paste event
pub fn enable_paste() -> Result<()> {
    execute!(stdout(), EnableBracketedPaste)
        .map_err(|e| Error::terminal(format!("Failed to enable bracketed paste: {}", e)))
}

pub fn disable_paste() {
    if let Err(e) = execute!(stdout(), DisableBracketedPaste) {
        warn!("Failed to disable bracketed paste: {}", e);
    }
}
