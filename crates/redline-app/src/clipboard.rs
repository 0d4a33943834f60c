//! System clipboard access

use redline_core::prelude::*;

/// Copy `text` to the system clipboard. Blocking; run it off the async
/// runtime.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    clipboard.set_text(text).map_err(clipboard_error)?;
    debug!("Copied {} bytes to the clipboard", text.len());
    Ok(())
}

fn clipboard_error(e: arboard::Error) -> Error {
    let message = match e {
        arboard::Error::ClipboardNotSupported => {
            "No clipboard available in this session".to_string()
        }
        arboard::Error::ClipboardOccupied => "The clipboard is busy, try again".to_string(),
        other => other.to_string(),
    };
    Error::clipboard(message)
}
