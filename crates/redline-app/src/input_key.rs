//! Abstract input key event, independent of terminal library.
//!
//! Converted from `crossterm::event::KeyEvent` at the TUI boundary so the
//! app crate carries no terminal dependency.

/// Abstract input key event, independent of terminal library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key, no modifiers other than Shift
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, Ctrl+u)
    CharCtrl(char),

    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Backspace,
}
