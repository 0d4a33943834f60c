//! Status bar widget
//!
//! One row: the current notice, or the keybindings for the active mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use redline_app::state::{AppState, NoticeLevel, UiMode};

use crate::theme::{styles, Palette};

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("o", "open"),
    ("Enter", "review"),
    ("x", "clear"),
    ("t", "theme"),
    ("j", "raw"),
    ("y", "copy"),
    ("f", "flags"),
    ("e", "json"),
    ("h", "html"),
    ("q", "quit"),
];

const PATH_INPUT_HINTS: &[(&str, &str)] = &[
    ("Enter", "pick"),
    ("Esc", "cancel"),
    ("Ctrl+U", "clear"),
];

/// Status bar widget showing the notice or keybinding hints
pub struct StatusBar<'a> {
    state: &'a AppState,
    palette: &'a Palette,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let p = self.palette;
        let hints = match self.state.ui_mode {
            UiMode::Normal => NORMAL_HINTS,
            UiMode::PathInput => PATH_INPUT_HINTS,
        };

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, styles::keybinding(p)));
            spans.push(Span::styled(format!(" {}", label), styles::text_muted(p)));
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        buf.set_style(area, Style::default().bg(p.popup_bg));

        let line = match &self.state.notice {
            Some(notice) => {
                let style = match notice.level {
                    NoticeLevel::Info => styles::accent_bold(p),
                    NoticeLevel::Error => styles::error(p),
                };
                Line::from(vec![Span::raw(" "), Span::styled(notice.text.clone(), style)])
            }
            None => Line::from(self.hints()),
        };

        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::with_size(100, 1);
        let area = term.area();
        term.render_widget(StatusBar::new(state, &Palette::DARK), area);
        term
    }

    #[test]
    fn test_normal_hints() {
        let term = render(&AppState::new());
        assert!(term.buffer_contains("o open"));
        assert!(term.buffer_contains("t theme"));
        assert!(term.buffer_contains("q quit"));
    }

    #[test]
    fn test_path_input_hints() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::PathInput;
        let term = render(&state);
        assert!(term.buffer_contains("Esc cancel"));
        assert!(!term.buffer_contains("q quit"));
    }

    #[test]
    fn test_notice_replaces_hints() {
        let mut state = AppState::new();
        state.set_notice("Copied summary");
        let term = render(&state);
        assert!(term.buffer_contains("Copied summary"));
        assert!(!term.buffer_contains("q quit"));
    }

    #[test]
    fn test_error_notice_style() {
        let mut state = AppState::new();
        state.set_error_notice("Clipboard unavailable");
        let term = render(&state);
        assert!(term.buffer_contains("Clipboard unavailable"));
        let cell = &term.buffer()[(1, 0)];
        assert_eq!(cell.fg, Palette::DARK.status_red);
    }
}
