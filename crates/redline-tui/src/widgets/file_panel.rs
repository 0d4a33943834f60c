//! File panel widget
//!
//! Shows the selected document, the upload gauge while a review is in
//! flight and the inline error from the last failed action.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Widget},
};
use redline_app::state::{AppState, UploadState};

use crate::theme::{styles, Palette};

pub struct FilePanel<'a> {
    state: &'a AppState,
    palette: &'a Palette,
}

impl<'a> FilePanel<'a> {
    pub fn new(state: &'a AppState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    fn file_line(&self) -> Line<'a> {
        let p = self.palette;
        match &self.state.selected {
            Some(file) => Line::from(vec![
                Span::raw(" "),
                Span::styled(file.name.as_str(), styles::text_bold(p)),
                Span::styled(
                    format!("  {} · {}", file.display_size(), file.mime),
                    styles::text_muted(p),
                ),
            ]),
            None => Line::from(vec![
                Span::raw(" "),
                Span::styled("No file selected", styles::text_secondary(p)),
            ]),
        }
    }

    /// Hint shown on the progress row when nothing is uploading
    fn idle_hint(&self) -> Line<'a> {
        let p = self.palette;
        let (key, rest) = if self.state.selected.is_some() {
            ("Enter", " to submit for review")
        } else {
            ("o", " to enter a path, or drop a file onto the terminal")
        };
        Line::from(vec![
            Span::styled(" Press ", styles::text_muted(p)),
            Span::styled(key, styles::keybinding(p)),
            Span::styled(rest, styles::text_muted(p)),
        ])
    }
}

impl Widget for FilePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let block = styles::glass_block(p, false).title(Span::styled(" Document ", styles::text_secondary(p)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        buf.set_line(inner.x, inner.y, &self.file_line(), inner.width);

        if inner.height >= 2 {
            let row = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            match self.state.upload {
                UploadState::Uploading { percent } => {
                    Gauge::default()
                        .gauge_style(Style::default().fg(p.accent).bg(p.popup_bg))
                        .percent(u16::from(percent.min(100)))
                        .label(format!("Uploading {}%", percent))
                        .render(row, buf);
                }
                UploadState::Analyzing => {
                    let line = Line::from(vec![
                        Span::raw(" "),
                        Span::styled("Analyzing…", styles::accent_bold(p)),
                    ]);
                    buf.set_line(row.x, row.y, &line, row.width);
                }
                UploadState::Idle => {
                    buf.set_line(row.x, row.y, &self.idle_hint(), row.width);
                }
            }
        }

        if inner.height >= 3 {
            if let Some(error) = &self.state.last_error {
                let line = Line::from(vec![
                    Span::raw(" "),
                    Span::styled(error.as_str(), styles::error(p)),
                ]);
                buf.set_line(inner.x, inner.y + 2, &line, inner.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use redline_core::SelectedFile;
    use std::path::PathBuf;

    fn state_with_file() -> AppState {
        let mut state = AppState::new();
        state.set_picked(SelectedFile {
            path: PathBuf::from("/tmp/deal.pdf"),
            name: "deal.pdf".into(),
            size: 1536,
            mime: "application/pdf".into(),
        });
        state
    }

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::with_size(80, 5);
        term.render_widget(FilePanel::new(state, &Palette::LIGHT), Rect::new(0, 0, 80, 5));
        term
    }

    #[test]
    fn test_empty_panel_shows_hint() {
        let term = render(&AppState::new());
        assert!(term.buffer_contains("No file selected"));
        assert!(term.buffer_contains("drop a file"));
    }

    #[test]
    fn test_selected_file_details() {
        let term = render(&state_with_file());
        assert!(term.line_contains(1, "deal.pdf"));
        assert!(term.line_contains(1, "1.5 KB · application/pdf"));
        assert!(term.line_contains(2, "Enter to submit"));
    }

    #[test]
    fn test_uploading_shows_percent() {
        let mut state = state_with_file();
        state.upload = UploadState::Uploading { percent: 42 };
        let term = render(&state);
        assert!(term.line_contains(2, "Uploading 42%"));
    }

    #[test]
    fn test_analyzing_after_full_upload() {
        let mut state = state_with_file();
        state.upload = UploadState::Analyzing;
        let term = render(&state);
        assert!(term.line_contains(2, "Analyzing…"));
    }

    #[test]
    fn test_inline_error() {
        let mut state = state_with_file();
        state.last_error = Some("Server error (500): boom".into());
        let term = render(&state);
        assert!(term.line_contains(3, "Server error (500): boom"));
        // Selection is kept alongside the error
        assert!(term.line_contains(1, "deal.pdf"));
    }
}
