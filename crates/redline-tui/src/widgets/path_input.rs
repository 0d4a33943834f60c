//! Path prompt overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use crate::theme::{styles, Palette};

/// Modal one-line prompt for a document path
pub struct PathInput<'a> {
    text: &'a str,
    palette: &'a Palette,
}

impl<'a> PathInput<'a> {
    pub fn new(text: &'a str, palette: &'a Palette) -> Self {
        Self { text, palette }
    }
}

impl Widget for PathInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        Clear.render(area, buf);

        let block = styles::modal_block(p, " Open document (Enter to pick, Esc to cancel) ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 3 {
            return;
        }

        // Keep the tail of long paths visible next to the cursor
        let room = inner.width.saturating_sub(3) as usize;
        let chars: Vec<char> = self.text.chars().collect();
        let shown: String = chars[chars.len().saturating_sub(room)..].iter().collect();

        let line = Line::from(vec![
            Span::styled(" ", styles::text_primary(p)),
            Span::styled(shown, styles::text_primary(p)),
            Span::styled(
                "▏",
                styles::accent_bold(p).add_modifier(Modifier::SLOW_BLINK),
            ),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_prompt_shows_text() {
        let mut term = TestTerminal::with_size(60, 3);
        let area = term.area();
        term.render_widget(PathInput::new("~/docs/nda.pdf", &Palette::DARK), area);
        assert!(term.buffer_contains("Open document"));
        assert!(term.line_contains(1, "~/docs/nda.pdf"));
    }

    #[test]
    fn test_long_path_keeps_tail() {
        let mut term = TestTerminal::with_size(20, 3);
        let area = term.area();
        let path = "/very/long/directory/structure/contract.pdf";
        term.render_widget(PathInput::new(path, &Palette::LIGHT), area);
        assert!(term.line_contains(1, "contract.pdf"));
        assert!(!term.line_contains(1, "/very"));
    }
}
