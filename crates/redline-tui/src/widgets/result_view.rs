//! Result view widget
//!
//! Renders a normalized review: the summary with its line breaks, a numbered
//! flag list, known metadata and (on demand) the raw JSON. Text is wrapped up
//! front so the scroll state knows the real line count.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};
use redline_app::result_view_state::ResultViewState;
use redline_core::{NormalizedResult, ReviewReport};
use unicode_width::UnicodeWidthChar;

use crate::theme::{styles, Palette};

/// Indent for the lines under a numbered flag
const FLAG_INDENT: &str = "   ";

pub struct ResultView<'a> {
    result: Option<&'a NormalizedResult>,
    palette: &'a Palette,
    show_raw: bool,
    in_flight: bool,
    source: Option<&'a str>,
}

impl<'a> ResultView<'a> {
    pub fn new(result: Option<&'a NormalizedResult>, palette: &'a Palette) -> Self {
        Self {
            result,
            palette,
            show_raw: false,
            in_flight: false,
            source: None,
        }
    }

    pub fn show_raw(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    /// A review is running; the placeholder says so
    pub fn in_flight(mut self, in_flight: bool) -> Self {
        self.in_flight = in_flight;
        self
    }

    /// Name of the reviewed file, shown in the block title
    pub fn source(mut self, source: Option<&'a str>) -> Self {
        self.source = source;
        self
    }

    /// All content lines, wrapped to `width` columns
    pub fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let p = self.palette;
        let mut lines = Vec::new();

        match self.result {
            None => {
                let text = if self.in_flight {
                    "Waiting for the review…"
                } else {
                    "Results will appear here after a review."
                };
                lines.push(Line::styled(text.to_string(), styles::text_muted(p)));
            }
            Some(NormalizedResult::Report(report)) => {
                self.push_report(&mut lines, report, width);
                if self.show_raw {
                    lines.push(Line::default());
                    self.push_raw(&mut lines, &report.document, width);
                }
            }
            Some(NormalizedResult::Opaque(value)) => {
                lines.push(Line::styled(
                    "The service returned a response with no summary or flags.".to_string(),
                    styles::text_muted(p),
                ));
                lines.push(Line::default());
                self.push_raw(&mut lines, value, width);
            }
        }

        lines
    }

    fn push_report(&self, lines: &mut Vec<Line<'static>>, report: &ReviewReport, width: usize) {
        let p = self.palette;

        lines.push(heading("Summary", p));
        if report.summary.trim().is_empty() {
            lines.push(Line::styled("(no summary)".to_string(), styles::text_muted(p)));
        } else {
            for row in wrap_text(&report.summary, width) {
                lines.push(Line::styled(row, styles::text_primary(p)));
            }
        }

        lines.push(Line::default());
        lines.push(heading(&format!("Flags ({})", report.flags.len()), p));
        if report.flags.is_empty() {
            lines.push(Line::styled("No flags raised".to_string(), styles::text_muted(p)));
        }

        let body_width = width.saturating_sub(FLAG_INDENT.len()).max(1);
        for (i, flag) in report.flags.iter().enumerate() {
            let number = format!("{}. ", i + 1);
            let issue_width = width.saturating_sub(number.len()).max(1);
            for (j, row) in wrap_text(flag.issue_or_placeholder(), issue_width)
                .into_iter()
                .enumerate()
            {
                let prefix = if j == 0 {
                    number.clone()
                } else {
                    " ".repeat(number.len())
                };
                lines.push(Line::from(vec![
                    Span::styled(prefix, styles::text_secondary(p)),
                    Span::styled(row, styles::text_bold(p)),
                ]));
            }

            for row in wrap_text(&flag.meta_line(), body_width) {
                lines.push(Line::from(vec![
                    Span::raw(FLAG_INDENT),
                    Span::styled(row, styles::text_muted(p)),
                ]));
            }

            if let Some(note) = &flag.note {
                for row in wrap_text(&format!("note: {}", note), body_width) {
                    lines.push(Line::from(vec![
                        Span::raw(FLAG_INDENT),
                        Span::styled(row, styles::text_secondary(p)),
                    ]));
                }
            }
        }

        let pairs = report.meta_pairs();
        if !pairs.is_empty() {
            lines.push(Line::default());
            lines.push(heading("Details", p));
            for (key, value) in pairs {
                for row in wrap_text(&format!("{}: {}", key, value), width) {
                    lines.push(Line::styled(row, styles::text_secondary(p)));
                }
            }
        }
    }

    fn push_raw(&self, lines: &mut Vec<Line<'static>>, value: &serde_json::Value, width: usize) {
        let p = self.palette;
        lines.push(heading("Raw response", p));
        let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        for row in wrap_text(&pretty, width) {
            lines.push(Line::styled(row, styles::text_secondary(p)));
        }
    }
}

fn heading(text: &str, p: &Palette) -> Line<'static> {
    Line::styled(text.to_string(), styles::accent_bold(p))
}

impl StatefulWidget for ResultView<'_> {
    type State = ResultViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ResultViewState) {
        let p = self.palette;
        let title = match self.source {
            Some(name) => format!(" Review · {} ", name),
            None => " Review ".to_string(),
        };
        let block = styles::glass_block(p, self.result.is_some())
            .title(Span::styled(title, styles::text_secondary(p)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }

        // One column of padding on the left, one reserved for the scrollbar
        let text_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        let lines = self.build_lines(text_area.width as usize);
        let visible = text_area.height as usize;
        state.update_content_size(lines.len(), visible);

        for (row, line) in lines.iter().skip(state.offset).take(visible).enumerate() {
            buf.set_line(text_area.x, text_area.y + row as u16, line, text_area.width);
        }

        if lines.len() > visible {
            let mut scrollbar_state = ScrollbarState::new(lines.len().saturating_sub(visible))
                .position(state.offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .thumb_style(Style::default().fg(p.border_active))
                .track_style(Style::default().fg(p.border))
                .render(inner, buf, &mut scrollbar_state);
        }
    }
}

/// Wrap text to `width` display columns.
///
/// Existing line breaks are kept. Lines break at spaces where possible and
/// words longer than the width are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for source_line in text.lines() {
        let source_line = source_line.trim_end();
        if source_line.is_empty() {
            rows.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;

        for word in source_line.split(' ') {
            let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            // Hard-split words wider than a full row
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }

        rows.push(current);
    }

    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}
