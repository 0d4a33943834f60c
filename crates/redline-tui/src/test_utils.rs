//! Test utilities for TUI rendering verification
//!
//! Provides helpers for testing widgets and full-screen rendering
//! using ratatui's TestBackend.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;
use redline_app::state::AppState;
use redline_core::{normalize, HealthReport, HealthStatus, SelectedFile};
use serde_json::json;

/// Standard test terminal size (matches common terminal dimensions)
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Test utility wrapper around ratatui's TestBackend terminal.
pub struct TestTerminal {
    /// The underlying ratatui terminal with TestBackend.
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    /// Create a new test terminal with custom dimensions
    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Get the full terminal area
    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    /// Render a widget to the terminal
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Render a stateful widget to the terminal
    pub fn render_stateful_widget<W, S>(&mut self, widget: W, area: Rect, state: &mut S)
    where
        W: ratatui::widgets::StatefulWidget<State = S>,
    {
        self.terminal
            .draw(|frame| frame.render_stateful_widget(widget, area, state))
            .expect("Failed to render stateful widget");
    }

    /// Draws a frame using a custom rendering function, for full-screen
    /// rendering like `render::view`.
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    /// Get the underlying buffer for assertions
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// Get all content as a string
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert buffer to string representation
fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

/// Get content of a specific line
fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// A selected PDF that never touches the disk
pub fn test_file(name: &str) -> SelectedFile {
    SelectedFile {
        path: format!("/tmp/{name}").into(),
        name: name.to_string(),
        size: 2048,
        mime: "application/pdf".to_string(),
    }
}

/// State with a healthy service, a selected file and a finished review
pub fn reviewed_state() -> AppState {
    let mut state = AppState::new();
    state.api_base = "http://127.0.0.1:8000".to_string();
    state.health = Some(HealthReport {
        status: HealthStatus::Healthy,
        load_error: None,
    });
    state.set_picked(test_file("msa.pdf"));
    state.result_source = Some("msa.pdf".to_string());
    state.result = Some(normalize(json!({
        "summary": "Indemnity is one-sided.",
        "flags": [
            {"issue": "Uncapped liability", "severity": "HIGH", "clause": "7.2", "note": "Cap at fees paid"},
            "Auto-renewal without notice"
        ],
        "meta": {"model_id": "qwen2.5-7b", "latency_ms": 1830}
    })));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_dimensions() {
        let term = TestTerminal::new();
        assert_eq!(term.area(), Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
    }

    #[test]
    fn test_buffer_contains_and_line_contains() {
        let mut term = TestTerminal::with_size(20, 2);
        let area = term.area();
        term.render_widget(Paragraph::new("hello\nworld"), area);
        assert!(term.buffer_contains("hello"));
        assert!(term.line_contains(1, "world"));
        assert!(!term.line_contains(0, "world"));
        assert!(!term.line_contains(5, "hello"));
    }

    #[test]
    fn test_reviewed_state_has_report() {
        let state = reviewed_state();
        assert!(state.result.as_ref().and_then(|r| r.report()).is_some());
        assert!(state.can_submit());
    }
}
