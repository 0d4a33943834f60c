//! Screen layout definitions for the TUI
//!
//! Header, file panel, result view and a one-row footer. The header grows by
//! one row when the service reports a model load error.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Height of the file panel: borders plus file, progress and error rows
pub const FILE_PANEL_HEIGHT: u16 = 5;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, health badge and API base
    pub header: Rect,

    /// Selected file, upload progress and inline error
    pub file_panel: Rect,

    /// Summary, flags and raw JSON (scrollable)
    pub result: Rect,

    /// Keybinding hints and notices
    pub footer: Rect,
}

/// Create the main screen layout
///
/// # Arguments
/// * `area` - Total screen area
/// * `show_load_error` - Reserve a header row for the model load error
pub fn create(area: Rect, show_load_error: bool) -> ScreenAreas {
    let header_height = if show_load_error { 4 } else { 3 };

    let chunks = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Length(FILE_PANEL_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        file_panel: chunks[1],
        result: chunks[2],
        footer: chunks[3],
    }
}

/// Centered popup of a fixed height, `percent_x` of the width
pub fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
