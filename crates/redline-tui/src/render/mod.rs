//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use redline_app::state::{AppState, UiMode};

use super::{layout, widgets};
use crate::theme::Palette;

/// Width of the path prompt as a share of the screen
const PROMPT_WIDTH_PERCENT: u16 = 70;

/// Render the complete UI (View function in TEA)
///
/// This is a pure rendering function - it should not modify state
/// except for widget state that tracks rendering info (scroll position).
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let palette = Palette::for_theme(state.theme);

    let bg_block = Block::default().style(
        Style::default()
            .bg(palette.background)
            .fg(palette.text_primary),
    );
    frame.render_widget(bg_block, area);

    let show_load_error = state
        .health
        .as_ref()
        .is_some_and(|h| h.load_error.is_some());
    let areas = layout::create(area, show_load_error);

    let header = widgets::MainHeader::new(palette, state.health.as_ref(), &state.api_base)
        .theme_label(state.theme.as_str());
    frame.render_widget(header, areas.header);

    frame.render_widget(widgets::FilePanel::new(state, palette), areas.file_panel);

    let result_view = widgets::ResultView::new(state.result.as_ref(), palette)
        .show_raw(state.show_raw)
        .in_flight(state.upload.is_in_flight())
        .source(state.result_source.as_deref());
    frame.render_stateful_widget(result_view, areas.result, &mut state.result_view);

    frame.render_widget(widgets::StatusBar::new(state, palette), areas.footer);

    if state.ui_mode == UiMode::PathInput {
        let popup = layout::centered_rect(area, PROMPT_WIDTH_PERCENT, 3);
        frame.render_widget(widgets::PathInput::new(&state.path_input, palette), popup);
    }
}
