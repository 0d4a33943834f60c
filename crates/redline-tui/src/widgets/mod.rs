//! Custom widget components

mod file_panel;
mod header;
mod path_input;
mod result_view;
mod status_bar;

pub use file_panel::FilePanel;
pub use header::MainHeader;
pub use path_input::PathInput;
pub use result_view::{wrap_text, ResultView};
pub use status_bar::StatusBar;

// Re-export state types from app layer (these are used by render/)
pub use redline_app::result_view_state::ResultViewState;
