//! Light and dark themes for the TUI.
//!
//! - `palette` - Color sets for each [`Theme`](redline_core::Theme)
//! - `styles` - Semantic style builders over a palette

pub mod palette;
pub mod styles;

pub use palette::Palette;
