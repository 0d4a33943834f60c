//! Color palettes for the light and dark themes.

use ratatui::style::Color;
use redline_core::Theme;

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    // --- Background layers ---
    pub background: Color,
    pub popup_bg: Color,

    // --- Borders ---
    pub border: Color,
    pub border_active: Color,

    // --- Accent ---
    pub accent: Color,

    // --- Text ---
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    /// Foreground on an accent background
    pub contrast_fg: Color,

    // --- Status ---
    pub status_green: Color,
    pub status_yellow: Color,
    pub status_red: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::Rgb(18, 21, 28),
        popup_bg: Color::Rgb(28, 33, 43),
        border: Color::Rgb(45, 51, 59),
        border_active: Color::Rgb(88, 166, 255),
        accent: Color::Rgb(88, 166, 255),
        text_primary: Color::Rgb(201, 209, 217),
        text_secondary: Color::Rgb(139, 148, 158),
        text_muted: Color::Rgb(110, 118, 129),
        contrast_fg: Color::Rgb(10, 12, 16),
        status_green: Color::Rgb(63, 185, 80),
        status_yellow: Color::Rgb(210, 153, 34),
        status_red: Color::Rgb(248, 81, 73),
    };

    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(255, 255, 255),
        popup_bg: Color::Rgb(246, 248, 250),
        border: Color::Rgb(208, 215, 222),
        border_active: Color::Rgb(9, 105, 218),
        accent: Color::Rgb(9, 105, 218),
        text_primary: Color::Rgb(31, 35, 40),
        text_secondary: Color::Rgb(89, 99, 110),
        text_muted: Color::Rgb(110, 119, 129),
        contrast_fg: Color::Rgb(255, 255, 255),
        status_green: Color::Rgb(26, 127, 55),
        status_yellow: Color::Rgb(154, 103, 0),
        status_red: Color::Rgb(209, 36, 47),
    };

    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Light => &Palette::LIGHT,
            Theme::Dark => &Palette::DARK,
        }
    }
}
