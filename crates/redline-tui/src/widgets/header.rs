//! Header bar widget
//!
//! App title, health badge and the API base. A second row carries the
//! model load error when the service reports one.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use redline_core::HealthReport;

use crate::theme::{styles, Palette};

/// Main header showing app title, health badge and API base
pub struct MainHeader<'a> {
    palette: &'a Palette,
    health: Option<&'a HealthReport>,
    api_base: &'a str,
    theme_label: Option<&'a str>,
}

impl<'a> MainHeader<'a> {
    pub fn new(palette: &'a Palette, health: Option<&'a HealthReport>, api_base: &'a str) -> Self {
        Self {
            palette,
            health,
            api_base,
            theme_label: None,
        }
    }

    /// Show the active theme next to the badge
    pub fn theme_label(mut self, label: &'a str) -> Self {
        self.theme_label = Some(label);
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.palette, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        self.render_title_row(Rect { height: 1, ..inner }, buf);

        if inner.height >= 2 {
            if let Some(load_error) = self.health.and_then(|h| h.load_error.as_deref()) {
                let line = Line::from(vec![
                    Span::raw(" "),
                    Span::styled("Load error: ", styles::error(self.palette)),
                    Span::styled(load_error, styles::text_secondary(self.palette)),
                ]);
                buf.set_line(inner.x, inner.y + 1, &line, inner.width);
            }
        }
    }
}

impl MainHeader<'_> {
    fn render_title_row(&self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let (icon, label, badge_style) = styles::health_indicator(p, self.health);

        let mut left_spans = vec![
            Span::raw(" "),
            Span::styled("Redline", styles::accent_bold(p)),
            Span::raw("  "),
            Span::styled(icon, badge_style),
            Span::raw(" "),
            Span::styled(label, badge_style),
        ];
        if let Some(theme) = self.theme_label {
            left_spans.push(Span::styled("  ·  ", styles::text_muted(p)));
            left_spans.push(Span::styled(theme, styles::text_muted(p)));
        }
        let left_line = Line::from(left_spans);
        let left_width = left_line.width() as u16;

        buf.set_line(area.x, area.y, &left_line, area.width);

        // Right-align the API base when it fits
        let api_line = Line::from(vec![
            Span::styled(self.api_base, styles::text_secondary(p)),
            Span::raw(" "),
        ]);
        let api_width = api_line.width() as u16;
        if left_width + api_width + 2 <= area.width {
            let api_x = area.x + area.width - api_width;
            buf.set_line(api_x, area.y, &api_line, api_width);
        }
    }
}
