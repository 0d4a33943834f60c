//! Semantic style builders over a [`Palette`].

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use redline_core::{HealthReport, HealthStatus};

use super::Palette;

// --- Text styles ---
pub fn text_primary(p: &Palette) -> Style {
    Style::default().fg(p.text_primary)
}

pub fn text_secondary(p: &Palette) -> Style {
    Style::default().fg(p.text_secondary)
}

pub fn text_muted(p: &Palette) -> Style {
    Style::default().fg(p.text_muted)
}

pub fn text_bold(p: &Palette) -> Style {
    text_primary(p).add_modifier(Modifier::BOLD)
}

// --- Accent styles ---
pub fn accent_bold(p: &Palette) -> Style {
    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
}

pub fn error(p: &Palette) -> Style {
    Style::default().fg(p.status_red)
}

/// Key name in the footer hints
pub fn keybinding(p: &Palette) -> Style {
    Style::default().fg(p.accent)
}

// --- Block builders ---
pub fn glass_block(p: &Palette, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { p.border_active } else { p.border }))
        .style(Style::default().bg(p.background))
}

pub fn modal_block<'a>(p: &Palette, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(p.border_active))
        .style(Style::default().bg(p.popup_bg))
}

// --- Health badge mapping ---

/// Health badge for the header.
///
/// Returns `(icon, label, Style)`; `None` means no probe has answered yet.
pub fn health_indicator(p: &Palette, report: Option<&HealthReport>) -> (&'static str, &'static str, Style) {
    let Some(report) = report else {
        return ("○", "Checking…", text_muted(p));
    };

    match report.status {
        HealthStatus::Healthy => (
            "●",
            report.status.label(),
            Style::default()
                .fg(p.status_green)
                .add_modifier(Modifier::BOLD),
        ),
        HealthStatus::Pending => (
            "◐",
            report.status.label(),
            Style::default().fg(p.status_yellow),
        ),
        HealthStatus::Error => (
            "✗",
            report.status.label(),
            Style::default()
                .fg(p.status_red)
                .add_modifier(Modifier::BOLD),
        ),
        HealthStatus::Unreachable => ("○", report.status.label(), text_muted(p)),
    }
}
