//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── document ───────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn active_heading_style() -> Style {
        Self::heading_style().add_modifier(Modifier::UNDERLINED)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn center_marker_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── labels ─────────────────────────────────────────────────
    pub fn label_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary_label_style() -> Style {
        Style::default().fg(Color::Black).bg(Color::Gray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
