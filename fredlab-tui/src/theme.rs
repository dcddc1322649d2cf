//! Color tokens for the dashboard.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const SERIES1: Color = Color::LightBlue;
pub const SERIES2: Color = Color::LightRed;
pub const POSITIVE: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const NEGATIVE: Color = Color::Red;
pub const MUTED: Color = Color::DarkGray;

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        muted()
    }
}

/// Color a correlation coefficient by strength and direction.
pub fn coefficient_color(coefficient: f64) -> Color {
    match coefficient.abs() {
        c if c >= 0.7 && coefficient > 0.0 => POSITIVE,
        c if c >= 0.7 => NEGATIVE,
        c if c >= 0.3 => ACCENT,
        _ => MUTED,
    }
}
