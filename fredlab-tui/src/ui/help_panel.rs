//! Panel 4 — Help: keyboard reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let entries: &[(&str, &str)] = &[
        ("1-4 / Tab", "switch panels"),
        ("q", "quit"),
        ("", ""),
        ("Search panel", ""),
        ("/", "edit the active slot's search query"),
        ("s", "switch between indicator slots"),
        ("j / k", "move through results and popular indicators"),
        ("Enter", "select the highlighted series"),
        ("a", "re-enter the FRED API key"),
        ("", ""),
        ("Chart panel", ""),
        ("-", "halve the second indicator's scale"),
        ("+", "double the second indicator's scale"),
        ("0", "reset the scale to 1.00x"),
        ("d", "edit the date range"),
        ("r", "re-fetch both series"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            if desc.is_empty() {
                Line::from(Span::styled(key.to_string(), theme::accent()))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {key:<10}"), theme::accent()),
                    Span::raw(desc.to_string()),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
