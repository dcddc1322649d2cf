//! Modal text-input overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::theme;

pub fn render_input(f: &mut Frame, area: Rect, title: &str, value: &str, hint: &str) {
    let popup = centered_rect(60, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(title.to_string());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(vec![
            Span::raw("> "),
            Span::styled(value.to_string(), theme::accent()),
            Span::styled("█", theme::accent()),
        ]),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), theme::muted())),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
