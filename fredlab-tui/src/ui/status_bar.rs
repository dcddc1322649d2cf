//! One-line status bar: slots, scale, range, and the last message.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;
use fredlab_core::session::Slot;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let slot_id = |slot| {
        app.session
            .selection(slot)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "—".into())
    };

    let range = &app.session.range;
    let range_text = format!(
        "{} to {}",
        range
            .start
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".into()),
        range
            .end
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".into()),
    );

    let mut spans = vec![
        Span::styled(
            format!(
                " {} vs {} | scale {} | {} ",
                slot_id(Slot::First),
                slot_id(Slot::Second),
                app.session.scale,
                range_text
            ),
            theme::muted(),
        ),
    ];

    if let Some((level, message)) = &app.status {
        let style = match level {
            StatusLevel::Info => Style::default().fg(theme::POSITIVE),
            StatusLevel::Warning => Style::default().fg(theme::WARNING),
        };
        spans.push(Span::styled(format!("| {message}"), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
