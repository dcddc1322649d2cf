//! Panel 1 — Search: slot status, ranked hits, and the popular list.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use fredlab_core::session::Slot;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    for slot in [Slot::First, Slot::Second] {
        let marker = if slot == app.active_slot { "▶" } else { " " };
        let selected = app
            .session
            .selection(slot)
            .map(|s| format!("{} — {}", s.id, s.title))
            .unwrap_or_else(|| "(none)".into());
        let query = &app.slot_search(slot).query;

        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {}: ", slot.label()), theme::accent()),
            Span::raw(selected),
        ]));
        if !query.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    last search: '{query}'"),
                theme::muted(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  / search   s switch slot   j/k move   Enter select",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    // Pick list: the active slot's hits, then the popular indicators.
    let hits = &app.slot_search(app.active_slot).hits;

    if !hits.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  Top {} results", hits.len()),
            theme::accent(),
        )));
        for (i, hit) in hits.iter().enumerate() {
            let text = format!(
                "  {} ({})  {} to {}  [{}]",
                hit.title, hit.id, hit.observation_start, hit.observation_end, hit.frequency
            );
            lines.push(styled_row(text, i == app.cursor));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("  Popular indicators", theme::accent())));
    for (i, indicator) in app.popular.iter().enumerate() {
        let row_index = hits.len() + i;
        let text = format!("  {} ({})", indicator.label, indicator.id);
        lines.push(styled_row(text, row_index == app.cursor));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn styled_row(text: String, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(text, theme::highlight()))
    } else {
        Line::from(Span::raw(text))
    }
}
