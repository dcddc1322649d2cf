//! Panel 3 — Data: tail-row tables for both selected series.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use fredlab_core::domain::TimeSeries;
use fredlab_core::session::Slot;

const TAIL_ROWS: usize = 5;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_slot_table(f, halves[0], app, Slot::First, app.series1.as_ref());
    render_slot_table(f, halves[1], app, Slot::Second, app.series2.as_ref());
}

fn render_slot_table(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    slot: Slot,
    series: Option<&TimeSeries>,
) {
    let title = app
        .session
        .selection(slot)
        .map(|s| format!(" {} ", s.title))
        .unwrap_or_else(|| format!(" {} ", slot.label()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(series) = series else {
        f.render_widget(
            Paragraph::new(Span::styled("no data", theme::muted())),
            inner,
        );
        return;
    };

    let rows: Vec<Row> = series
        .tail(TAIL_ROWS)
        .iter()
        .map(|obs| {
            Row::new(vec![
                Cell::from(obs.date.to_string()),
                Cell::from(
                    obs.value
                        .map(|v| format!("{v:.3}"))
                        .unwrap_or_else(|| ".".into()),
                ),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(8)])
        .header(Row::new(vec!["Date", "Value"]).style(theme::accent()));

    f.render_widget(table, inner);
}
