//! Panel 2 — Chart: both series as braille line charts plus the
//! correlation readout. The second series renders scaled, and the
//! coefficient is computed on those same scaled values.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use fredlab_core::domain::TimeSeries;
use fredlab_core::session::Slot;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_readout(f, chunks[0], app);

    match (&app.series1, &app.series2) {
        (None, None) => render_empty(f, chunks[1]),
        (series1, series2) => render_chart(f, chunks[1], app, series1.as_ref(), series2.as_ref()),
    }
}

fn render_readout(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = Vec::new();

    match &app.correlation {
        Some(Ok(result)) => {
            lines.push(Line::from(vec![
                Span::raw("Correlation coefficient: "),
                Span::styled(
                    format!("{:.3}", result.coefficient),
                    Style::default().fg(theme::coefficient_color(result.coefficient)),
                ),
                Span::styled(
                    format!("  ({} aligned points)", result.aligned_points),
                    theme::muted(),
                ),
            ]));
        }
        Some(Err(e)) => {
            lines.push(Line::from(Span::styled(
                format!("Correlation unavailable: {e}"),
                Style::default().fg(theme::WARNING),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Select two indicators to compare.",
                theme::muted(),
            )));
        }
    }

    lines.push(Line::from(Span::styled(
        format!(
            "scale {}   [-] halve  [+] double  [0] reset  [d] dates  [r] refresh",
            app.session.scale
        ),
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data yet. Pick indicators in the Search panel (press 1).",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    series1: Option<&TimeSeries>,
    series2: Option<&TimeSeries>,
) {
    // Scale slot 2 for display; the readout above used the same values.
    let scaled2 = series2.map(|s| s.scaled(app.session.scale.value()));

    let Some(origin) = [
        series1.and_then(|s| s.first_date()),
        scaled2.as_ref().and_then(|s| s.first_date()),
    ]
    .into_iter()
    .flatten()
    .min() else {
        render_empty(f, area);
        return;
    };

    let points1 = series1.map(|s| chart_points(s, origin)).unwrap_or_default();
    let points2 = scaled2
        .as_ref()
        .map(|s| chart_points(s, origin))
        .unwrap_or_default();

    let (y_min, y_max) = value_bounds(&points1, &points2);
    let x_max = points1
        .iter()
        .chain(points2.iter())
        .map(|(x, _)| *x)
        .fold(0.0_f64, f64::max);

    let label1 = app
        .session
        .selection(Slot::First)
        .map(|s| s.title.clone())
        .unwrap_or_default();
    let label2 = app
        .session
        .selection(Slot::Second)
        .map(|s| format!("{} (x{:.2})", s.title, app.session.scale.value()))
        .unwrap_or_default();

    let mut datasets = Vec::new();
    if !points1.is_empty() {
        datasets.push(
            Dataset::default()
                .name(label1)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::SERIES1))
                .graph_type(GraphType::Line)
                .data(&points1),
        );
    }
    if !points2.is_empty() {
        datasets.push(
            Dataset::default()
                .name(label2)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::SERIES2))
                .graph_type(GraphType::Line)
                .data(&points2),
        );
    }

    let end_date = origin + chrono::Duration::days(x_max as i64);
    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(origin.to_string(), theme::muted()),
                    Span::styled(end_date.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Value", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.1}"), theme::muted()),
                    Span::styled(format!("{y_max:.1}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Non-missing observations as (days since origin, value).
fn chart_points(series: &TimeSeries, origin: NaiveDate) -> Vec<(f64, f64)> {
    series
        .observations
        .iter()
        .filter_map(|obs| {
            let value = obs.value?;
            Some(((obs.date - origin).num_days() as f64, value))
        })
        .collect()
}

fn value_bounds(points1: &[(f64, f64)], points2: &[(f64, f64)]) -> (f64, f64) {
    let values = points1.iter().chain(points2.iter()).map(|(_, v)| *v);
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let padding = ((max - min).abs() * 0.05).max(0.5);
    (min - padding, max + padding)
}
