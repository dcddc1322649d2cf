//! Top-level UI layout — four-panel frame with status bar and overlays.

pub mod chart_panel;
pub mod data_panel;
pub mod help_panel;
pub mod overlays;
pub mod search_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    // Overlays draw on top.
    match app.overlay {
        Overlay::ApiKey => overlays::render_input(
            f,
            main_area,
            " FRED API Key ",
            &mask(&app.input_buffer),
            "Paste your key and press Enter (FRED_API_KEY also works)",
        ),
        Overlay::Query(slot) => overlays::render_input(
            f,
            main_area,
            " Search ",
            &app.input_buffer,
            &format!("Search terms for {} — Enter to run, Esc to cancel", slot.label()),
        ),
        Overlay::RangeStart => overlays::render_input(
            f,
            main_area,
            " Start Date ",
            &app.input_buffer,
            "YYYY-MM-DD, empty for an open start — Enter to continue",
        ),
        Overlay::RangeEnd => overlays::render_input(
            f,
            main_area,
            " End Date ",
            &app.input_buffer,
            "YYYY-MM-DD, empty for an open end — Enter to apply",
        ),
        Overlay::None => {}
    }
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Search => search_panel::render(f, inner, app),
        Panel::Chart => chart_panel::render(f, inner, app),
        Panel::Data => data_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner),
    }
}

/// Credentials never render in the clear.
fn mask(input: &str) -> String {
    "*".repeat(input.chars().count())
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
