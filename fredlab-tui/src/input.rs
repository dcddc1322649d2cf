//! Keyboard input dispatch — overlays first, then global keys, then the
//! active panel's handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay != Overlay::None {
        handle_overlay_key(app, key);
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Search;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::Chart;
            return;
        }
        KeyCode::Char('3') => {
            app.active_panel = Panel::Data;
            return;
        }
        KeyCode::Char('4') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Search => handle_search_key(app, key),
        Panel::Chart => handle_chart_key(app, key),
        Panel::Data => {}  // display only
        Panel::Help => {} // display only
    }
}

fn handle_overlay_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_overlay(),
        KeyCode::Enter => app.submit_overlay(),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => app.input_buffer.push(c),
        _ => {}
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => app.open_overlay(Overlay::Query(app.active_slot)),
        KeyCode::Char('s') => app.toggle_slot(),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor_up(),
        KeyCode::Enter => app.select_cursor_item(),
        KeyCode::Char('a') => app.open_overlay(Overlay::ApiKey),
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('-') => app.halve_scale(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.double_scale(),
        KeyCode::Char('0') => app.reset_scale(),
        KeyCode::Char('d') => app.open_overlay(Overlay::RangeStart),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}
