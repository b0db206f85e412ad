//! Keyboard input dispatch: global keys first, then panel-specific keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(panel) = c.to_digit(10).and_then(|d| Panel::from_index(d as usize - 1)) {
                app.active_panel = panel;
            }
        }
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.active_panel = app.active_panel.prev();
        }
        KeyCode::Tab => app.active_panel = app.active_panel.next(),
        KeyCode::BackTab => app.active_panel = app.active_panel.prev(),

        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('[') => app.shift_min(-1),
        KeyCode::Char(']') => app.shift_min(1),
        KeyCode::Char('{') => app.shift_max(-1),
        KeyCode::Char('}') => app.shift_max(1),
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1),
        KeyCode::Char(' ') => app.toggle_highlight(),
        KeyCode::Char('r') => app.reset_range(),
        KeyCode::Char('R') => app.reload(),
        KeyCode::Char('x') => app.export(),

        _ => {
            if app.active_panel == Panel::Table {
                handle_table_key(app, key);
            }
        }
    }
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::Home | KeyCode::Char('g') => app.move_cursor(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => app.move_cursor(isize::MAX),
        _ => {}
    }
}
