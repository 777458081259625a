//! Input handling — maps key/mouse events to scroll signals.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => state.scroll_by(1.0),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_by(-1.0),
        KeyCode::PageDown | KeyCode::Char(' ') => {
            let page = state.page();
            state.scroll_by(page);
        }
        KeyCode::PageUp | KeyCode::Char('b') => {
            let page = state.page();
            state.scroll_by(-page);
        }
        KeyCode::Home | KeyCode::Char('g') => state.scroll_to_start(),
        KeyCode::End | KeyCode::Char('G') => state.scroll_to_end(),
        _ => {}
    }
}

/// Process a mouse event.  Wheel notches move immediately; the wheel itself
/// already arrives in small steps.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = f64::from(state.scroll_step);
    match mouse.kind {
        MouseEventKind::ScrollDown => state.jump_by(step),
        MouseEventKind::ScrollUp => state.jump_by(-step),
        _ => {}
    }
}
