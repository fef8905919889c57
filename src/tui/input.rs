//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::view::PanelAction;

use super::state::{AppState, PopupState};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles a key press.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if state.popup == PopupState::Help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => state.popup = PopupState::None,
            KeyCode::Char('q') => return KeyAction::Quit,
            _ => {}
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('?') => state.popup = PopupState::Help,
        KeyCode::Char('c') | KeyCode::Enter => {
            if state.dashboard.cpu_panel_visible() {
                state.dashboard.expand();
            }
        }
        KeyCode::Esc => state.dashboard.collapse(),
        _ => {}
    }
    KeyAction::None
}

/// Handles a mouse event against the regions recorded by the last render.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => state.hover = Some((column, row)),
        MouseEventKind::Down(MouseButton::Left) => {
            state.hover = Some((column, row));
            on_click(state, column, row);
        }
        _ => {}
    }
}

fn on_click(state: &mut AppState, column: u16, row: u16) {
    if state.popup == PopupState::Help {
        state.popup = PopupState::None;
        return;
    }

    if state.dashboard.is_expanded() {
        // Clicks inside the overlay never reach the backdrop.
        if !state.hits.in_modal(column, row) {
            state.dashboard.collapse();
        }
        return;
    }

    if let Some(PanelAction::ExpandCores) = state.hits.action_at(column, row) {
        state.dashboard.expand();
    }
}
