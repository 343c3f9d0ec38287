use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use fb_base::actions::Action;

use crate::state::State;

/// Handle mouse events and return appropriate action
pub fn handle_mouse(event: &MouseEvent, state: &State) -> Action {
    let x = event.column;
    let y = event.row;

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(x, y, state),
        MouseEventKind::ScrollUp if !state.modal_open() => Action::CursorUp(1),
        MouseEventKind::ScrollDown if !state.modal_open() => Action::CursorDown(1),
        _ => Action::None,
    }
}

fn handle_left_click(x: u16, y: u16, state: &State) -> Action {
    // The content dialog is modal: only its close control reacts
    if state.modal_open() {
        return if state.view.is_close_button(x, y) { Action::CloseContent } else { Action::None };
    }

    match state.view.row_at(x, y, state.rows.len()) {
        Some(index) => Action::ClickRow(index),
        None => Action::None,
    }
}
