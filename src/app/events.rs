use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use fb_base::actions::Action;
use fb_mod_tree::TreePanel;

use crate::app::mouse::handle_mouse;
use crate::state::State;

/// Translate a terminal event into an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => {
            // Some terminals report releases too
            if key.kind != KeyEventKind::Press {
                return Some(Action::None);
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return None;
            }

            let modal_open = state.modal_open();
            if !modal_open && key.code == KeyCode::Char('q') {
                return None;
            }

            Some(TreePanel.handle_key(key, modal_open).unwrap_or(Action::None))
        }
        Event::Mouse(mouse) => Some(handle_mouse(mouse, state)),
        Event::Resize(..) => Some(Action::Redraw),
        _ => Some(Action::None),
    }
}
