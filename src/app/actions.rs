use fb_base::actions::{Action, ActionResult};
use fb_mod_tree::{LoadRequest, parent_path, row_index};

use crate::state::State;

fn load_result(request: Option<LoadRequest>) -> ActionResult {
    match request {
        Some(request) => ActionResult::Load(request.path),
        None => ActionResult::Nothing,
    }
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    let last_row = state.rows.len().saturating_sub(1);

    match action {
        Action::None | Action::Redraw => ActionResult::Nothing,
        Action::CursorUp(n) => {
            state.view.cursor = state.view.cursor.saturating_sub(n);
            ActionResult::Nothing
        }
        Action::CursorDown(n) => {
            state.view.cursor = state.view.cursor.saturating_add(n).min(last_row);
            ActionResult::Nothing
        }
        Action::CursorHome => {
            state.view.cursor = 0;
            ActionResult::Nothing
        }
        Action::CursorEnd => {
            state.view.cursor = last_row;
            ActionResult::Nothing
        }
        Action::ClickRow(index) => {
            if index > last_row {
                return ActionResult::Nothing;
            }
            state.view.cursor = index;
            apply_action(state, Action::Activate)
        }
        Action::Activate => {
            let Some(path) = state.selected_row().map(|row| row.path.clone()) else {
                return ActionResult::Nothing;
            };
            let request = state.tree.toggle_entry(&path);
            state.refresh_rows();
            load_result(request)
        }
        Action::Expand => {
            let Some(path) = state.selected_row().map(|row| row.path.clone()) else {
                return ActionResult::Nothing;
            };
            let request = state.tree.expand(&path);
            state.refresh_rows();
            load_result(request)
        }
        Action::Collapse => {
            let Some(path) = state.selected_row().map(|row| row.path.clone()) else {
                return ActionResult::Nothing;
            };
            if state.tree.collapse(&path) {
                state.refresh_rows();
            } else if let Some(index) = parent_path(&path).and_then(|parent| row_index(&state.rows, parent)) {
                state.view.cursor = index;
            }
            ActionResult::Nothing
        }
        Action::CloseContent => {
            state.tree.close_content();
            ActionResult::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_mod_tree::{Children, EntryKind, FsListingEntry, FsResponse, ROOT_PATH};

    fn listing(entries: &[(&str, EntryKind)]) -> FsResponse {
        FsResponse {
            id: String::new(),
            entries: Some(entries.iter().map(|(name, kind)| FsListingEntry { name: name.to_string(), kind: *kind }).collect()),
            contents: None,
        }
    }

    /// root: [a/, b.txt], cursor on root
    fn loaded_state() -> State {
        let mut state = State::new();
        state.tree.finish_load(ROOT_PATH, Ok(listing(&[("a", EntryKind::Directory), ("b.txt", EntryKind::File)])));
        state.refresh_rows();
        state
    }

    #[test]
    fn cursor_moves_within_rows() {
        let mut state = loaded_state();
        apply_action(&mut state, Action::CursorDown(10));
        assert_eq!(state.view.cursor, 2);
        apply_action(&mut state, Action::CursorUp(1));
        assert_eq!(state.view.cursor, 1);
        apply_action(&mut state, Action::CursorUp(5));
        assert_eq!(state.view.cursor, 0);
        apply_action(&mut state, Action::CursorEnd);
        assert_eq!(state.view.cursor, 2);
        apply_action(&mut state, Action::CursorHome);
        assert_eq!(state.view.cursor, 0);
    }

    #[test]
    fn activating_unloaded_directory_requests_exactly_one_load() {
        let mut state = loaded_state();
        assert_eq!(apply_action(&mut state, Action::ClickRow(1)), ActionResult::Load("a".into()));
        assert_eq!(state.tree.entry("a").unwrap().children, Children::Loading);
        assert!(state.rows[1].loading);

        // Close and reopen before the listing arrives: no second request.
        assert_eq!(apply_action(&mut state, Action::Activate), ActionResult::Nothing);
        assert_eq!(apply_action(&mut state, Action::Activate), ActionResult::Nothing);
    }

    #[test]
    fn merged_listing_shows_under_open_directory() {
        let mut state = loaded_state();
        apply_action(&mut state, Action::ClickRow(1));
        state.tree.finish_load("a", Ok(listing(&[("c.txt", EntryKind::File)])));
        state.refresh_rows();

        let paths: Vec<&str> = state.rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec![ROOT_PATH, "a", "a/c.txt", "b.txt"]);
        assert_eq!(state.view.cursor, 1);
    }

    #[test]
    fn activating_file_opens_and_closes_content() {
        let mut state = loaded_state();
        assert_eq!(apply_action(&mut state, Action::ClickRow(2)), ActionResult::Nothing);
        assert_eq!(state.tree.selected_content(), Some("b.txt"));
        assert!(state.modal_open());

        apply_action(&mut state, Action::CloseContent);
        assert_eq!(state.tree.selected_content(), None);
    }

    #[test]
    fn click_outside_rows_is_ignored() {
        let mut state = loaded_state();
        assert_eq!(apply_action(&mut state, Action::ClickRow(7)), ActionResult::Nothing);
        assert_eq!(state.view.cursor, 0);
    }

    #[test]
    fn expand_then_collapse_then_jump_to_parent() {
        let mut state = loaded_state();
        state.view.cursor = 1;
        assert_eq!(apply_action(&mut state, Action::Expand), ActionResult::Load("a".into()));
        state.tree.finish_load("a", Ok(listing(&[("c.txt", EntryKind::File)])));
        state.refresh_rows();

        // On a/c.txt, Left moves to a.
        state.view.cursor = 2;
        apply_action(&mut state, Action::Collapse);
        assert_eq!(state.view.cursor, 1);

        // On open a, Left closes it.
        apply_action(&mut state, Action::Collapse);
        assert!(!state.tree.entry("a").unwrap().is_open);
        assert_eq!(state.rows.len(), 3);

        // Expanding a loaded directory does not fetch again.
        assert_eq!(apply_action(&mut state, Action::Expand), ActionResult::Nothing);
        assert_eq!(state.rows.len(), 4);
    }
}
