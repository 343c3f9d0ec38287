use fb_mod_tree::{Row, TreeStore, TreeView, row_index, visible_rows};

/// Everything the UI thread owns.
pub struct State {
    pub tree: TreeStore,
    pub view: TreeView,
    /// Visible rows of `tree`, rebuilt by `refresh_rows` after every tree change
    pub rows: Vec<Row>,
    /// Needs a redraw
    pub dirty: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        let tree = TreeStore::new();
        let rows = visible_rows(tree.root());
        Self { tree, view: TreeView::default(), rows, dirty: true }
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.view.cursor)
    }

    pub fn modal_open(&self) -> bool {
        self.tree.selected_content().is_some()
    }

    /// Rebuild the visible rows, keeping the cursor on the same entry when it is still shown.
    pub fn refresh_rows(&mut self) {
        let selected = self.selected_row().map(|row| row.path.clone());
        self.rows = visible_rows(self.tree.root());
        if let Some(path) = selected
            && let Some(index) = row_index(&self.rows, &path)
        {
            self.view.cursor = index;
        }
        self.view.clamp(self.rows.len());
        self.dirty = true;
    }
}
