use crate::types::{Children, EntryKind, FileSystemEntry};

/// One rendered line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub depth: usize,
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub is_open: bool,
    pub loading: bool,
}

/// Flatten the visible part of the tree, root first. Closed directories hide
/// their children even when loaded.
pub fn visible_rows(root: &FileSystemEntry) -> Vec<Row> {
    let mut rows = Vec::new();
    push_rows(root, 0, &mut rows);
    rows
}

fn push_rows(entry: &FileSystemEntry, depth: usize, rows: &mut Vec<Row>) {
    rows.push(Row {
        depth,
        path: entry.path.clone(),
        name: entry.name.clone(),
        kind: entry.kind,
        is_open: entry.is_open,
        loading: matches!(entry.children, Children::Loading),
    });
    if !entry.is_open {
        return;
    }
    if let Some(children) = entry.children.loaded() {
        for child in children {
            push_rows(child, depth + 1, rows);
        }
    }
}

/// Index of the row showing `path`, if it is visible
pub fn row_index(rows: &[Row], path: &str) -> Option<usize> {
    rows.iter().position(|row| row.path == path)
}
