use std::sync::Arc;

use serde::Deserialize;

/// Path of the single root directory. The server interprets it as the top level.
pub const ROOT_PATH: &str = "root";

/// Whether an entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Load state of a directory's children.
///
/// `NotLoaded` and `Loaded(vec![])` are distinct: the first has never been
/// fetched, the second is a directory the server reported as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Children {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<Arc<FileSystemEntry>>),
}

impl Children {
    pub fn loaded(&self) -> Option<&[Arc<FileSystemEntry>]> {
        match self {
            Children::Loaded(list) => Some(list),
            _ => None,
        }
    }
}

/// A node in the file-system tree.
///
/// Nodes are immutable once built and shared through `Arc`; the store
/// replaces the path from the root down to a changed node on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSystemEntry {
    pub name: String,
    pub kind: EntryKind,
    pub path: String,
    /// Expansion flag. Always false for files.
    pub is_open: bool,
    /// Always `NotLoaded` for files.
    pub children: Children,
}

impl FileSystemEntry {
    /// The root directory as created at mount: open, nothing loaded yet.
    pub fn root() -> Self {
        Self {
            name: ROOT_PATH.to_string(),
            kind: EntryKind::Directory,
            path: ROOT_PATH.to_string(),
            is_open: true,
            children: Children::NotLoaded,
        }
    }

    /// Build a closed, unloaded entry from one element of a directory listing.
    pub fn from_listing(parent_path: &str, entry: &FsListingEntry) -> Self {
        Self {
            name: entry.name.clone(),
            kind: entry.kind,
            path: join_path(parent_path, &entry.name),
            is_open: false,
            children: Children::NotLoaded,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }
}

/// Join a child name onto its parent's path. Children of the root carry no prefix.
pub fn join_path(parent_path: &str, name: &str) -> String {
    if parent_path == ROOT_PATH { name.to_string() } else { format!("{}/{}", parent_path, name) }
}

/// Path of the directory containing `path`. The root and its direct children map to the root.
pub fn parent_path(path: &str) -> Option<&str> {
    if path == ROOT_PATH {
        return None;
    }
    Some(path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or(ROOT_PATH))
}

// =============================================================================
// Wire types
// =============================================================================

/// Body of `GET {api}fs?path=...`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FsResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub entries: Option<Vec<FsListingEntry>>,
    /// Defined by the API for file reads; not displayed.
    #[serde(default)]
    pub contents: Option<String>,
}

impl FsResponse {
    /// Listing entries; an absent `entries` field is an empty listing.
    pub fn listing(&self) -> &[FsListingEntry] {
        self.entries.as_deref().unwrap_or(&[])
    }
}

/// One element of a directory listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FsListingEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}
