//! Tree state store: the only owner of the file-system tree.
//!
//! The tree is an immutable value. Every mutation goes through
//! [`update_entry`], which rebuilds the chain of ancestors from the root down
//! to the changed node and shares every other subtree with the previous tree.
//! A caller holding an old root therefore always sees a consistent snapshot,
//! and "did anything change" is a pointer comparison on the root.
//!
//! Fetching is not done here. Operations that need a listing return a
//! [`LoadRequest`]; the caller runs it (see [`crate::loader`]) and hands the
//! outcome back through [`TreeStore::finish_load`].

use std::sync::Arc;

use crate::api::FsSource;
use crate::error::FsError;
use crate::types::{Children, EntryKind, FileSystemEntry, FsResponse};

/// A directory listing that must be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub path: String,
}

impl LoadRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone)]
pub struct TreeStore {
    root: Arc<FileSystemEntry>,
    /// Path of the file whose content dialog is open
    selected_content: Option<String>,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore {
    /// A fresh tree: an open root with nothing loaded.
    pub fn new() -> Self {
        Self { root: Arc::new(FileSystemEntry::root()), selected_content: None }
    }

    pub fn root(&self) -> &Arc<FileSystemEntry> {
        &self.root
    }

    pub fn selected_content(&self) -> Option<&str> {
        self.selected_content.as_deref()
    }

    /// Find a loaded entry by path.
    pub fn entry(&self, path: &str) -> Option<&Arc<FileSystemEntry>> {
        find_entry(&self.root, path)
    }

    /// Start loading a directory's listing.
    ///
    /// Returns `None` when there is nothing to fetch: unknown path, a file,
    /// or a load for this directory already in flight. An already loaded
    /// directory keeps its children visible until the new listing arrives.
    pub fn begin_load(&mut self, path: &str) -> Option<LoadRequest> {
        let mut request = None;
        self.update(path, |entry| {
            if !entry.is_dir() {
                return None;
            }
            match entry.children {
                Children::Loading => None,
                Children::Loaded(_) => {
                    request = Some(LoadRequest::new(&entry.path));
                    None
                }
                Children::NotLoaded => {
                    request = Some(LoadRequest::new(&entry.path));
                    let mut next = entry.clone();
                    next.children = Children::Loading;
                    Some(next)
                }
            }
        });
        request
    }

    /// Merge the outcome of a fetch for `path` into the tree.
    ///
    /// Success replaces the directory's children with the mapped listing.
    /// Failure is logged and swallowed; a directory left `Loading` goes back
    /// to `NotLoaded`, so the tree is exactly as it was before the request.
    /// Outcomes are applied in arrival order: the last response wins.
    pub fn finish_load(&mut self, path: &str, outcome: Result<FsResponse, FsError>) {
        match outcome {
            Ok(response) => {
                let listing: Vec<Arc<FileSystemEntry>> = response
                    .listing()
                    .iter()
                    .map(|entry| Arc::new(FileSystemEntry::from_listing(path, entry)))
                    .collect();
                let count = listing.len();
                let mut listing = Some(listing);
                let merged = self.update(path, |entry| {
                    if !entry.is_dir() {
                        return None;
                    }
                    let mut next = entry.clone();
                    next.children = Children::Loaded(listing.take()?);
                    Some(next)
                });
                if merged {
                    tracing::debug!(path, count, "merged directory listing");
                } else {
                    tracing::warn!(path, "listing for a path that is not a loaded directory, dropped");
                }
            }
            Err(error) => {
                tracing::error!(path, %error, "Error fetching data");
                self.update(path, |entry| match entry.children {
                    Children::Loading => {
                        let mut next = entry.clone();
                        next.children = Children::NotLoaded;
                        Some(next)
                    }
                    _ => None,
                });
            }
        }
    }

    /// Fetch and merge a listing synchronously.
    pub fn load_subtree(&mut self, source: &dyn FsSource, path: &str) {
        if let Some(request) = self.begin_load(path) {
            let outcome = source.list(&request.path);
            self.finish_load(&request.path, outcome);
        }
    }

    /// Click on an entry.
    ///
    /// A directory flips its open flag; opening one whose children were never
    /// loaded marks it `Loading` and returns the fetch to run. A file opens the
    /// content dialog with its path and leaves the tree alone. The root
    /// always stays open.
    pub fn toggle_entry(&mut self, path: &str) -> Option<LoadRequest> {
        let (kind, is_root) = self.entry(path).map(|entry| (entry.kind, entry.is_root()))?;
        if kind == EntryKind::File {
            self.selected_content = Some(path.to_string());
            return None;
        }
        if is_root {
            return None;
        }

        let mut request = None;
        self.update(path, |entry| {
            let mut next = entry.clone();
            next.is_open = !entry.is_open;
            if next.is_open && matches!(entry.children, Children::NotLoaded) {
                next.children = Children::Loading;
                request = Some(LoadRequest::new(&entry.path));
            }
            Some(next)
        });
        if let Some(request) = &request {
            tracing::info!(path = %request.path, "loading directory");
        }
        request
    }

    /// Open a closed directory. Open directories and files are left alone.
    pub fn expand(&mut self, path: &str) -> Option<LoadRequest> {
        let closed_dir = self.entry(path).is_some_and(|entry| entry.is_dir() && !entry.is_open);
        if closed_dir { self.toggle_entry(path) } else { None }
    }

    /// Close an open directory. Returns false if there was nothing to close.
    pub fn collapse(&mut self, path: &str) -> bool {
        let open_dir = self.entry(path).is_some_and(|entry| entry.is_dir() && entry.is_open && !entry.is_root());
        if open_dir {
            // Closing never loads.
            let _ = self.toggle_entry(path);
        }
        open_dir
    }

    pub fn close_content(&mut self) {
        self.selected_content = None;
    }

    fn update<F>(&mut self, path: &str, mut f: F) -> bool
    where
        F: FnMut(&FileSystemEntry) -> Option<FileSystemEntry>,
    {
        match update_entry(&self.root, path, &mut f) {
            Some(root) => {
                self.root = root;
                true
            }
            None => false,
        }
    }
}

/// Paths are built by joining names, so a node can only contain `path` if its own path is a prefix.
fn may_contain(node: &FileSystemEntry, path: &str) -> bool {
    node.is_root() || path.strip_prefix(node.path.as_str()).is_some_and(|rest| rest.starts_with('/'))
}

fn find_entry<'a>(node: &'a Arc<FileSystemEntry>, path: &str) -> Option<&'a Arc<FileSystemEntry>> {
    if node.path == path {
        return Some(node);
    }
    if !may_contain(node, path) {
        return None;
    }
    node.children.loaded()?.iter().find_map(|child| find_entry(child, path))
}

/// Replace the node at `path` with `f(node)` by path copying.
///
/// Returns the new subtree root, or `None` if `path` is not below `node` or
/// `f` declined to change it. Untouched siblings are shared, not cloned.
pub fn update_entry<F>(node: &Arc<FileSystemEntry>, path: &str, f: &mut F) -> Option<Arc<FileSystemEntry>>
where
    F: FnMut(&FileSystemEntry) -> Option<FileSystemEntry>,
{
    if node.path == path {
        return f(node).map(Arc::new);
    }
    if !may_contain(node, path) {
        return None;
    }
    let children = node.children.loaded()?;
    for (i, child) in children.iter().enumerate() {
        if let Some(updated) = update_entry(child, path, f) {
            let mut siblings = children.to_vec();
            siblings[i] = updated;
            let mut parent = FileSystemEntry::clone(node);
            parent.children = Children::Loaded(siblings);
            return Some(Arc::new(parent));
        }
    }
    None
}
