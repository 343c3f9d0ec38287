//! Lazily loaded file-system tree: data model, API client, state store and view.

pub mod api;
pub mod error;
pub mod loader;
pub mod panel;
pub mod rows;
pub mod store;
pub mod types;

pub use api::{FsClient, FsSource};
pub use error::FsError;
pub use loader::{LoadResult, Loader};
pub use panel::{TreePanel, TreeView, render_content_modal};
pub use rows::{Row, row_index, visible_rows};
pub use store::{LoadRequest, TreeStore};
pub use types::{Children, EntryKind, FileSystemEntry, FsListingEntry, FsResponse, ROOT_PATH, parent_path};
