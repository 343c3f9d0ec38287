//! Actions produced by input handling and consumed by the app reducer.

/// A user intent, decoupled from the key or mouse event that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    CursorUp(usize),
    CursorDown(usize),
    CursorHome,
    CursorEnd,
    /// Click the row under the cursor
    Activate,
    /// Move the cursor to a visible row and click it (mouse)
    ClickRow(usize),
    /// Open the directory under the cursor if it is closed
    Expand,
    /// Close the directory under the cursor, or move to its parent
    Collapse,
    /// Dismiss the content dialog
    CloseContent,
    /// Repaint without changing state (terminal resized)
    Redraw,
}

/// Follow-up work the event loop must perform after an action is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Nothing,
    /// Fetch the listing for this directory path in the background
    Load(String),
}
