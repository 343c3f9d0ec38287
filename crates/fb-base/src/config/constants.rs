// =============================================================================
// TREE VIEW
// =============================================================================

/// Columns of indentation per tree depth level
pub const INDENT_UNIT: u16 = 2;

/// Fixed width of the tree view region
pub const TREE_VIEW_WIDTH: u16 = 48;

/// Height of the tree view region, as a percentage of the page body
pub const TREE_VIEW_HEIGHT_PERCENT: u16 = 80;

/// Rows moved by PageUp/PageDown
pub const SCROLL_PAGE_AMOUNT: usize = 10;

// =============================================================================
// CONTENT MODAL
// =============================================================================

/// Width of the content dialog
pub const MODAL_WIDTH: u16 = 44;

/// Height of the content dialog
pub const MODAL_HEIGHT: u16 = 9;

// =============================================================================
// SHELL LAYOUT
// =============================================================================

/// Rows taken by the title + subtitle header
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval while loads are in flight or a redraw is pending
pub const EVENT_POLL_MS: u64 = 8;

/// Poll interval when idle
pub const IDLE_POLL_MS: u64 = 50;

/// Minimum time between renders
pub const RENDER_THROTTLE_MS: u64 = 36;
