//! Rendering constants.
//!
//! Centralized location for symbols and sizes used while painting the screen.

/// Drawn in a pane's right column when entries are hidden above.
pub const SCROLL_UP_INDICATOR: &str = "▲";

/// Drawn in a pane's right column when entries are hidden below.
pub const SCROLL_DOWN_INDICATOR: &str = "▼";

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Column width reserved for key labels in the help overlay.
pub const HELP_KEY_COLUMN_WIDTH: usize = 22;
