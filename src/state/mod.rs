//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod detail_view;
pub mod list_pane;
pub mod mouse_handler;
pub mod navigation;

// Re-export for convenience
pub use detail_view::DetailView;
pub use list_pane::{Direction, DrawRow, ListPane, PaneRender};
pub use mouse_handler::{handle_mouse, MouseCommand};
pub use navigation::{FocusCursor, NavAction, NavigationController, Outcome};
