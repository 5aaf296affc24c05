//! Domain-level keyboard actions independent of key bindings.

use std::fmt;
use std::str::FromStr;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Each action also has a stable upper-case name used in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Pane focus
    /// Focus the pane to the left, wrapping to the last pane. Default: ←/h
    PaneLeft,
    /// Focus the pane to the right, wrapping to the first pane. Default: →/l/Tab
    PaneRight,

    // Within-pane selection
    /// Select the previous entry of the focused pane. Default: ↑/k
    Up,
    /// Select the next entry of the focused pane. Default: ↓/j
    Down,
    /// Move the selection up by one pane height. Default: Page Up
    PageUp,
    /// Move the selection down by one pane height. Default: Page Down
    PageDown,
    /// Select the first entry. Default: Home/g
    Home,
    /// Select the last entry. Default: End/G
    End,

    // Detail view scrolling
    /// Scroll the detail view up one line. Default: <
    ScrollDetailUp,
    /// Scroll the detail view down one line. Default: >
    ScrollDetailDown,
    /// Scroll the detail view up one page. Default: Ctrl+u
    DetailPageUp,
    /// Scroll the detail view down one page. Default: Ctrl+d
    DetailPageDown,

    // Application
    /// Hand the focused entry to the host application. Default: Enter/a
    Activate,
    /// Toggle the key binding overlay. Default: ?
    Help,
    /// Leave the screen. Default: q/Esc
    Quit,
}

impl KeyAction {
    /// Every action, in help-overlay order.
    pub const ALL: [KeyAction; 15] = [
        KeyAction::PaneLeft,
        KeyAction::PaneRight,
        KeyAction::Up,
        KeyAction::Down,
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::Home,
        KeyAction::End,
        KeyAction::ScrollDetailUp,
        KeyAction::ScrollDetailDown,
        KeyAction::DetailPageUp,
        KeyAction::DetailPageDown,
        KeyAction::Activate,
        KeyAction::Help,
        KeyAction::Quit,
    ];

    /// Stable name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            KeyAction::PaneLeft => "PANE_LEFT",
            KeyAction::PaneRight => "PANE_RIGHT",
            KeyAction::Up => "UP",
            KeyAction::Down => "DOWN",
            KeyAction::PageUp => "PAGE_UP",
            KeyAction::PageDown => "PAGE_DOWN",
            KeyAction::Home => "HOME",
            KeyAction::End => "END",
            KeyAction::ScrollDetailUp => "SCROLL_DETAIL_UP",
            KeyAction::ScrollDetailDown => "SCROLL_DETAIL_DOWN",
            KeyAction::DetailPageUp => "DETAIL_PAGE_UP",
            KeyAction::DetailPageDown => "DETAIL_PAGE_DOWN",
            KeyAction::Activate => "ACTIVATE",
            KeyAction::Help => "HELP",
            KeyAction::Quit => "QUIT",
        }
    }

    /// One-line description for the help overlay.
    pub fn description(self) -> &'static str {
        match self {
            KeyAction::PaneLeft => "Focus previous pane",
            KeyAction::PaneRight => "Focus next pane",
            KeyAction::Up => "Select previous entry",
            KeyAction::Down => "Select next entry",
            KeyAction::PageUp => "Select one page up",
            KeyAction::PageDown => "Select one page down",
            KeyAction::Home => "Select first entry",
            KeyAction::End => "Select last entry",
            KeyAction::ScrollDetailUp => "Scroll details up",
            KeyAction::ScrollDetailDown => "Scroll details down",
            KeyAction::DetailPageUp => "Scroll details one page up",
            KeyAction::DetailPageDown => "Scroll details one page down",
            KeyAction::Activate => "Activate",
            KeyAction::Help => "Toggle this help",
            KeyAction::Quit => "Quit",
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a configuration names an action that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action name: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for KeyAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        KeyAction::ALL
            .into_iter()
            .find(|action| action.name() == wanted)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
