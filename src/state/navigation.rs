//! Cross-pane navigation state machine.
//!
//! `NavigationController` owns every list pane and the single focus cursor.
//! Input arrives as [`NavAction`]s; each handled action reports an
//! [`Outcome`] and, if the focused pane or its selection moved, raises the
//! `details_stale` flag for the detail view to pick up.

use super::list_pane::{Direction, ListPane};
use crate::model::{ContentError, Entry, KeyAction, PaneId};
use tracing::debug;

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;

/// Where the user is: the focused pane and its selected entry.
///
/// `index` always mirrors the focused pane's own selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FocusCursor {
    /// The focused pane.
    pub pane: PaneId,
    /// Its selected entry, `None` when the pane is empty.
    pub index: Option<usize>,
}

/// Navigation input, already resolved from keys or mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Focus the next pane, wrapping past the last.
    NextPane,
    /// Focus the previous pane, wrapping before the first.
    PrevPane,
    /// Move the focused pane's selection by `step` entries.
    MoveWithinPane(Direction, usize),
    /// Move the focused pane's selection by one screenful.
    Page(Direction),
    /// Select the first entry of the focused pane.
    Home,
    /// Select the last entry of the focused pane.
    End,
    /// Focus `pane` and select `index` there (mouse click).
    Select {
        /// Pane that was clicked.
        pane: PaneId,
        /// Entry under the pointer.
        index: usize,
    },
    /// Hand the cursor to the content source.
    Activate,
    /// End the session.
    Quit,
}

impl NavAction {
    /// Navigation meaning of a key action, if it has one.
    pub fn from_key_action(action: KeyAction) -> Option<Self> {
        let nav = match action {
            KeyAction::PaneLeft => Self::PrevPane,
            KeyAction::PaneRight => Self::NextPane,
            KeyAction::Up => Self::MoveWithinPane(Direction::Up, 1),
            KeyAction::Down => Self::MoveWithinPane(Direction::Down, 1),
            KeyAction::PageUp => Self::Page(Direction::Up),
            KeyAction::PageDown => Self::Page(Direction::Down),
            KeyAction::Home => Self::Home,
            KeyAction::End => Self::End,
            KeyAction::Activate => Self::Activate,
            KeyAction::Quit => Self::Quit,
            KeyAction::ScrollDetailUp
            | KeyAction::ScrollDetailDown
            | KeyAction::DetailPageUp
            | KeyAction::DetailPageDown
            | KeyAction::Help => return None,
        };
        Some(nav)
    }
}

/// Result of handling one [`NavAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The focus cursor moved.
    Moved,
    /// Nothing changed (e.g. already at the end of the list).
    Unchanged,
    /// The host should act on the entry under the cursor.
    Activate(FocusCursor),
    /// The session should end.
    Quit,
}

/// Owner of all list panes and the focus cursor.
#[derive(Debug, Clone)]
pub struct NavigationController {
    panes: Vec<ListPane>,
    focused: PaneId,
    details_stale: bool,
}

impl NavigationController {
    /// Create `pane_count` empty panes, focus on the first.
    pub fn new(pane_count: usize) -> Self {
        Self {
            panes: (0..pane_count).map(|i| ListPane::new(PaneId::new(i))).collect(),
            focused: PaneId::FIRST,
            // The first frame always needs the detail view bound.
            details_stale: true,
        }
    }

    /// Number of panes; fixed for the controller's lifetime.
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// All panes, indexed by [`PaneId`].
    pub fn panes(&self) -> &[ListPane] {
        &self.panes
    }

    /// Mutable access for geometry updates. Selection changes must go
    /// through [`NavigationController::handle`].
    pub fn panes_mut(&mut self) -> impl Iterator<Item = &mut ListPane> {
        self.panes.iter_mut()
    }

    /// Pane `id`, if in range.
    pub fn pane(&self, id: PaneId) -> Option<&ListPane> {
        self.panes.get(id.get())
    }

    /// The pane holding focus.
    pub fn focused_pane(&self) -> Option<&ListPane> {
        self.pane(self.focused)
    }

    /// The current cursor.
    pub fn cursor(&self) -> FocusCursor {
        FocusCursor {
            pane: self.focused,
            index: self.focused_pane().and_then(ListPane::selected_index),
        }
    }

    /// Entry under the cursor, if any.
    pub fn cursor_entry(&self) -> Option<&Entry> {
        self.focused_pane().and_then(ListPane::selected_entry)
    }

    /// Apply one action.
    pub fn handle(&mut self, action: NavAction) -> Outcome {
        let before = self.cursor();
        let count = self.panes.len();

        match action {
            NavAction::NextPane => self.focused = self.focused.next_in(count),
            NavAction::PrevPane => self.focused = self.focused.prev_in(count),
            NavAction::MoveWithinPane(direction, step) => {
                if let Some(pane) = self.focused_pane_mut() {
                    pane.move_selection(direction, step);
                }
            }
            NavAction::Page(direction) => {
                if let Some(pane) = self.focused_pane_mut() {
                    pane.page(direction);
                }
            }
            NavAction::Home => {
                if let Some(pane) = self.focused_pane_mut() {
                    pane.set_entry_pos(0, false);
                }
            }
            NavAction::End => {
                if let Some(pane) = self.focused_pane_mut() {
                    pane.set_entry_pos(isize::MAX, false);
                }
            }
            NavAction::Select { pane, index } => {
                let Some(target) = self.panes.get_mut(pane.get()) else {
                    return Outcome::Unchanged;
                };
                target.set_entry_pos(index.min(isize::MAX as usize) as isize, false);
                self.focused = pane;
            }
            NavAction::Activate => {
                self.details_stale = true;
                return Outcome::Activate(before);
            }
            NavAction::Quit => return Outcome::Quit,
        }

        let after = self.cursor();
        if after == before {
            return Outcome::Unchanged;
        }
        debug!(from = ?before, to = ?after, "Focus cursor moved");
        self.details_stale = true;
        Outcome::Moved
    }

    /// Replace the entries of `pane` and re-sync the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownPane`] when `pane` is out of range.
    pub fn regenerate(&mut self, pane: PaneId, entries: Vec<Entry>) -> Result<(), ContentError> {
        let count = self.panes.len();
        let target = self
            .panes
            .get_mut(pane.get())
            .ok_or(ContentError::UnknownPane {
                pane: pane.get(),
                count,
            })?;
        target.create_entries(entries);
        // Content may differ even where the cursor did not move.
        self.details_stale = true;
        Ok(())
    }

    /// Consume the stale-details flag.
    pub fn take_stale(&mut self) -> bool {
        std::mem::take(&mut self.details_stale)
    }

    fn focused_pane_mut(&mut self) -> Option<&mut ListPane> {
        self.panes.get_mut(self.focused.get())
    }
}
