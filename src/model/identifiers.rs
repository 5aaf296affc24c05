//! Core identifier newtypes.
//!
//! Panes are addressed by position; the pane order is also the focus cycle order.

use std::fmt;

/// Position of a list pane in the left-to-right cycle (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PaneId(usize);

impl PaneId {
    /// The first pane. Focus starts here.
    pub const FIRST: Self = Self(0);

    /// Create a pane id from a raw 0-based position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based position.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Next pane in a cycle of `count` panes, wrapping past the last one.
    ///
    /// ```
    /// # use panekit::model::PaneId;
    /// assert_eq!(PaneId::new(2).next_in(3), PaneId::new(0));
    /// assert_eq!(PaneId::new(0).next_in(3), PaneId::new(1));
    /// ```
    pub fn next_in(&self, count: usize) -> Self {
        if count == 0 {
            return *self;
        }
        Self((self.0 + 1) % count)
    }

    /// Previous pane in a cycle of `count` panes, wrapping before the first one.
    ///
    /// ```
    /// # use panekit::model::PaneId;
    /// assert_eq!(PaneId::new(0).prev_in(3), PaneId::new(2));
    /// ```
    pub fn prev_in(&self, count: usize) -> Self {
        if count == 0 {
            return *self;
        }
        Self((self.0 % count + count - 1) % count)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane {}", self.0)
    }
}
