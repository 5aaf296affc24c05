//! Mouse event handler.
//!
//! Pure functions that map mouse events onto navigation input. Panes must
//! already carry the geometry of the last layout.

use super::list_pane::Direction;
use super::navigation::{NavAction, NavigationController};
use crate::model::PaneId;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// What a mouse event asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseCommand {
    /// Feed this action to the navigation controller.
    Navigate(NavAction),
    /// Scroll the detail view one line.
    ScrollDetail(Direction),
    /// Nothing under the pointer reacts to this event.
    Ignore,
}

/// Region of the screen under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// `row` rows below the top of the entry area of `pane`.
    Pane {
        /// Pane under the pointer.
        pane: PaneId,
        /// Row offset inside its entry area.
        row: u16,
    },
    /// The detail strip.
    Detail,
    /// Chrome or anything past the window.
    Outside,
}

/// Find what lies under `(column, row)`.
pub fn hit_test(column: u16, row: u16, nav: &NavigationController, detail: Rect) -> HitTarget {
    let position = Position::new(column, row);
    for pane in nav.panes() {
        let area = pane.geometry();
        if area.contains(position) {
            return HitTarget::Pane {
                pane: pane.id(),
                row: row - area.y,
            };
        }
    }
    if detail.contains(position) {
        return HitTarget::Detail;
    }
    HitTarget::Outside
}

/// Translate a mouse event.
///
/// - Left click on an entry focuses its pane and selects it.
/// - Wheel over a pane moves that pane's selection by one entry.
/// - Wheel over the detail view scrolls it.
pub fn handle_mouse(event: &MouseEvent, nav: &NavigationController, detail: Rect) -> MouseCommand {
    let target = hit_test(event.column, event.row, nav, detail);
    let wheel = match event.kind {
        MouseEventKind::ScrollUp => Some(Direction::Up),
        MouseEventKind::ScrollDown => Some(Direction::Down),
        _ => None,
    };

    match (event.kind, target) {
        (MouseEventKind::Down(MouseButton::Left), HitTarget::Pane { pane, row }) => nav
            .pane(pane)
            .and_then(|p| p.entry_at_row(row))
            .map_or(MouseCommand::Ignore, |index| {
                MouseCommand::Navigate(NavAction::Select { pane, index })
            }),
        (_, HitTarget::Pane { pane, .. }) => {
            let (Some(direction), Some(current)) =
                (wheel, nav.pane(pane).and_then(|p| p.selected_index()))
            else {
                return MouseCommand::Ignore;
            };
            let index = match direction {
                Direction::Up => current.saturating_sub(1),
                Direction::Down => current.saturating_add(1),
            };
            MouseCommand::Navigate(NavAction::Select { pane, index })
        }
        (_, HitTarget::Detail) => wheel.map_or(MouseCommand::Ignore, MouseCommand::ScrollDetail),
        (_, HitTarget::Outside) => MouseCommand::Ignore,
    }
}
