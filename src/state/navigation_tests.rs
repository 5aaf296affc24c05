//! Tests for the navigation controller.

#![cfg(test)]

use super::{FocusCursor, NavAction, NavigationController, Outcome};
use crate::model::{ContentError, Entry, KeyAction, PaneId};
use crate::state::list_pane::Direction;
use proptest::prelude::*;

fn numbered(count: usize) -> Vec<Entry> {
    (0..count).map(|i| Entry::new(format!("e{i}"), format!("d{i}"))).collect()
}

fn seeded(counts: &[usize]) -> NavigationController {
    let mut nav = NavigationController::new(counts.len());
    for (i, &count) in counts.iter().enumerate() {
        nav.regenerate(PaneId::new(i), numbered(count)).unwrap();
    }
    nav.take_stale();
    nav
}

fn cursor(pane: usize, index: Option<usize>) -> FocusCursor {
    FocusCursor {
        pane: PaneId::new(pane),
        index,
    }
}

// ===== Initial state =====

#[test]
fn starts_on_first_pane_with_its_selection() {
    let nav = seeded(&[3, 2]);
    assert_eq!(nav.cursor(), cursor(0, Some(0)));
    assert_eq!(nav.cursor_entry().map(Entry::detail), Some("d0"));
}

#[test]
fn new_controller_starts_stale() {
    let mut nav = NavigationController::new(2);
    assert!(nav.take_stale());
    assert!(!nav.take_stale());
}

// ===== Pane cycling =====

#[test]
fn next_pane_wraps_to_first() {
    let mut nav = seeded(&[1, 1, 1]);
    nav.handle(NavAction::NextPane);
    nav.handle(NavAction::NextPane);
    assert_eq!(nav.cursor().pane, PaneId::new(2));
    nav.handle(NavAction::NextPane);
    assert_eq!(nav.cursor().pane, PaneId::FIRST);
}

#[test]
fn prev_pane_wraps_to_last() {
    let mut nav = seeded(&[1, 1, 1]);
    nav.handle(NavAction::PrevPane);
    assert_eq!(nav.cursor().pane, PaneId::new(2));
}

#[test]
fn cursor_index_follows_each_panes_own_selection() {
    let mut nav = seeded(&[5, 5]);
    nav.handle(NavAction::MoveWithinPane(Direction::Down, 3));
    nav.handle(NavAction::NextPane);
    assert_eq!(nav.cursor(), cursor(1, Some(0)));
    nav.handle(NavAction::PrevPane);
    assert_eq!(nav.cursor(), cursor(0, Some(3)));
}

#[test]
fn focusing_empty_pane_gives_no_index() {
    let mut nav = seeded(&[2, 0]);
    nav.handle(NavAction::NextPane);
    assert_eq!(nav.cursor(), cursor(1, None));
    assert!(nav.cursor_entry().is_none());
}

#[test]
fn single_pane_cycle_is_unchanged() {
    let mut nav = seeded(&[3]);
    assert_eq!(nav.handle(NavAction::NextPane), Outcome::Unchanged);
    assert!(!nav.take_stale());
}

// ===== Within-pane movement =====

#[test]
fn movement_clamps_at_both_ends() {
    let mut nav = seeded(&[3]);
    assert_eq!(nav.handle(NavAction::MoveWithinPane(Direction::Up, 1)), Outcome::Unchanged);

    nav.handle(NavAction::MoveWithinPane(Direction::Down, 10));
    assert_eq!(nav.cursor().index, Some(2));
    assert_eq!(nav.handle(NavAction::MoveWithinPane(Direction::Down, 1)), Outcome::Unchanged);
}

#[test]
fn home_and_end_jump_to_extremes() {
    let mut nav = seeded(&[6]);
    assert_eq!(nav.handle(NavAction::End), Outcome::Moved);
    assert_eq!(nav.cursor().index, Some(5));
    assert_eq!(nav.handle(NavAction::Home), Outcome::Moved);
    assert_eq!(nav.cursor().index, Some(0));
}

#[test]
fn page_moves_within_focused_pane() {
    let mut nav = seeded(&[4]);
    // Panes without geometry show one row, so a page is one entry.
    nav.handle(NavAction::Page(Direction::Down));
    assert_eq!(nav.cursor().index, Some(1));
}

// ===== Mouse selection =====

#[test]
fn select_focuses_pane_and_entry() {
    let mut nav = seeded(&[3, 4]);
    assert_eq!(
        nav.handle(NavAction::Select {
            pane: PaneId::new(1),
            index: 2
        }),
        Outcome::Moved
    );
    assert_eq!(nav.cursor(), cursor(1, Some(2)));
}

#[test]
fn select_clamps_index_and_ignores_unknown_pane() {
    let mut nav = seeded(&[3]);
    nav.handle(NavAction::Select {
        pane: PaneId::FIRST,
        index: 99,
    });
    assert_eq!(nav.cursor().index, Some(2));

    let outcome = nav.handle(NavAction::Select {
        pane: PaneId::new(7),
        index: 0,
    });
    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(nav.cursor(), cursor(0, Some(2)));
}

// ===== Activate / Quit =====

#[test]
fn activate_reports_cursor_and_marks_stale() {
    let mut nav = seeded(&[3]);
    nav.handle(NavAction::MoveWithinPane(Direction::Down, 1));
    nav.take_stale();

    assert_eq!(nav.handle(NavAction::Activate), Outcome::Activate(cursor(0, Some(1))));
    assert!(nav.take_stale());
}

#[test]
fn quit_changes_nothing() {
    let mut nav = seeded(&[3]);
    assert_eq!(nav.handle(NavAction::Quit), Outcome::Quit);
    assert!(!nav.take_stale());
}

// ===== Stale flag =====

#[test]
fn stale_is_consumed_once() {
    let mut nav = seeded(&[3]);
    nav.handle(NavAction::MoveWithinPane(Direction::Down, 1));
    assert!(nav.take_stale());
    assert!(!nav.take_stale());
}

// ===== Regeneration =====

#[test]
fn regeneration_clamps_cursor() {
    let mut nav = seeded(&[5]);
    nav.handle(NavAction::End);

    nav.regenerate(PaneId::FIRST, numbered(2)).unwrap();
    assert_eq!(nav.cursor(), cursor(0, Some(1)));
    assert!(nav.take_stale());
}

#[test]
fn regeneration_of_unknown_pane_is_an_error() {
    let mut nav = seeded(&[1]);
    let err = nav.regenerate(PaneId::new(4), numbered(1)).unwrap_err();
    assert!(matches!(err, ContentError::UnknownPane { pane: 4, count: 1 }));
}

// ===== Key mapping =====

#[test]
fn detail_and_help_actions_are_not_navigation() {
    assert_eq!(NavAction::from_key_action(KeyAction::ScrollDetailDown), None);
    assert_eq!(NavAction::from_key_action(KeyAction::Help), None);
    assert_eq!(
        NavAction::from_key_action(KeyAction::PaneRight),
        Some(NavAction::NextPane)
    );
    assert_eq!(
        NavAction::from_key_action(KeyAction::Down),
        Some(NavAction::MoveWithinPane(Direction::Down, 1))
    );
}

// ===== End-to-end =====

#[test]
fn scripted_walk_across_three_panes() {
    let mut nav = seeded(&[5, 1, 4]);
    assert_eq!(nav.cursor(), cursor(0, Some(0)));

    let script = [
        (NavAction::NextPane, cursor(1, Some(0))),
        (NavAction::NextPane, cursor(2, Some(0))),
        (NavAction::MoveWithinPane(Direction::Down, 1), cursor(2, Some(1))),
        (NavAction::PrevPane, cursor(1, Some(0))),
    ];
    for (action, expected) in script {
        assert_eq!(nav.handle(action), Outcome::Moved);
        assert_eq!(nav.cursor(), expected);
    }
    assert_eq!(nav.cursor(), cursor(1, Some(0)));
}

proptest! {
    #[test]
    fn next_then_prev_is_identity(counts in prop::collection::vec(0usize..6, 1..6), start in 0usize..6) {
        let mut nav = seeded(&counts);
        for _ in 0..start {
            nav.handle(NavAction::NextPane);
        }
        let before = nav.cursor();
        nav.handle(NavAction::NextPane);
        nav.handle(NavAction::PrevPane);
        prop_assert_eq!(nav.cursor(), before);
    }

    #[test]
    fn cursor_index_always_in_bounds(
        counts in prop::collection::vec(0usize..8, 1..5),
        steps in prop::collection::vec(0u8..6, 0..40),
    ) {
        let mut nav = seeded(&counts);
        for step in steps {
            let action = match step {
                0 => NavAction::NextPane,
                1 => NavAction::PrevPane,
                2 => NavAction::MoveWithinPane(Direction::Up, 2),
                3 => NavAction::MoveWithinPane(Direction::Down, 3),
                4 => NavAction::Home,
                _ => NavAction::End,
            };
            nav.handle(action);
            let c = nav.cursor();
            let len = counts[c.pane.get()];
            match c.index {
                Some(i) => prop_assert!(i < len),
                None => prop_assert_eq!(len, 0),
            }
        }
    }
}
