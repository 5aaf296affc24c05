//! End-to-end navigation through a screen session.
//!
//! Drives a `ScreenSession` on a TestBackend with real key and mouse events
//! and checks the focus cursor, the detail binding and pane regeneration.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use panekit::model::{ContentError, Entry, PaneId};
use panekit::source::{ContentSource, StaticContent};
use panekit::state::FocusCursor;
use panekit::view::{ScreenSession, SessionOptions};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Helpers =====

fn numbered(prefix: &str, count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| Entry::new(format!("{prefix} {i}"), format!("{prefix} #{i}")))
        .collect()
}

fn seeded() -> StaticContent {
    StaticContent::new("SCENARIO")
        .with_pane("FIVE", numbered("five", 5))
        .with_pane("ONE", numbered("one", 1))
        .with_pane("FOUR", numbered("four", 4))
}

fn start<S: ContentSource>(source: S) -> ScreenSession<TestBackend, S> {
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    ScreenSession::new_for_test(terminal, source, SessionOptions::default()).unwrap()
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn cursor_of<S: ContentSource>(session: &ScreenSession<TestBackend, S>) -> (usize, Option<usize>) {
    let cursor = session.navigation().cursor();
    (cursor.pane.get(), cursor.index)
}

/// Source whose first pane shrinks on every activation.
struct Shrinking {
    inner: StaticContent,
    remaining: usize,
}

impl ContentSource for Shrinking {
    fn title(&self) -> &str {
        self.inner.title()
    }

    fn pane_count(&self) -> usize {
        self.inner.pane_count()
    }

    fn pane_title(&self, pane: PaneId) -> &str {
        self.inner.pane_title(pane)
    }

    fn generate(&mut self, pane: PaneId) -> Result<Vec<Entry>, ContentError> {
        let mut entries = self.inner.generate(pane)?;
        if pane == PaneId::FIRST {
            entries.truncate(self.remaining);
        }
        Ok(entries)
    }

    fn activate(&mut self, _cursor: FocusCursor) -> Result<(), ContentError> {
        self.remaining = self.remaining.saturating_sub(2);
        Ok(())
    }
}

/// Source whose activation always fails.
struct Broken(StaticContent);

impl ContentSource for Broken {
    fn title(&self) -> &str {
        self.0.title()
    }

    fn pane_count(&self) -> usize {
        self.0.pane_count()
    }

    fn pane_title(&self, pane: PaneId) -> &str {
        self.0.pane_title(pane)
    }

    fn generate(&mut self, pane: PaneId) -> Result<Vec<Entry>, ContentError> {
        self.0.generate(pane)
    }

    fn activate(&mut self, _cursor: FocusCursor) -> Result<(), ContentError> {
        Err(ContentError::Io(std::io::Error::other("host went away")))
    }
}

// ===== Scenarios =====

#[test]
fn scripted_walk_across_seeded_panes() {
    let mut session = start(seeded());
    assert_eq!(cursor_of(&session), (0, Some(0)));

    let steps = [
        (key(KeyCode::Tab), (1, Some(0))),
        (key(KeyCode::Tab), (2, Some(0))),
        (key(KeyCode::Down), (2, Some(1))),
        (key(KeyCode::BackTab), (1, Some(0))),
    ];
    for (event, expected) in steps {
        assert!(!session.handle_event(event));
        assert_eq!(cursor_of(&session), expected);
    }
    assert_eq!(session.detail_view().text(), "one #0");
}

#[test]
fn each_pane_remembers_its_own_selection() {
    let mut session = start(seeded());
    session.handle_event(key(KeyCode::End));
    session.handle_event(key(KeyCode::Right));
    session.handle_event(key(KeyCode::Right));
    session.handle_event(key(KeyCode::Char('j')));
    session.handle_event(key(KeyCode::Char('j')));
    session.handle_event(key(KeyCode::Right));

    assert_eq!(cursor_of(&session), (0, Some(4)));
    assert_eq!(session.detail_view().text(), "five #4");
    assert_eq!(session.navigation().panes()[2].selected_index(), Some(2));
}

#[test]
fn movement_clamps_at_both_ends() {
    let mut session = start(seeded());
    session.handle_event(key(KeyCode::Up));
    assert_eq!(cursor_of(&session), (0, Some(0)));
    for _ in 0..10 {
        session.handle_event(key(KeyCode::Down));
    }
    assert_eq!(cursor_of(&session), (0, Some(4)));
}

#[test]
fn activation_regenerates_and_clamps_selection() {
    let source = Shrinking {
        inner: seeded(),
        remaining: 5,
    };
    let mut session = start(source);
    session.handle_event(key(KeyCode::End));
    assert_eq!(cursor_of(&session), (0, Some(4)));

    session.handle_event(key(KeyCode::Enter));
    assert_eq!(session.navigation().panes()[0].len(), 3);
    assert_eq!(cursor_of(&session), (0, Some(2)));
    assert_eq!(session.detail_view().text(), "five #2");

    session.handle_event(key(KeyCode::Enter));
    session.handle_event(key(KeyCode::Enter));
    assert_eq!(cursor_of(&session), (0, None));
    assert_eq!(session.detail_view().text(), "No data.");
}

#[test]
fn failed_activation_keeps_entries() {
    let mut session = start(Broken(seeded()));
    session.handle_event(key(KeyCode::Down));
    assert!(!session.handle_event(key(KeyCode::Enter)));
    assert_eq!(session.navigation().panes()[0].len(), 5);
    assert_eq!(cursor_of(&session), (0, Some(1)));
}

#[test]
fn mouse_wheel_and_click_navigate() {
    let mut session = start(seeded());
    let four = session.geometry().panes[2];

    session.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: four.x,
        row: four.y + 2,
        modifiers: KeyModifiers::NONE,
    }));
    assert_eq!(cursor_of(&session), (2, Some(2)));

    session.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: four.x,
        row: four.y,
        modifiers: KeyModifiers::NONE,
    }));
    assert_eq!(cursor_of(&session), (2, Some(3)));
    assert_eq!(session.detail_view().text(), "four #3");

    // Clicking below the last entry selects nothing.
    session.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: four.x,
        row: four.y + 8,
        modifiers: KeyModifiers::NONE,
    }));
    assert_eq!(cursor_of(&session), (2, Some(3)));
}

#[test]
fn drawing_keeps_detail_scroll_for_same_entry() {
    let long: String = (0..30).map(|i| format!("line {i}\n")).collect();
    let source = StaticContent::new("T").with_pane("P", vec![Entry::new("only", long)]);
    let mut session = start(source);

    session.handle_event(key(KeyCode::Char('>')));
    session.handle_event(key(KeyCode::Char('>')));
    session.draw().unwrap();
    session.handle_event(key(KeyCode::Down));
    session.draw().unwrap();
    assert_eq!(session.detail_view().scroll_offset(), 2);
}
