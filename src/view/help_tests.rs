//! Tests for help overlay widget

use super::*;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn render(width: u16, height: u16, bindings: &KeyBindings, scroll: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_help_overlay(frame, bindings, &ScreenStyles::default(), scroll))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn overlay_lists_actions_with_their_keys() {
    let text = render(80, 30, &KeyBindings::default(), 0);
    assert!(text.contains(" Keys "));
    assert!(text.contains("Focus previous pane"));
    assert!(text.contains("Scroll details down"));
    assert!(text.contains("Esc/q"), "quit keys should be listed:\n{text}");
    assert!(text.contains("Press Esc/q or ? to close"));
}

#[test]
fn overlay_reflects_overridden_bindings() {
    let overrides = std::collections::BTreeMap::from([(
        "QUIT".to_string(),
        vec!["Ctrl+x".to_string()],
    )]);
    let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();
    let text = render(80, 30, &bindings, 0);
    assert!(text.contains("Ctrl+x"));
    assert!(!text.contains("Esc/q"));
}

#[test]
fn close_instructions_follow_rebound_keys() {
    let overrides = std::collections::BTreeMap::from([
        ("QUIT".to_string(), vec!["x".to_string()]),
        ("HELP".to_string(), vec!["F1".to_string()]),
    ]);
    let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();
    let text = render(80, 30, &bindings, 0);
    assert!(text.contains("Press x or F1 to close"), "{text}");
    assert!(!text.contains("Press Esc"));
}

#[test]
fn key_hint_uses_first_bound_key() {
    let hint = key_hint(&KeyBindings::default());
    assert_eq!(
        hint,
        "[<color_yellow></></color>] Scroll details [<color_yellow>Enter</color>] Activate \
         [<color_yellow>?</color>] Keys"
    );
}

#[test]
fn key_hint_follows_overrides() {
    let overrides = std::collections::BTreeMap::from([
        ("SCROLL_DETAIL_UP".to_string(), vec!["Ctrl+p".to_string()]),
        ("ACTIVATE".to_string(), vec![]),
    ]);
    let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();
    let hint = crate::view_state::strip_markup(&key_hint(&bindings));
    assert_eq!(hint, "[Ctrl+p/>] Scroll details [(unbound)] Activate [?] Keys");
}

#[test]
fn scrolling_hides_leading_actions() {
    let text = render(80, 30, &KeyBindings::default(), 2);
    assert!(!text.contains("Focus previous pane"));
    assert!(text.contains("Select previous entry"));
}

#[test]
fn scroll_is_clamped_to_last_action() {
    let text = render(80, 30, &KeyBindings::default(), u16::MAX);
    assert!(text.contains("Quit"));
}

#[test]
fn tiny_canvas_does_not_panic() {
    for (w, h) in [(1, 1), (3, 3), (4, 4), (10, 2)] {
        let _ = render(w, h, &KeyBindings::default(), 0);
    }
}

#[test]
fn centered_rect_is_centered() {
    let rect = centered_rect(50, 50, Rect::new(0, 0, 80, 24));
    assert_eq!(rect, Rect::new(20, 6, 40, 12));
}
