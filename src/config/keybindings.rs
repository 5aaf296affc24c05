//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// A key description in a config file could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid key '{0}'")]
pub struct KeySpecError(pub String);

/// Maps keyboard events to domain actions.
///
/// Provides default bindings (arrows plus vim-style letters) with the option
/// to override any action from the configuration file.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key.code, key.modifiers)).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(normalize(key.code, key.modifiers), action);
    }

    /// Labels of every key bound to `action`, sorted, for the help overlay.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| describe_key(key))
            .collect();
        keys.sort();
        keys
    }

    /// Apply per-action overrides such as `QUIT = ["q", "Esc"]`.
    ///
    /// Every action named in `overrides` loses its default keys and gets
    /// exactly the listed ones. A listed key that was bound to another action
    /// moves to the overriding action.
    ///
    /// # Errors
    ///
    /// Returns the first unknown action name or unparsable key.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, KeyBindingError> {
        for (name, keys) in overrides {
            let action: KeyAction = name.parse()?;
            self.bindings.retain(|_, bound| *bound != action);
            for spec in keys {
                self.bind(parse_key(spec)?, action);
            }
        }
        Ok(self)
    }
}

/// Failure applying binding overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyBindingError {
    /// The action name is not one of [`KeyAction::ALL`].
    #[error(transparent)]
    UnknownAction(#[from] crate::model::UnknownAction),
    /// A key description could not be parsed.
    #[error(transparent)]
    InvalidKey(#[from] KeySpecError),
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        let mut insert = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.bind(KeyEvent::new(code, modifiers), action);
        };

        // Pane focus
        insert(KeyCode::Left, KeyModifiers::NONE, KeyAction::PaneLeft);
        insert(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::PaneLeft);
        insert(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PaneLeft);
        insert(KeyCode::Right, KeyModifiers::NONE, KeyAction::PaneRight);
        insert(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::PaneRight);
        insert(KeyCode::Tab, KeyModifiers::NONE, KeyAction::PaneRight);

        // Selection
        insert(KeyCode::Up, KeyModifiers::NONE, KeyAction::Up);
        insert(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::Up);
        insert(KeyCode::Down, KeyModifiers::NONE, KeyAction::Down);
        insert(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::Down);
        insert(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        insert(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        insert(KeyCode::Home, KeyModifiers::NONE, KeyAction::Home);
        insert(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::Home);
        insert(KeyCode::End, KeyModifiers::NONE, KeyAction::End);
        insert(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::End);

        // Detail view
        insert(KeyCode::Char('<'), KeyModifiers::NONE, KeyAction::ScrollDetailUp);
        insert(KeyCode::Char('>'), KeyModifiers::NONE, KeyAction::ScrollDetailDown);
        insert(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::DetailPageUp);
        insert(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::DetailPageDown);

        // Application controls
        insert(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Activate);
        insert(KeyCode::Char('a'), KeyModifiers::NONE, KeyAction::Activate);
        insert(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);
        insert(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        insert(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit);

        bindings
    }
}

/// Canonical lookup form of a key.
///
/// Terminals disagree on whether shifted characters carry `SHIFT`; the
/// character itself already says it, so `SHIFT` is dropped for `Char` and
/// `BackTab`. Kind and state are reset so presses and repeats match alike.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    let modifiers = match code {
        KeyCode::Char(_) | KeyCode::BackTab => modifiers - KeyModifiers::SHIFT,
        _ => modifiers,
    };
    KeyEvent::new(code, modifiers)
}

/// Parse a key description such as `q`, `Esc`, `PageUp` or `Ctrl+c`.
///
/// Names are case-insensitive; a single character stands for itself.
///
/// ```
/// use crossterm::event::{KeyCode, KeyModifiers};
/// use panekit::config::keybindings::parse_key;
///
/// let key = parse_key("Ctrl+u").unwrap();
/// assert_eq!(key.code, KeyCode::Char('u'));
/// assert_eq!(key.modifiers, KeyModifiers::CONTROL);
/// ```
pub fn parse_key(spec: &str) -> Result<KeyEvent, KeySpecError> {
    let invalid = || KeySpecError(spec.to_string());
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut modifiers = KeyModifiers::NONE;
    let mut rest = trimmed;
    // A lone "+" is a key, not a separator.
    while let Some((prefix, tail)) = rest.split_once('+').filter(|(_, tail)| !tail.is_empty()) {
        modifiers |= match prefix.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return Err(invalid()),
        };
        rest = tail;
    }

    let mut chars = rest.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(ch), None) => KeyCode::Char(ch),
        _ => named_key(rest).ok_or_else(invalid)?,
    };
    Ok(KeyEvent::new(code, modifiers))
}

fn named_key(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        f if f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=24).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        _ => return None,
    };
    Some(code)
}

/// Short human label for a key, e.g. `Ctrl+u` or `←`.
pub fn describe_key(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    };

    let mut label = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        label.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        label.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        label.push_str("Shift+");
    }
    label.push_str(&base);
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let bindings = KeyBindings::default();
        for action in KeyAction::ALL {
            assert!(
                !bindings.keys_for(action).is_empty(),
                "{action} should have a default key"
            );
        }
    }

    #[test]
    fn default_bindings_map_angle_brackets_to_detail_scroll() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('<'))), Some(KeyAction::ScrollDetailUp));
        assert_eq!(bindings.get(key(KeyCode::Char('>'))), Some(KeyAction::ScrollDetailDown));
    }

    #[test]
    fn shifted_characters_match_with_or_without_shift_flag() {
        let bindings = KeyBindings::default();
        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(bindings.get(shifted), Some(KeyAction::End));
        assert_eq!(bindings.get(key(KeyCode::Char('G'))), Some(KeyAction::End));

        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(bindings.get(question), Some(KeyAction::Help));
    }

    #[test]
    fn control_modifier_is_significant() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('d'))), None);
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(KeyAction::DetailPageDown)
        );
    }

    #[test]
    fn unbound_key_maps_to_nothing() {
        assert_eq!(KeyBindings::default().get(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn parse_key_accepts_names_and_characters() {
        assert_eq!(parse_key("q"), Ok(key(KeyCode::Char('q'))));
        assert_eq!(parse_key("Q"), Ok(key(KeyCode::Char('Q'))));
        assert_eq!(parse_key("esc"), Ok(key(KeyCode::Esc)));
        assert_eq!(parse_key("PageDown"), Ok(key(KeyCode::PageDown)));
        assert_eq!(parse_key("F5"), Ok(key(KeyCode::F(5))));
        assert_eq!(parse_key("+"), Ok(key(KeyCode::Char('+'))));
        assert_eq!(
            parse_key("Ctrl+Alt+x"),
            Ok(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::CONTROL | KeyModifiers::ALT
            ))
        );
    }

    #[test]
    fn parse_key_rejects_garbage() {
        for spec in ["", "Hyper+x", "NotAKey", "F99"] {
            assert_eq!(parse_key(spec), Err(KeySpecError(spec.to_string())));
        }
    }

    #[test]
    fn overrides_replace_defaults_for_named_action() {
        let overrides = BTreeMap::from([("QUIT".to_string(), vec!["x".to_string()])]);
        let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();

        assert_eq!(bindings.get(key(KeyCode::Char('x'))), Some(KeyAction::Quit));
        assert_eq!(bindings.get(key(KeyCode::Char('q'))), None);
        assert_eq!(bindings.get(key(KeyCode::Esc)), None);
        // Other actions keep their defaults.
        assert_eq!(bindings.get(key(KeyCode::Down)), Some(KeyAction::Down));
    }

    #[test]
    fn override_can_steal_key_from_another_action() {
        let overrides = BTreeMap::from([("help".to_string(), vec!["a".to_string()])]);
        let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();
        assert_eq!(bindings.get(key(KeyCode::Char('a'))), Some(KeyAction::Help));
        assert_eq!(bindings.keys_for(KeyAction::Activate), vec!["Enter"]);
    }

    #[test]
    fn overrides_report_unknown_action_and_bad_key() {
        let unknown = BTreeMap::from([("FLY".to_string(), vec!["f".to_string()])]);
        assert!(matches!(
            KeyBindings::default().with_overrides(&unknown),
            Err(KeyBindingError::UnknownAction(_))
        ));

        let bad = BTreeMap::from([("QUIT".to_string(), vec!["Meta+q".to_string()])]);
        assert!(matches!(
            KeyBindings::default().with_overrides(&bad),
            Err(KeyBindingError::InvalidKey(_))
        ));
    }

    #[test]
    fn keys_for_lists_sorted_labels() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.keys_for(KeyAction::Quit), vec!["Esc", "q"]);
        assert_eq!(bindings.keys_for(KeyAction::DetailPageUp), vec!["Ctrl+u"]);
        assert_eq!(bindings.keys_for(KeyAction::PaneLeft), vec!["Shift+Tab", "h", "←"]);
    }
}
