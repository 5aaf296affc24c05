//! Help overlay widget displaying the active key bindings.
//!
//! Shows a centered modal listing every action with the keys bound to it.
//! Toggled by the HELP key, dismissed by HELP or QUIT.

use super::constants::{HELP_KEY_COLUMN_WIDTH, HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::ScreenStyles;
use crate::config::KeyBindings;
use crate::model::KeyAction;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const UNBOUND_LABEL: &str = "(unbound)";

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;

/// Render the help overlay centered on the screen.
///
/// `scroll_offset` is the first listed action shown; it is clamped to the
/// number of actions.
pub fn render_help_overlay(
    frame: &mut Frame,
    bindings: &KeyBindings,
    styles: &ScreenStyles,
    scroll_offset: u16,
) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);
    if popup_area.width < 3 || popup_area.height < 3 {
        return;
    }

    frame.render_widget(Clear, popup_area);

    let scroll = scroll_offset.min(max_help_scroll());
    let help = Paragraph::new(help_lines(bindings, styles))
        .block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(styles.border),
        )
        .alignment(Alignment::Left)
        .scroll((scroll, 0));
    frame.render_widget(help, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height - 1,
        width: popup_area.width,
        height: 1,
    };
    let close = format!(
        " Press {} or {} to close ",
        key_label(bindings, KeyAction::Quit),
        key_label(bindings, KeyAction::Help)
    );
    let hint = Paragraph::new(Line::from(Span::styled(close, styles.placeholder)))
        .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Title-bar reminder of the detail scroll, activate and help keys.
///
/// Returned as colour markup; each action shows its first bound key.
///
/// ```
/// # use panekit::config::KeyBindings;
/// # use panekit::view::key_hint;
/// # use panekit::view_state::strip_markup;
/// assert_eq!(
///     strip_markup(&key_hint(&KeyBindings::default())),
///     "[</>] Scroll details [Enter] Activate [?] Keys"
/// );
/// ```
pub fn key_hint(bindings: &KeyBindings) -> String {
    let first = |action: KeyAction| {
        bindings
            .keys_for(action)
            .into_iter()
            .next()
            .unwrap_or_else(|| UNBOUND_LABEL.to_string())
    };
    format!(
        "[<color_yellow>{}/{}</color>] Scroll details [<color_yellow>{}</color>] Activate \
         [<color_yellow>{}</color>] Keys",
        first(KeyAction::ScrollDetailUp),
        first(KeyAction::ScrollDetailDown),
        first(KeyAction::Activate),
        first(KeyAction::Help),
    )
}

/// Largest useful scroll offset for the overlay.
pub fn max_help_scroll() -> u16 {
    u16::try_from(KeyAction::ALL.len().saturating_sub(1)).unwrap_or(u16::MAX)
}

/// One line per action: bound keys, then the description.
fn help_lines(bindings: &KeyBindings, styles: &ScreenStyles) -> Vec<Line<'static>> {
    let key_style = styles.header_focused.remove_modifier(Modifier::UNDERLINED);
    let desc_style = Style::default();

    KeyAction::ALL
        .iter()
        .map(|&action| {
            let label = key_label(bindings, action);
            Line::from(vec![
                Span::styled(format!(" {label:<width$}", width = HELP_KEY_COLUMN_WIDTH), key_style),
                Span::styled(action.description(), desc_style),
            ])
        })
        .collect()
}

/// Every key bound to `action`, joined with `/`.
fn key_label(bindings: &KeyBindings, action: KeyAction) -> String {
    let keys = bindings.keys_for(action);
    if keys.is_empty() {
        UNBOUND_LABEL.to_string()
    } else {
        keys.join("/")
    }
}

/// Calculate a rect of the given percentage size centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let popup_height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - popup_width) / 2,
        y: area.y + (area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}
