//! Screen styling configuration.
//!
//! Colours for chrome, selection highlight and placeholders. Every style
//! keeps its modifiers when colour is disabled, so the selection stays
//! visible on monochrome terminals.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off, regardless of environment.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

// ===== ScreenStyles =====

/// Styles for every element the screen draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenStyles {
    /// Window border, rules and separators.
    pub border: Style,
    /// Title strip text.
    pub title: Style,
    /// Header of an unfocused pane.
    pub header: Style,
    /// Header of the focused pane.
    pub header_focused: Style,
    /// Unselected entry text.
    pub entry: Style,
    /// Selected entry in the focused pane.
    pub selected_focused: Style,
    /// Selected entry in any other pane.
    pub selected_unfocused: Style,
    /// `-- none --` placeholder.
    pub placeholder: Style,
    /// ▲/▼ scroll indicators.
    pub indicator: Style,
    /// Whether `<color_NAME>` markup is drawn in colour.
    pub markup_colors: bool,
}

impl ScreenStyles {
    /// Build styles for `config`.
    pub fn new(config: ColorConfig) -> Self {
        let base = Self {
            border: Style::default(),
            title: Style::default().add_modifier(Modifier::BOLD),
            header: Style::default(),
            header_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            entry: Style::default(),
            selected_focused: Style::default().add_modifier(Modifier::REVERSED),
            selected_unfocused: Style::default().add_modifier(Modifier::BOLD),
            placeholder: Style::default().add_modifier(Modifier::DIM),
            indicator: Style::default(),
            markup_colors: false,
        };
        if !config.colors_enabled() {
            return base;
        }
        Self {
            border: base.border.fg(Color::Cyan),
            title: base.title.fg(Color::White),
            header: base.header.fg(Color::Gray),
            header_focused: base.header_focused.fg(Color::Yellow),
            placeholder: base.placeholder.fg(Color::DarkGray),
            indicator: base.indicator.fg(Color::Yellow),
            markup_colors: true,
            ..base
        }
    }

    /// Style for an entry row.
    pub fn for_row(&self, selected: bool, focused: bool, placeholder: bool) -> Style {
        match (placeholder, selected, focused) {
            (true, _, _) => self.placeholder,
            (false, true, true) => self.selected_focused,
            (false, true, false) => self.selected_unfocused,
            (false, false, _) => self.entry,
        }
    }
}

impl Default for ScreenStyles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // ===== ColorConfig Tests =====

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(!config.colors_enabled(), "--no-color flag should disable colors");
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled(), "NO_COLOR env var should disable colors");
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_no_color_env_any_value_disables() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    // ===== ScreenStyles Tests =====

    #[test]
    fn disabled_colors_drop_foregrounds_but_keep_modifiers() {
        let styles = ScreenStyles::new(ColorConfig::disabled());
        assert_eq!(styles.border.fg, None);
        assert_eq!(styles.header_focused.fg, None);
        assert!(styles.selected_focused.add_modifier.contains(Modifier::REVERSED));
        assert!(styles.placeholder.add_modifier.contains(Modifier::DIM));
        assert!(!styles.markup_colors);
    }

    #[test]
    fn enabled_colors_style_chrome() {
        let styles = ScreenStyles::new(ColorConfig::enabled());
        assert_eq!(styles.border.fg, Some(Color::Cyan));
        assert_eq!(styles.header_focused.fg, Some(Color::Yellow));
        assert!(styles.markup_colors);
    }

    #[test]
    fn row_style_depends_on_selection_and_focus() {
        let styles = ScreenStyles::default();
        assert_eq!(styles.for_row(true, true, false), styles.selected_focused);
        assert_eq!(styles.for_row(true, false, false), styles.selected_unfocused);
        assert_eq!(styles.for_row(false, true, false), styles.entry);
        assert_eq!(styles.for_row(false, false, true), styles.placeholder);
    }
}
