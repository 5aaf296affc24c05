//! Configuration file loading with precedence handling.

use super::keybindings::{KeyBindingError, KeyBindings};
use crate::view::layout::LayoutConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "PANEKIT_CONFIG";

/// Environment variable selecting a screen reader mode.
pub const SCREEN_READER_ENV_VAR: &str = "PANEKIT_SCREEN_READER";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but its value cannot be used.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted name of the setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A `[keybindings]` entry names an unknown action or key.
    #[error("Invalid key binding: {0}")]
    KeyBinding(#[from] KeyBindingError),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/panekit/config.toml`:
///
/// ```toml
/// screen_reader_mode = "orca"
/// log_file_path = "/tmp/panekit.log"
///
/// [layout]
/// column_weights = [50, 25, 25]
/// max_height = 24
///
/// [keybindings]
/// QUIT = ["q", "Ctrl+c"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Screen geometry.
    #[serde(default)]
    pub layout: Option<LayoutSection>,

    /// Active screen reader, if any (e.g. "orca").
    #[serde(default)]
    pub screen_reader_mode: Option<String>,

    /// Screen reader modes that want the entry summary spoken before its detail.
    #[serde(default)]
    pub summary_prefix_modes: Option<Vec<String>>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Per-action key overrides, action name to list of keys.
    #[serde(default)]
    pub keybindings: Option<BTreeMap<String, Vec<String>>>,
}

/// `[layout]` section. Unset fields keep the [`LayoutConfig`] defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Relative pane widths, left to right.
    #[serde(default)]
    pub column_weights: Option<Vec<u16>>,
    /// Rows of the title strip including its borders.
    #[serde(default)]
    pub title_height: Option<u16>,
    /// Rows of detail text.
    #[serde(default)]
    pub detail_height: Option<u16>,
    /// Canvas width the window fills before growing more slowly.
    #[serde(default)]
    pub base_width: Option<u16>,
    /// Cap on the window height.
    #[serde(default)]
    pub max_height: Option<u16>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Screen geometry parameters.
    pub layout: LayoutConfig,
    /// Active screen reader mode; `None` disables the accessibility feed.
    pub screen_reader_mode: Option<String>,
    /// Modes that prefix the detail feed with the entry summary.
    pub summary_prefix_modes: Vec<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Key overrides, applied on top of the default bindings.
    pub keybindings: BTreeMap<String, Vec<String>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            screen_reader_mode: None,
            summary_prefix_modes: vec!["orca".to_string()],
            log_file_path: default_log_path(),
            keybindings: BTreeMap::new(),
        }
    }
}

impl ResolvedConfig {
    /// Default bindings with this config's overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyBinding`] for unknown actions or keys.
    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        Ok(KeyBindings::default().with_overrides(&self.keybindings)?)
    }

    /// Whether the active screen reader mode wants the summary before the detail.
    pub fn prefixes_summary(&self) -> bool {
        self.screen_reader_mode
            .as_ref()
            .is_some_and(|mode| self.summary_prefix_modes.iter().any(|m| m == mode))
    }

    /// Check values that parse but cannot drive a layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.column_weights.is_empty() || layout.column_weights.iter().all(|&w| w == 0) {
            return Err(ConfigError::InvalidValue {
                field: "layout.column_weights",
                reason: "at least one weight must be positive".to_string(),
            });
        }
        if layout.title_height < 3 {
            return Err(ConfigError::InvalidValue {
                field: "layout.title_height",
                reason: format!("must be at least 3, got {}", layout.title_height),
            });
        }
        if layout.detail_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "layout.detail_height",
                reason: "must be at least 1".to_string(),
            });
        }
        if layout.max_height == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "layout.max_height",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/panekit/panekit.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("panekit").join("panekit.log")
    } else {
        PathBuf::from("panekit.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/panekit/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("panekit").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PANEKIT_CONFIG` environment variable
/// 3. Default path `~/.config/panekit/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let layout = match config.layout {
        Some(section) => LayoutConfig {
            column_weights: section
                .column_weights
                .unwrap_or(defaults.layout.column_weights),
            title_height: section.title_height.unwrap_or(defaults.layout.title_height),
            detail_height: section
                .detail_height
                .unwrap_or(defaults.layout.detail_height),
            base_width: section.base_width.unwrap_or(defaults.layout.base_width),
            max_height: section.max_height.or(defaults.layout.max_height),
        },
        None => defaults.layout,
    };

    ResolvedConfig {
        layout,
        screen_reader_mode: config.screen_reader_mode.or(defaults.screen_reader_mode),
        summary_prefix_modes: config
            .summary_prefix_modes
            .unwrap_or(defaults.summary_prefix_modes),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PANEKIT_SCREEN_READER`: screen reader mode; an empty value turns it off
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(mode) = std::env::var(SCREEN_READER_ENV_VAR) {
        config.screen_reader_mode = (!mode.is_empty()).then_some(mode);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    screen_reader_override: Option<String>,
) -> ResolvedConfig {
    if let Some(mode) = screen_reader_override {
        config.screen_reader_mode = (!mode.is_empty()).then_some(mode);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
