//! Configuration module.
//!
//! - `loader`: config file discovery, merge and precedence
//! - `keybindings`: key to action resolution

pub mod keybindings;
pub mod loader;

pub use keybindings::{KeyBindingError, KeyBindings};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ConfigError, ConfigFile, LayoutSection, ResolvedConfig,
};
