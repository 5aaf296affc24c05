//! Domain model types (pure).

pub mod entry;
pub mod error;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use entry::Entry;
pub use error::ContentError;
pub use identifiers::PaneId;
pub use key_action::{KeyAction, UnknownAction};
