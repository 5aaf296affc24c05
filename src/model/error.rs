//! Error types for panekit.
//!
//! `thiserror` enums composed with `?` and `From`. Only content loading can fail
//! at runtime. Layout, empty panes and stale selections are recovered in place
//! and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a [`ContentSource`](crate::source::ContentSource).
///
/// Fatal while the screen is being opened. After an activation the session
/// logs the error and keeps the entries it already has.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The screen description file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use panekit::model::ContentError;
    ///
    /// let err = ContentError::FileNotFound { path: PathBuf::from("/tmp/missing.toml") };
    /// assert!(err.to_string().contains("/tmp/missing.toml"));
    /// ```
    #[error("Screen file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// The screen description is not valid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    Toml {
        /// File being parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The screen description is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The screen description declares no panes.
    #[error("Screen file {path} declares no panes")]
    NoPanes {
        /// File being parsed.
        path: PathBuf,
    },

    /// A pane id outside the source's pane range was requested.
    #[error("No such pane: {pane} (source has {count})")]
    UnknownPane {
        /// Raw index requested.
        pane: usize,
        /// Number of panes the source provides.
        count: usize,
    },

    /// Generic I/O error while reading content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_pane_mentions_both_numbers() {
        let err = ContentError::UnknownPane { pane: 7, count: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io = std::io::Error::other("disk on fire");
        let err: ContentError = io.into();
        assert!(matches!(err, ContentError::Io(_)));
    }
}
