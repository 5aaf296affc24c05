//! Tracing subscriber initialization.
//!
//! The screen owns the terminal, so logs go to a file. Follow them with
//! `tail -f` from another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Log path does not end in a UTF-8 file name
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the global tracing subscriber, writing to `log_path`.
///
/// Respects `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Missing parent
/// directories are created.
///
/// # Errors
///
/// Fails when the directory cannot be created, the path has no file name,
/// or a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = log_target(log_path)?;
    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// Split a log path into the directory to create and the file name to append to.
///
/// A bare file name logs into the current directory.
fn log_target(log_path: &Path) -> Result<(PathBuf, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn log_target_splits_directory_and_file() {
        let (dir, file) = log_target(Path::new("/var/log/panekit/panekit.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/panekit"));
        assert_eq!(file, "panekit.log");
    }

    #[test]
    fn bare_file_name_logs_to_current_directory() {
        let (dir, file) = log_target(Path::new("panekit.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, "panekit.log");
    }

    #[test]
    fn path_without_file_name_is_invalid() {
        assert!(matches!(
            log_target(Path::new("/")),
            Err(LoggingError::InvalidPath(_))
        ));
        assert!(matches!(
            log_target(Path::new("logs/..")),
            Err(LoggingError::InvalidPath(_))
        ));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let temp = tempfile::tempdir().unwrap();
        let log_dir = temp.path().join("nested").join("logs");
        let log_file = log_dir.join("test.log");

        // The subscriber may already be set by another test; the directory
        // is created either way.
        let _ = init(&log_file);

        assert!(log_dir.is_dir(), "Log directory should be created: {log_dir:?}");
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let temp = tempfile::tempdir().unwrap();
        let _ = init(&temp.path().join("first.log"));
        assert!(matches!(
            init(&temp.path().join("second.log")),
            Err(LoggingError::SubscriberAlreadySet)
        ));
    }
}
