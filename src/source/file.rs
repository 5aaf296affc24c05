//! File-backed screen description.
//!
//! ```toml
//! title = "STATUS"
//!
//! [[panes]]
//! title = "HEALTH"
//!
//! [[panes.entries]]
//! summary = "Head: <color_green>OK</color>"
//! detail = "No injuries."
//! ```
//!
//! Files ending in `.json` are read as JSON with the same shape. The file is
//! read again on every activation, so another process can rewrite it while
//! the screen is open.

use super::ContentSource;
use crate::model::{ContentError, Entry, PaneId};
use crate::state::FocusCursor;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreenFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    panes: Vec<PaneFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaneFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    entries: Vec<Entry>,
}

/// Content read from a screen description file.
#[derive(Debug, Clone)]
pub struct FileContent {
    path: PathBuf,
    screen: ScreenFile,
}

impl FileContent {
    /// Load the screen description at `path`.
    ///
    /// # Errors
    ///
    /// - [`ContentError::FileNotFound`] if the file does not exist
    /// - [`ContentError::Toml`] / [`ContentError::Json`] for malformed content
    /// - [`ContentError::NoPanes`] if the file declares no panes
    /// - [`ContentError::Io`] for other read failures
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref().to_path_buf();
        let screen = read_screen(&path)?;
        info!(path = %path.display(), panes = screen.panes.len(), "Loaded screen file");
        Ok(Self { path, screen })
    }

    /// File this content was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file again. On failure the previous content is kept.
    ///
    /// # Errors
    ///
    /// Same as [`FileContent::open`].
    pub fn reload(&mut self) -> Result<(), ContentError> {
        self.screen = read_screen(&self.path)?;
        debug!(path = %self.path.display(), "Reloaded screen file");
        Ok(())
    }
}

impl ContentSource for FileContent {
    fn title(&self) -> &str {
        &self.screen.title
    }

    fn pane_count(&self) -> usize {
        self.screen.panes.len()
    }

    fn pane_title(&self, pane: PaneId) -> &str {
        self.screen
            .panes
            .get(pane.get())
            .map_or("", |p| p.title.as_str())
    }

    fn generate(&mut self, pane: PaneId) -> Result<Vec<Entry>, ContentError> {
        self.screen
            .panes
            .get(pane.get())
            .map(|p| p.entries.clone())
            .ok_or(ContentError::UnknownPane {
                pane: pane.get(),
                count: self.screen.panes.len(),
            })
    }

    fn activate(&mut self, cursor: FocusCursor) -> Result<(), ContentError> {
        debug!(pane = %cursor.pane, index = ?cursor.index, "Activated entry");
        self.reload()
    }
}

fn read_screen(path: &Path) -> Result<ScreenFile, ContentError> {
    if !path.exists() {
        return Err(ContentError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;

    let screen: ScreenFile = if is_json(path) {
        serde_json::from_str(&contents).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        toml::from_str(&contents).map_err(|e| ContentError::Toml {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    };

    if screen.panes.is_empty() {
        return Err(ContentError::NoPanes {
            path: path.to_path_buf(),
        });
    }
    Ok(screen)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
