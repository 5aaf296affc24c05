//! Content sources.
//!
//! A screen does not know what it shows. Entries come from a
//! [`ContentSource`], which the session asks to generate every pane up front
//! and again after each activation:
//! - `FileContent` reads a TOML or JSON screen description
//! - `StaticContent` holds entries in memory (embedding and tests)

use crate::model::{ContentError, Entry, PaneId};
use crate::state::FocusCursor;

pub mod file;

pub use file::FileContent;

/// Supplier of pane titles and entries.
pub trait ContentSource {
    /// Text of the title strip.
    fn title(&self) -> &str;

    /// Number of list panes. Fixed for the lifetime of a session.
    fn pane_count(&self) -> usize;

    /// Header of `pane`; empty for unknown panes.
    fn pane_title(&self, pane: PaneId) -> &str;

    /// Produce the current entries of `pane`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownPane`] for panes outside
    /// `0..pane_count()`, or whatever the backing store reports.
    fn generate(&mut self, pane: PaneId) -> Result<Vec<Entry>, ContentError>;

    /// React to the user activating the entry under `cursor`.
    ///
    /// The session regenerates every pane afterwards.
    ///
    /// # Errors
    ///
    /// Reports failures of the backing store; the session keeps showing the
    /// entries it already has.
    fn activate(&mut self, cursor: FocusCursor) -> Result<(), ContentError>;
}

/// In-memory content.
///
/// ```
/// use panekit::model::{Entry, PaneId};
/// use panekit::source::{ContentSource, StaticContent};
///
/// let mut source = StaticContent::new("STATUS")
///     .with_pane("HEALTH", vec![Entry::new("Head: OK", "No injuries.")]);
/// assert_eq!(source.pane_count(), 1);
/// assert_eq!(source.generate(PaneId::FIRST).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    title: String,
    panes: Vec<(String, Vec<Entry>)>,
    activations: Vec<FocusCursor>,
}

impl StaticContent {
    /// A screen titled `title` with no panes yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a pane.
    pub fn with_pane(mut self, title: impl Into<String>, entries: Vec<Entry>) -> Self {
        self.panes.push((title.into(), entries));
        self
    }

    /// Replace the entries of an existing pane; unknown panes are ignored.
    pub fn set_entries(&mut self, pane: PaneId, entries: Vec<Entry>) {
        if let Some((_, slot)) = self.panes.get_mut(pane.get()) {
            *slot = entries;
        }
    }

    /// Every cursor passed to `activate`, oldest first.
    pub fn activations(&self) -> &[FocusCursor] {
        &self.activations
    }
}

impl ContentSource for StaticContent {
    fn title(&self) -> &str {
        &self.title
    }

    fn pane_count(&self) -> usize {
        self.panes.len()
    }

    fn pane_title(&self, pane: PaneId) -> &str {
        self.panes
            .get(pane.get())
            .map_or("", |(title, _)| title.as_str())
    }

    fn generate(&mut self, pane: PaneId) -> Result<Vec<Entry>, ContentError> {
        self.panes
            .get(pane.get())
            .map(|(_, entries)| entries.clone())
            .ok_or(ContentError::UnknownPane {
                pane: pane.get(),
                count: self.panes.len(),
            })
    }

    fn activate(&mut self, cursor: FocusCursor) -> Result<(), ContentError> {
        self.activations.push(cursor);
        Ok(())
    }
}
