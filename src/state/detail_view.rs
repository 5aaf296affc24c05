//! Detail view state.
//!
//! Shows the full detail text of whichever entry the focus cursor points at.
//! The view remembers which `(pane, index)` it is bound to so that redrawing
//! the same selection keeps the reader's scroll position.

use super::list_pane::{Direction, DrawRow, PaneRender};
use crate::model::{KeyAction, PaneId};
use crate::view_state::{fold, FoldedLine};
use ratatui::layout::Rect;
use tracing::warn;

/// Text shown when the focused pane has nothing selected.
pub const NO_DATA_TEXT: &str = "No data.";

/// Scrollable multi-line viewer for the selected entry.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    binding: Option<(PaneId, Option<usize>)>,
    text: String,
    lines: Vec<FoldedLine>,
    scroll_offset: usize,
    geometry: Rect,
}

impl DetailView {
    /// Unbound view with no text and no geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Folded lines at the current width.
    pub fn lines(&self) -> &[FoldedLine] {
        &self.lines
    }

    /// First visible folded line.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Rectangle assigned by the last layout.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// The `(pane, index)` last passed to [`DetailView::bind`].
    pub fn binding(&self) -> Option<(PaneId, Option<usize>)> {
        self.binding
    }

    /// Replace the content and scroll back to the top.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.scroll_offset = 0;
        self.refold();
    }

    /// Show `text` for the entry at `(pane, index)`.
    ///
    /// Does nothing when both the binding and the text are unchanged, so
    /// scroll survives redraws. Returns whether the content was replaced.
    pub fn bind(&mut self, pane: PaneId, index: Option<usize>, text: &str) -> bool {
        let binding = Some((pane, index));
        let text = if index.is_none() { NO_DATA_TEXT } else { text };
        if self.binding == binding && self.text == text {
            return false;
        }
        self.binding = binding;
        self.set_text(text);
        true
    }

    /// Scroll by `amount` lines, clamped to the content.
    pub fn scroll(&mut self, direction: Direction, amount: usize) {
        self.scroll_offset = match direction {
            Direction::Up => self.scroll_offset.saturating_sub(amount),
            Direction::Down => self.scroll_offset.saturating_add(amount),
        };
        self.clamp_scroll();
    }

    /// Consume detail scrolling actions. Returns `false` for anything else.
    pub fn handle_navigation(&mut self, action: KeyAction) -> bool {
        let page = self.view_height();
        match action {
            KeyAction::ScrollDetailUp => self.scroll(Direction::Up, 1),
            KeyAction::ScrollDetailDown => self.scroll(Direction::Down, 1),
            KeyAction::DetailPageUp => self.scroll(Direction::Up, page),
            KeyAction::DetailPageDown => self.scroll(Direction::Down, page),
            _ => return false,
        }
        true
    }

    /// Record a new rectangle, refolding and keeping the clamped scroll.
    pub fn set_geometry(&mut self, rect: Rect) {
        let width_changed = rect.width != self.geometry.width;
        self.geometry = rect;
        if width_changed {
            self.refold();
        } else {
            self.clamp_scroll();
        }
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.view_height())
    }

    /// Rows to draw for the current scroll position.
    pub fn render(&self) -> PaneRender {
        let area = self.geometry;
        let mut render = PaneRender::default();
        if area.width == 0 || area.height == 0 {
            return render;
        }
        let width = self.text_width() as u16;
        render.rows = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(area.height as usize)
            .enumerate()
            .map(|(row, line)| DrawRow {
                x: area.x,
                y: area.y + row as u16,
                width,
                line: line.clone(),
                selected: false,
                placeholder: false,
            })
            .collect();
        render.overflow_above = self.scroll_offset > 0;
        render.overflow_below = self.scroll_offset + (area.height as usize) < self.lines.len();
        render
    }

    fn refold(&mut self) {
        let width = self.text_width();
        self.lines = match fold(&self.text, width) {
            Ok(lines) => lines,
            Err(err) => {
                warn!(%err, width, "Could not fold detail text");
                Vec::new()
            }
        };
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    fn text_width(&self) -> usize {
        (self.geometry.width as usize).saturating_sub(1).max(1)
    }

    fn view_height(&self) -> usize {
        (self.geometry.height as usize).max(1)
    }
}
