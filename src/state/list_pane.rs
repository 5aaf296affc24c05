//! List pane state.
//!
//! A single-column list of entries whose summaries are folded to the pane
//! width. The pane owns its scroll offset (in display rows) and its selection;
//! nothing outside the pane mutates either directly.

use crate::model::{Entry, PaneId};
use crate::view_state::{fold, FoldedLine, HeightIndex};
use ratatui::layout::Rect;
use tracing::{debug, warn};

#[cfg(test)]
#[path = "list_pane_tests.rs"]
mod tests;

/// Text drawn in place of the rows of a pane with no entries.
pub const EMPTY_PANE_PLACEHOLDER: &str = "-- none --";

/// Vertical movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards index 0 / the top.
    Up,
    /// Towards the last index / the bottom.
    Down,
}

/// One row of pane output, in absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRow {
    /// Left column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Columns available for `line`.
    pub width: u16,
    /// Folded text for this row.
    pub line: FoldedLine,
    /// Row belongs to the selected entry.
    pub selected: bool,
    /// Row is the empty-pane placeholder.
    pub placeholder: bool,
}

/// Everything needed to paint one pane for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaneRender {
    /// Visible rows, top to bottom.
    pub rows: Vec<DrawRow>,
    /// The pane has keyboard focus.
    pub focused: bool,
    /// Content is hidden above the first row.
    pub overflow_above: bool,
    /// Content is hidden below the last row.
    pub overflow_below: bool,
}

/// An independently scrollable list of foldable entries.
#[derive(Debug, Clone)]
pub struct ListPane {
    id: PaneId,
    entries: Vec<Entry>,
    /// Folded summaries, one vec per entry. Valid for `folded_width` only.
    folded: Vec<Vec<FoldedLine>>,
    heights: HeightIndex,
    folded_width: Option<usize>,
    scroll_offset: usize,
    selected: Option<usize>,
    geometry: Rect,
}

impl ListPane {
    /// Create an empty pane with no geometry yet.
    pub fn new(id: PaneId) -> Self {
        Self {
            id,
            entries: Vec::new(),
            folded: Vec::new(),
            heights: HeightIndex::default(),
            folded_width: None,
            scroll_offset: 0,
            selected: None,
            geometry: Rect::default(),
        }
    }

    /// This pane's position in the focus cycle.
    pub fn id(&self) -> PaneId {
        self.id
    }

    /// Current entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the pane has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected index; `None` exactly when the pane is empty.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected entry, if any.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// First visible display row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Rectangle assigned by the last layout.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Folded summary lines of entry `index` at the current width.
    pub fn folded_lines(&self, index: usize) -> Option<&[FoldedLine]> {
        self.folded.get(index).map(Vec::as_slice)
    }

    /// Total display rows of all entries at the current width.
    pub fn total_rows(&self) -> usize {
        self.heights.total()
    }

    /// Replace the entry set.
    ///
    /// Scroll resets to the top. The previous selection is kept when it still
    /// indexes the new entries and clamps to the last entry otherwise.
    /// Summaries are refolded only once the pane has geometry.
    pub fn create_entries(&mut self, entries: Vec<Entry>) {
        let previous = self.selected;
        self.entries = entries;
        self.scroll_offset = 0;
        self.selected = match self.entries.len() {
            0 => None,
            len => Some(previous.unwrap_or(0).min(len - 1)),
        };
        if previous.is_some() && previous != self.selected {
            debug!(pane = %self.id, ?previous, selected = ?self.selected, "Selection clamped after regeneration");
        }
        if self.geometry.is_empty() {
            self.folded.clear();
            self.heights = HeightIndex::default();
            self.folded_width = None;
        } else {
            self.fold_entries();
        }
    }

    /// Record a new rectangle. Folded text is invalidated when the width changes.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
        if self.folded_width != Some(self.text_width()) {
            self.folded_width = None;
        }
    }

    /// Re-fold every summary for the current geometry width.
    pub fn fold_entries(&mut self) {
        let width = self.text_width();
        self.folded = self
            .entries
            .iter()
            .map(|entry| fold_summary(entry.summary(), width))
            .collect();
        let heights: Vec<usize> = self.folded.iter().map(Vec::len).collect();
        self.heights = HeightIndex::from_heights(&heights);
        self.folded_width = Some(width);
        self.clamp_scroll();
        self.ensure_selected_visible();
    }

    /// Select `index`.
    ///
    /// With `wrap == false` out-of-range indices clamp to the nearest end;
    /// with `wrap == true` they wrap modulo the entry count. The view then
    /// scrolls minimally so the whole selected entry is visible.
    pub fn set_entry_pos(&mut self, index: isize, wrap: bool) {
        if self.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        let target = if wrap {
            index.rem_euclid(len)
        } else {
            index.clamp(0, len - 1)
        };
        self.select(target as usize);
    }

    /// Move the selection by `step` entries, stopping at either end.
    pub fn move_selection(&mut self, direction: Direction, step: usize) {
        let Some(current) = self.selected else {
            return;
        };
        let last = self.entries.len() - 1;
        let target = match direction {
            Direction::Up => current.saturating_sub(step),
            Direction::Down => current.saturating_add(step).min(last),
        };
        self.select(target);
    }

    /// Move the selection by one screenful of entries (at least one).
    pub fn page(&mut self, direction: Direction) {
        let step = self.visible_entry_count().max(1);
        self.move_selection(direction, step);
    }

    /// Entry drawn at `row` rows below the pane's top edge.
    pub fn entry_at_row(&self, row: u16) -> Option<usize> {
        if row >= self.geometry.height {
            return None;
        }
        self.heights.lower_bound(self.scroll_offset + row as usize)
    }

    /// Produce the rows to draw, clipped to the pane geometry.
    pub fn render(&self, focused: bool) -> PaneRender {
        let area = self.geometry;
        let mut render = PaneRender {
            focused,
            ..PaneRender::default()
        };
        if area.width == 0 || area.height == 0 {
            return render;
        }
        let width = self.text_width() as u16;

        if self.is_empty() {
            render.rows.push(DrawRow {
                x: area.x,
                y: area.y,
                width,
                line: fold_summary(EMPTY_PANE_PLACEHOLDER, width as usize)
                    .into_iter()
                    .next()
                    .unwrap_or_default(),
                selected: false,
                placeholder: true,
            });
            return render;
        }

        let height = area.height as usize;
        let Some(mut entry) = self.heights.lower_bound(self.scroll_offset) else {
            return render;
        };
        let mut line_in_entry = self.scroll_offset - self.heights.start_of(entry);

        for row in 0..height {
            let Some(lines) = self.folded.get(entry) else {
                break;
            };
            if let Some(line) = lines.get(line_in_entry) {
                render.rows.push(DrawRow {
                    x: area.x,
                    y: area.y + row as u16,
                    width,
                    line: line.clone(),
                    selected: self.selected == Some(entry),
                    placeholder: false,
                });
            }
            line_in_entry += 1;
            if line_in_entry >= lines.len() {
                entry += 1;
                line_in_entry = 0;
            }
        }

        render.overflow_above = self.scroll_offset > 0;
        render.overflow_below = self.scroll_offset + height < self.heights.total();
        render
    }

    fn select(&mut self, index: usize) {
        self.ensure_folded();
        self.selected = Some(index);
        self.ensure_selected_visible();
    }

    fn ensure_folded(&mut self) {
        if !self.geometry.is_empty() && self.folded_width != Some(self.text_width()) {
            self.fold_entries();
        }
    }

    /// Columns available for text; the last column holds the scroll indicator.
    fn text_width(&self) -> usize {
        (self.geometry.width as usize).saturating_sub(1).max(1)
    }

    fn view_height(&self) -> usize {
        (self.geometry.height as usize).max(1)
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = self.heights.total().saturating_sub(self.view_height());
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }

    fn ensure_selected_visible(&mut self) {
        let Some(selected) = self.selected else {
            self.scroll_offset = 0;
            return;
        };
        if selected >= self.heights.len() {
            return;
        }
        let top = self.heights.start_of(selected);
        let bottom = top + self.heights.height_of(selected);
        let height = self.view_height();

        if top < self.scroll_offset || bottom - top >= height {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + height {
            self.scroll_offset = bottom - height;
        }
        self.clamp_scroll();
    }

    fn visible_entry_count(&self) -> usize {
        let height = self.view_height();
        let first = self.heights.lower_bound(self.scroll_offset);
        let last = self
            .heights
            .lower_bound(self.scroll_offset + height - 1)
            .or_else(|| self.heights.len().checked_sub(1));
        match (first, last) {
            (Some(first), Some(last)) if last >= first => last - first + 1,
            _ => 1,
        }
    }
}

fn fold_summary(text: &str, width: usize) -> Vec<FoldedLine> {
    match fold(text, width) {
        Ok(lines) => lines,
        Err(err) => {
            warn!(%err, width, "Could not fold entry summary");
            vec![FoldedLine::default()]
        }
    }
}
