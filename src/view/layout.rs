//! Screen geometry.
//!
//! Pure layout logic: computes every rectangle of the screen from the canvas
//! size and a [`LayoutConfig`]. Nothing here draws; the session applies the
//! result to the panes and then paints chrome around them.
//!
//! ```text
//! ┌───────────────────────────────┐  window top border
//! │            TITLE              │  title strip
//! ├──────────┬──────────┬─────────┤  title rule
//! │ PANE 0   │ PANE 1   │ PANE 2  │  header row
//! │ entries  │ entries  │ entries │  content rows
//! ├──────────┴──────────┴─────────┤  detail rule
//! │ detail text                   │  detail strip
//! └───────────────────────────────┘  bottom border
//! ```

use ratatui::layout::{Rect, Size};

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;

/// Narrowest canvas at which the default layout keeps every area distinct.
pub const MIN_CANVAS_WIDTH: u16 = 20;

/// Shortest canvas at which the default layout keeps at least one content row.
pub const MIN_CANVAS_HEIGHT: u16 = 13;

/// Tunable layout parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Relative pane widths, left to right. Used when their count matches the
    /// pane count and they do not sum to zero; otherwise panes share equally.
    pub column_weights: Vec<u16>,
    /// Rows of the title strip, including the top border and the rule below it.
    pub title_height: u16,
    /// Rows of detail text.
    pub detail_height: u16,
    /// Canvas width up to which the window fills the canvas. Beyond it the
    /// window only grows by a quarter of the excess.
    pub base_width: u16,
    /// Cap on the window height. `None` uses the whole canvas.
    pub max_height: Option<u16>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_weights: vec![40, 30, 30],
            title_height: 3,
            detail_height: 6,
            base_width: 80,
            max_height: None,
        }
    }
}

/// Every rectangle of one frame, in absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Geometry {
    /// The full canvas.
    pub canvas: Rect,
    /// Outer border of the screen window.
    pub window: Rect,
    /// Title text area.
    pub title: Rect,
    /// Row of the rule under the title.
    pub title_rule_y: u16,
    /// Row holding the pane titles.
    pub header_y: u16,
    /// Entry area of each list pane.
    pub panes: Vec<Rect>,
    /// Column of each vertical separator between panes.
    pub separators: Vec<u16>,
    /// Row of the rule above the detail view.
    pub detail_rule_y: u16,
    /// Detail text area.
    pub detail: Rect,
}

impl LayoutConfig {
    /// Compute the geometry of a canvas holding `pane_count` list panes.
    ///
    /// Deterministic in `(self, canvas, pane_count)`. Every rectangle has a
    /// width and height of at least 1, even on canvases below
    /// [`MIN_CANVAS_WIDTH`] × [`MIN_CANVAS_HEIGHT`].
    pub fn compute(&self, canvas: Size, pane_count: usize) -> Geometry {
        let window_w = window_width(canvas.width, self.base_width).max(1);
        let window_h = self
            .max_height
            .map_or(canvas.height, |max| canvas.height.min(max))
            .max(1);
        let window = Rect::new(
            canvas.width.saturating_sub(window_w) / 2,
            canvas.height.saturating_sub(window_h) / 2,
            window_w,
            window_h,
        );

        let inner_x = window.x.saturating_add(1);
        let inner_w = window_w.saturating_sub(2).max(1);

        let title_rows = self.title_height.saturating_sub(2).max(1);
        let title = Rect::new(inner_x, window.y.saturating_add(1), inner_w, title_rows);
        let title_rule_y = title.y.saturating_add(title_rows);
        let header_y = title_rule_y.saturating_add(1);
        let content_y = header_y.saturating_add(1);

        let bottom_y = window.y.saturating_add(window_h - 1);
        let detail_h = self.detail_height.max(1);
        let detail_rule_y = bottom_y.saturating_sub(detail_h.saturating_add(1));
        let detail = Rect::new(inner_x, detail_rule_y.saturating_add(1), inner_w, detail_h);
        let content_h = detail_rule_y.saturating_sub(content_y).max(1);

        let (panes, separators) = self.columns(inner_x, inner_w, content_y, content_h, pane_count);

        Geometry {
            canvas: Rect::new(0, 0, canvas.width, canvas.height),
            window,
            title,
            title_rule_y,
            header_y,
            panes,
            separators,
            detail_rule_y,
            detail,
        }
    }

    fn columns(
        &self,
        inner_x: u16,
        inner_w: u16,
        y: u16,
        height: u16,
        pane_count: usize,
    ) -> (Vec<Rect>, Vec<u16>) {
        if pane_count == 0 {
            return (Vec::new(), Vec::new());
        }
        let weights = self.weights_for(pane_count);
        let total: u64 = weights.iter().sum();
        let gaps = u16::try_from(pane_count - 1).unwrap_or(u16::MAX);
        let available = u64::from(inner_w.saturating_sub(gaps));

        let mut panes = Vec::with_capacity(pane_count);
        let mut separators = Vec::with_capacity(pane_count - 1);
        let mut cumulative = 0;
        let mut left_edge = 0u16;

        for (i, weight) in weights.iter().enumerate() {
            cumulative += weight;
            let right_edge = u16::try_from(available * cumulative / total).unwrap_or(u16::MAX);
            let offset = u16::try_from(i).unwrap_or(u16::MAX);
            let x = inner_x.saturating_add(left_edge).saturating_add(offset);
            let width = right_edge.saturating_sub(left_edge).max(1);
            panes.push(Rect::new(x, y, width, height));
            if i + 1 < pane_count {
                separators.push(inner_x.saturating_add(right_edge).saturating_add(offset));
            }
            left_edge = right_edge;
        }

        (panes, separators)
    }

    fn weights_for(&self, pane_count: usize) -> Vec<u64> {
        let usable = self.column_weights.len() == pane_count
            && self.column_weights.iter().any(|&w| w > 0);
        if usable {
            self.column_weights.iter().map(|&w| u64::from(w)).collect()
        } else {
            vec![1; pane_count]
        }
    }
}

/// Window width for a canvas `canvas_w` columns wide.
///
/// Fills the canvas up to `base`, then grows by a quarter of the excess.
fn window_width(canvas_w: u16, base: u16) -> u16 {
    if canvas_w > base {
        canvas_w.min(base + (canvas_w - base) / 4)
    } else {
        canvas_w
    }
}
