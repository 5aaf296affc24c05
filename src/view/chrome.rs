//! Frame painting: window chrome, list panes and the detail strip.
//!
//! Everything is drawn from a [`Geometry`] and the [`PaneRender`]s the state
//! layer produced for it. Cells outside the frame are skipped, so a geometry
//! computed for a canvas below the documented minimum still draws safely.

use super::constants::{SCROLL_DOWN_INDICATOR, SCROLL_UP_INDICATOR};
use super::layout::Geometry;
use super::styles::ScreenStyles;
use crate::state::{DrawRow, PaneRender};
use crate::view_state::markup;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    symbols::line,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct ScreenView<'a> {
    /// Screen title, may contain colour markup.
    pub title: &'a str,
    /// Key reminder drawn at the right end of the title row, may contain
    /// colour markup. Left out when it would run into the title.
    pub key_hint: &'a str,
    /// One title per list pane.
    pub pane_titles: &'a [String],
    /// Rectangles the frame is drawn into.
    pub geometry: &'a Geometry,
    /// One render per list pane, in pane order.
    pub panes: &'a [PaneRender],
    /// Rows of the detail strip.
    pub detail: &'a PaneRender,
    /// Styles for every element.
    pub styles: &'a ScreenStyles,
}

/// Paint the whole screen.
pub fn render_screen(frame: &mut Frame, view: &ScreenView<'_>) {
    let area = frame.area();
    let geometry = view.geometry;
    let window = geometry.window.intersection(area);
    if window.is_empty() {
        return;
    }

    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(view.styles.border),
        window,
    );

    let title_area = geometry.title.intersection(area);
    if !title_area.is_empty() {
        let title = styled_line(view.title, view.styles.title, view.styles);
        let title_width = title.width();
        frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);
        draw_key_hint(frame.buffer_mut(), title_area, title_width, view);
    }

    let buf = frame.buffer_mut();
    draw_rule(buf, geometry, geometry.title_rule_y, line::HORIZONTAL_DOWN, view.styles.border);
    draw_rule(buf, geometry, geometry.detail_rule_y, line::HORIZONTAL_UP, view.styles.border);
    draw_separators(buf, geometry, view.styles.border);

    for (i, rect) in geometry.panes.iter().enumerate() {
        let focused = view.panes.get(i).is_some_and(|p| p.focused);
        let style = if focused {
            view.styles.header_focused
        } else {
            view.styles.header
        };
        let title = view.pane_titles.get(i).map_or("", String::as_str);
        let header = styled_line(title, style, view.styles);
        put_line(buf, rect.x, geometry.header_y, rect.width, &header);
    }

    for (render, rect) in view.panes.iter().zip(&geometry.panes) {
        draw_rows(buf, render, view.styles);
        draw_indicators(buf, render, *rect, view.styles.indicator);
    }

    draw_rows(buf, view.detail, view.styles);
    draw_indicators(buf, view.detail, geometry.detail, view.styles.indicator);
}

/// Right-align the key hint on the title row, one column in from the edge,
/// when at least one blank column separates it from the centred title.
fn draw_key_hint(buf: &mut Buffer, title_area: Rect, title_width: usize, view: &ScreenView<'_>) {
    let hint_width = markup::visible_width(view.key_hint);
    if hint_width == 0 {
        return;
    }
    let area_width = usize::from(title_area.width);
    // Same centring as `Paragraph` with `Alignment::Center`.
    let title_end = (area_width / 2).saturating_sub(title_width / 2) + title_width;
    let right_margin = area_width.saturating_sub(title_end);
    if right_margin < hint_width + 2 {
        return;
    }
    let Ok(offset) = u16::try_from(area_width - 1 - hint_width) else {
        return;
    };
    let hint = styled_line(view.key_hint, Style::default(), view.styles);
    put_line(buf, title_area.x + offset, title_area.y, hint_width as u16, &hint);
}

fn draw_rows(buf: &mut Buffer, render: &PaneRender, styles: &ScreenStyles) {
    for row in &render.rows {
        draw_row(buf, row, render.focused, styles);
    }
}

fn draw_row(buf: &mut Buffer, row: &DrawRow, focused: bool, styles: &ScreenStyles) {
    let style = styles.for_row(row.selected, focused, row.placeholder);
    // Highlight spans the whole text column, not only the glyphs.
    let row_area = Rect::new(row.x, row.y, row.width, 1).intersection(buf.area);
    if !row_area.is_empty() {
        buf.set_style(row_area, style);
    }
    let line = if styles.markup_colors {
        row.line.to_line(style)
    } else {
        Line::styled(row.line.plain(), style)
    };
    put_line(buf, row.x, row.y, row.width, &line);
}

fn draw_indicators(buf: &mut Buffer, render: &PaneRender, rect: Rect, style: Style) {
    if rect.is_empty() {
        return;
    }
    let x = rect.right() - 1;
    if render.overflow_above {
        put_symbol(buf, x, rect.y, SCROLL_UP_INDICATOR, style);
    }
    if render.overflow_below {
        put_symbol(buf, x, rect.bottom() - 1, SCROLL_DOWN_INDICATOR, style);
    }
}

/// Horizontal rule across the window with tee junctions at both borders and
/// `junction` where a pane separator meets it.
fn draw_rule(buf: &mut Buffer, geometry: &Geometry, y: u16, junction: &str, style: Style) {
    let window = geometry.window;
    if window.width < 2 || y <= window.y || y >= window.bottom().saturating_sub(1) {
        return;
    }
    let right = window.right() - 1;
    put_symbol(buf, window.x, y, line::VERTICAL_RIGHT, style);
    for x in window.x + 1..right {
        put_symbol(buf, x, y, line::HORIZONTAL, style);
    }
    put_symbol(buf, right, y, line::VERTICAL_LEFT, style);
    for &x in &geometry.separators {
        if x > window.x && x < right {
            put_symbol(buf, x, y, junction, style);
        }
    }
}

fn draw_separators(buf: &mut Buffer, geometry: &Geometry, style: Style) {
    for &x in &geometry.separators {
        for y in geometry.header_y..geometry.detail_rule_y {
            put_symbol(buf, x, y, line::VERTICAL, style);
        }
    }
}

fn styled_line(text: &str, base: Style, styles: &ScreenStyles) -> Line<'static> {
    if styles.markup_colors {
        markup::to_line(text, &[], base)
    } else {
        Line::styled(markup::strip_markup(text), base)
    }
}

/// Write `line` at `(x, y)`, clipped to `width` and to the buffer.
fn put_line(buf: &mut Buffer, x: u16, y: u16, width: u16, line: &Line<'_>) {
    let area = buf.area;
    if x < area.left() || x >= area.right() || y < area.top() || y >= area.bottom() {
        return;
    }
    let width = width.min(area.right() - x);
    buf.set_line(x, y, line, width);
}

fn put_symbol(buf: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_style(style);
    }
}
