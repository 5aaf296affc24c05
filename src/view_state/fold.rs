//! Text folding: reflow markup to a fixed column width.
//!
//! Folding works paragraph by paragraph (`\n` always breaks). Inside a
//! paragraph a line breaks at the last whitespace that follows visible ink,
//! or hard-breaks at `width` columns when there is none. The whitespace at a
//! wrap point is dropped; markers are never dropped and never count toward
//! the width. Every folded line records the colour stack active at its start,
//! so each line can be drawn on its own.

use super::markup::{self, Colour, Token};
use ratatui::style::Style;
use ratatui::text::Line;

/// Replacement for glyphs wider than the whole line.
const OVERWIDE_GLYPH: char = '\u{FFFD}';

/// Error returned for folding widths that cannot hold a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FoldError {
    /// Width was zero.
    #[error("fold width must be at least 1 column")]
    ZeroWidth,
}

/// One display line produced by [`fold`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FoldedLine {
    text: String,
    styles: Vec<Colour>,
    width: usize,
}

impl FoldedLine {
    /// Markup of this line (may contain markers).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Colours open at the start of the line, outermost first.
    pub fn styles(&self) -> &[Colour] {
        &self.styles
    }

    /// Visible width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Visible text with markers removed.
    pub fn plain(&self) -> String {
        markup::strip_markup(&self.text)
    }

    /// Styled ratatui line, colours applied on top of `base`.
    pub fn to_line(&self, base: Style) -> Line<'static> {
        markup::to_line(&self.text, &self.styles, base)
    }
}

/// Fold `text` into lines no wider than `width` columns.
///
/// # Errors
///
/// Returns [`FoldError::ZeroWidth`] when `width == 0`.
///
/// # Examples
///
/// ```
/// # use panekit::view_state::fold::fold;
/// let lines = fold("Dexterity affects your chance to hit", 12).unwrap();
/// let plain: Vec<_> = lines.iter().map(|l| l.plain()).collect();
/// assert_eq!(plain, ["Dexterity", "affects your", "chance to", "hit"]);
/// ```
pub fn fold(text: &str, width: usize) -> Result<Vec<FoldedLine>, FoldError> {
    if width == 0 {
        return Err(FoldError::ZeroWidth);
    }

    let mut lines = Vec::new();
    let mut stack = Vec::new();
    for paragraph in text.split('\n') {
        let tokens = replace_overwide(markup::tokenize(paragraph), width);
        fold_paragraph(&tokens, width, &mut stack, &mut lines);
    }
    Ok(lines)
}

/// Join folded lines back into markup, one line per paragraph.
///
/// Folding the result again at the same width yields the same lines.
pub fn fold_to_text(lines: &[FoldedLine]) -> String {
    lines
        .iter()
        .map(FoldedLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn replace_overwide(mut tokens: Vec<Token>, width: usize) -> Vec<Token> {
    for token in &mut tokens {
        if token.width() > width {
            *token = Token::Glyph {
                ch: OVERWIDE_GLYPH,
                width: 1,
            };
        }
    }
    tokens
}

fn fold_paragraph(
    tokens: &[Token],
    width: usize,
    stack: &mut Vec<Colour>,
    out: &mut Vec<FoldedLine>,
) {
    let mut start = 0;
    let mut emitted = false;

    loop {
        let rest = &tokens[start..];
        let Some(cut) = find_cut(rest, width) else {
            if !rest.is_empty() || !emitted {
                push_line(rest, stack, out);
            }
            return;
        };

        push_line(trim_trailing_whitespace(&rest[..cut]), stack, out);
        emitted = true;

        // Whitespace at the wrap point is swallowed by the break.
        start += cut;
        while tokens.get(start).is_some_and(Token::is_whitespace) {
            start += 1;
        }
    }
}

/// Index at which `tokens` must break, or `None` if everything fits.
///
/// Always `> 0` when `Some`, so folding makes progress.
fn find_cut(tokens: &[Token], width: usize) -> Option<usize> {
    let mut used = 0;
    let mut seen_ink = false;
    let mut last_break = None;

    for (i, token) in tokens.iter().enumerate() {
        let Token::Glyph { ch, width: w } = *token else {
            continue;
        };
        let is_space = ch.is_whitespace();

        if used + w > width {
            if is_space {
                return Some(i);
            }
            return Some(last_break.unwrap_or(i));
        }

        if is_space {
            if seen_ink {
                last_break = Some(i);
            }
        } else {
            seen_ink = true;
        }
        used += w;
    }

    None
}

fn trim_trailing_whitespace(tokens: &[Token]) -> &[Token] {
    let mut end = tokens.len();
    while end > 0 && tokens[end - 1].is_whitespace() {
        end -= 1;
    }
    &tokens[..end]
}

fn push_line(tokens: &[Token], stack: &mut Vec<Colour>, out: &mut Vec<FoldedLine>) {
    out.push(FoldedLine {
        text: markup::serialize(tokens),
        styles: stack.clone(),
        width: tokens.iter().map(Token::width).sum(),
    });
    markup::apply_markers(tokens, stack);
}
