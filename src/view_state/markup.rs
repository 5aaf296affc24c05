//! Inline colour markup.
//!
//! Entry text carries colour spans as `<color_NAME>…</color>` markers. Markers
//! have zero display width and nest: `</color>` closes the most recent open
//! colour. Anything that does not form a valid marker is literal text.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

const OPEN_PREFIX: &str = "<color_";
const CLOSE_TAG: &str = "</color>";

/// A named colour that may appear in a `<color_NAME>` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    /// `<color_black>`
    Black,
    /// `<color_white>`
    White,
    /// `<color_light_gray>`
    LightGray,
    /// `<color_dark_gray>`
    DarkGray,
    /// `<color_red>`
    Red,
    /// `<color_light_red>`
    LightRed,
    /// `<color_green>`
    Green,
    /// `<color_light_green>`
    LightGreen,
    /// `<color_blue>`
    Blue,
    /// `<color_light_blue>`
    LightBlue,
    /// `<color_cyan>`
    Cyan,
    /// `<color_light_cyan>`
    LightCyan,
    /// `<color_magenta>`
    Magenta,
    /// `<color_pink>`
    Pink,
    /// `<color_yellow>`
    Yellow,
    /// `<color_brown>`
    Brown,
}

impl Colour {
    const ALL: [Colour; 16] = [
        Colour::Black,
        Colour::White,
        Colour::LightGray,
        Colour::DarkGray,
        Colour::Red,
        Colour::LightRed,
        Colour::Green,
        Colour::LightGreen,
        Colour::Blue,
        Colour::LightBlue,
        Colour::Cyan,
        Colour::LightCyan,
        Colour::Magenta,
        Colour::Pink,
        Colour::Yellow,
        Colour::Brown,
    ];

    /// Marker name, as written after `<color_`.
    pub fn name(self) -> &'static str {
        match self {
            Colour::Black => "black",
            Colour::White => "white",
            Colour::LightGray => "light_gray",
            Colour::DarkGray => "dark_gray",
            Colour::Red => "red",
            Colour::LightRed => "light_red",
            Colour::Green => "green",
            Colour::LightGreen => "light_green",
            Colour::Blue => "blue",
            Colour::LightBlue => "light_blue",
            Colour::Cyan => "cyan",
            Colour::LightCyan => "light_cyan",
            Colour::Magenta => "magenta",
            Colour::Pink => "pink",
            Colour::Yellow => "yellow",
            Colour::Brown => "brown",
        }
    }

    /// Look up a colour by marker name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Terminal colour used when drawing.
    pub fn to_color(self) -> Color {
        match self {
            Colour::Black => Color::Black,
            Colour::White => Color::White,
            Colour::LightGray => Color::Gray,
            Colour::DarkGray => Color::DarkGray,
            Colour::Red => Color::Red,
            Colour::LightRed => Color::LightRed,
            Colour::Green => Color::Green,
            Colour::LightGreen => Color::LightGreen,
            Colour::Blue => Color::Blue,
            Colour::LightBlue => Color::LightBlue,
            Colour::Cyan => Color::Cyan,
            Colour::LightCyan => Color::LightCyan,
            Colour::Magenta => Color::Magenta,
            Colour::Pink => Color::LightMagenta,
            Colour::Yellow => Color::LightYellow,
            Colour::Brown => Color::Yellow,
        }
    }
}

/// One lexical unit of a single markup line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A visible character.
    Glyph {
        /// The character itself.
        ch: char,
        /// Display width in columns.
        width: usize,
    },
    /// `<color_NAME>`
    Open(Colour),
    /// `</color>`
    Close,
}

impl Token {
    /// Display width; markers are always zero.
    pub fn width(&self) -> usize {
        match self {
            Token::Glyph { width, .. } => *width,
            Token::Open(_) | Token::Close => 0,
        }
    }

    /// True for whitespace glyphs. Markers are never whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Glyph { ch, .. } if ch.is_whitespace())
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Token::Glyph { ch, .. } => out.push(*ch),
            Token::Open(colour) => {
                out.push_str(OPEN_PREFIX);
                out.push_str(colour.name());
                out.push('>');
            }
            Token::Close => out.push_str(CLOSE_TAG),
        }
    }
}

/// Split one line of markup into tokens.
///
/// Tabs become single spaces; other control characters (including `\n`) are
/// dropped, so callers split paragraphs before tokenizing. Dropping happens
/// before markers are matched: `serialize(&tokenize(s))` reads back as the
/// same tokens.
pub fn tokenize(line: &str) -> Vec<Token> {
    let cleaned: String = line
        .chars()
        .filter_map(|ch| match ch {
            '\t' => Some(' '),
            ch if ch.is_control() => None,
            ch => Some(ch),
        })
        .collect();

    let mut tokens = Vec::with_capacity(cleaned.len());
    let mut rest = cleaned.as_str();

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some((token, consumed)) = parse_marker(rest) {
                tokens.push(token);
                rest = &rest[consumed..];
                continue;
            }
        }
        rest = &rest[ch.len_utf8()..];
        tokens.push(Token::Glyph {
            ch,
            width: ch.width().unwrap_or(0),
        });
    }

    tokens
}

fn parse_marker(s: &str) -> Option<(Token, usize)> {
    if s.starts_with(CLOSE_TAG) {
        return Some((Token::Close, CLOSE_TAG.len()));
    }
    let after = s.strip_prefix(OPEN_PREFIX)?;
    let end = after.find('>')?;
    let colour = Colour::from_name(&after[..end])?;
    Some((Token::Open(colour), OPEN_PREFIX.len() + end + 1))
}

/// Serialize tokens back into markup.
pub fn serialize(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len());
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}

/// Apply the markers in `tokens` to a colour stack.
///
/// A close marker on an empty stack is ignored.
pub fn apply_markers(tokens: &[Token], stack: &mut Vec<Colour>) {
    for token in tokens {
        match token {
            Token::Open(colour) => stack.push(*colour),
            Token::Close => {
                stack.pop();
            }
            Token::Glyph { .. } => {}
        }
    }
}

/// The visible text of `text` with every marker removed.
///
/// ```
/// # use panekit::view_state::markup::strip_markup;
/// assert_eq!(strip_markup("Pain: <color_red>7</color>"), "Pain: 7");
/// ```
pub fn strip_markup(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            tokenize(line)
                .into_iter()
                .filter_map(|t| match t {
                    Token::Glyph { ch, .. } => Some(ch),
                    _ => None,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display width of a single markup line.
pub fn visible_width(line: &str) -> usize {
    tokenize(line).iter().map(Token::width).sum()
}

/// Convert one markup line to a styled ratatui line.
///
/// `active` is the colour stack in effect where the line starts; `base` is
/// patched with the innermost colour for each span.
pub fn to_line(line: &str, active: &[Colour], base: Style) -> Line<'static> {
    let mut stack = active.to_vec();
    let mut spans = Vec::new();
    let mut current = String::new();

    let style_for = |stack: &[Colour]| match stack.last() {
        Some(colour) => base.fg(colour.to_color()),
        None => base,
    };

    for token in tokenize(line) {
        match token {
            Token::Glyph { ch, .. } => current.push(ch),
            marker => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style_for(&stack)));
                }
                apply_markers(&[marker], &mut stack);
            }
        }
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, style_for(&stack)));
    }

    Line::from(spans)
}
