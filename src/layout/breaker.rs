use crate::error::{ensure_positive, Result};
use crate::units::Pt;
use std::fmt;
use std::ops::Range;

/// A single word. Tokens are produced by splitting on whitespace and are never split
/// any further, so a token is the smallest thing the breaker will put on a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split text into tokens at any run of whitespace (spaces, tabs, newlines).
/// Leading and trailing whitespace is dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|word| Token(word.to_string()))
        .collect()
}

/// A run of consecutive tokens joined by single spaces, as emitted by [break_lines].
///
/// Lines are immutable; their width is measured on demand rather than stored, since
/// it depends on the font and size the caller measures with.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    text: String,
    tokens: Vec<Token>,
    start: usize,
}

impl Line {
    fn new(tokens: &[Token], start: usize) -> Line {
        let text = tokens
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        Line {
            text,
            tokens: tokens.to_vec(),
            start,
        }
    }

    /// The tokens of this line joined with single spaces
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The indices of this line's tokens within the sequence handed to [break_lines]
    pub fn token_range(&self) -> Range<usize> {
        self.start..self.start + self.tokens.len()
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn width<F>(&self, mut measure: F) -> Result<Pt>
    where
        F: FnMut(&str) -> Result<Pt>,
    {
        measure(&self.text)
    }
}

/// Greedily pack tokens into lines no wider than `max_width`.
///
/// Each token is appended to the line being built and the result measured; when that
/// would overflow and the line already holds something, the line is emitted and the
/// token starts the next one. A token that is wider than `max_width` on its own still
/// gets a line to itself: words are never hyphenated or split between characters.
///
/// Fails with [`PDFError::InvalidLayoutConfig`](crate::PDFError::InvalidLayoutConfig)
/// if `max_width` isn't positive. Errors from `measure` are returned as-is.
pub fn break_lines<F>(tokens: &[Token], max_width: Pt, measure: F) -> Result<Vec<Line>>
where
    F: FnMut(&str) -> Result<Pt>,
{
    ensure_positive("max_width", max_width)?;
    break_lines_with(tokens, |_| max_width, measure)
}

/// [break_lines] with a width limit per line, given the index of the line being built.
/// Limits are not validated here.
pub(crate) fn break_lines_with<F, W>(tokens: &[Token], width_for: W, mut measure: F) -> Result<Vec<Line>>
where
    F: FnMut(&str) -> Result<Pt>,
    W: Fn(usize) -> Pt,
{
    let mut lines: Vec<Line> = Vec::new();
    let mut line_start = 0usize;
    let mut current = String::new();

    for (ti, token) in tokens.iter().enumerate() {
        let candidate = if ti == line_start {
            token.as_str().to_string()
        } else {
            format!("{current} {token}")
        };

        let width = measure(&candidate)?;
        if width > width_for(lines.len()) && ti > line_start {
            lines.push(Line::new(&tokens[line_start..ti], line_start));
            line_start = ti;
            current = token.as_str().to_string();
        } else {
            current = candidate;
        }
    }

    if line_start < tokens.len() {
        lines.push(Line::new(&tokens[line_start..], line_start));
    }

    Ok(lines)
}
