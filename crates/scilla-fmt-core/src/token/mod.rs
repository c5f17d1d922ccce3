//! Token model
//!
//! A [`Token`] is a classified slice of the source buffer. Tokens created by
//! the formatter (indentation, forced newlines) have no span and carry their
//! text as a literal instead.

mod kind;
pub mod tables;

pub use kind::TokenKind;

use std::fmt;
use std::sync::Arc;

/// A location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Byte offset from the start of the source
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Position {
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.line, self.column, self.offset)
    }
}

/// Half-open range `[start, end)` of source positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

/// A classified piece of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    span: Option<Span>,
    source: Option<Arc<str>>,
    literal: Option<String>,
}

impl Token {
    /// A token backed by the source buffer.
    pub fn new(kind: TokenKind, span: Span, source: Arc<str>) -> Self {
        Self {
            kind,
            span: Some(span),
            source: Some(source),
            literal: None,
        }
    }

    /// A token manufactured by the formatter; it has no position.
    pub fn synthetic(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            span: None,
            source: None,
            literal: Some(literal.into()),
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn is_synthetic(&self) -> bool {
        self.span.is_none()
    }

    /// Replace the rendered text, keeping kind and span.
    pub fn set_literal(&mut self, literal: impl Into<String>) {
        self.literal = Some(literal.into());
    }

    /// The text this token renders to.
    pub fn text(&self) -> &str {
        if let Some(literal) = &self.literal {
            return literal;
        }
        match (&self.source, self.span) {
            (Some(source), Some(span)) => &source[span.start.offset..span.end.offset],
            _ => "",
        }
    }

    /// Debug form used by the token dump: `<KIND:"text">(l:c:o-l:c:o)`.
    pub fn describe(&self) -> String {
        match self.span {
            Some(span) => format!(
                "<{}:{:?}>({}-{})",
                self.kind,
                self.text(),
                span.start,
                span.end
            ),
            None => format!("<{}:{:?}>(synthetic)", self.kind, self.text()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
