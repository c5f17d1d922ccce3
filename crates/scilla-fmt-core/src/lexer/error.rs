//! Lexical errors and the sink they are reported through

use crate::token::Position;
use thiserror::Error;

/// A fatal lexical error. Lexing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}:{}: {}", .position.line, .position.column, .message)]
pub struct LexError {
    pub message: String,
    pub position: Position,
    /// The offending source line followed by a caret under the column
    pub excerpt: String,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: Position, source: &str) -> Self {
        Self {
            message: message.into(),
            position,
            excerpt: excerpt_at(source, position),
        }
    }

    /// Message plus the caret-marked excerpt.
    pub fn render(&self) -> String {
        format!("{self}\n{}", self.excerpt)
    }
}

/// Receives lexical errors as they happen.
pub trait ErrorSink: Send {
    fn report(&mut self, error: &LexError);
}

impl<F> ErrorSink for F
where
    F: FnMut(&LexError) + Send,
{
    fn report(&mut self, error: &LexError) {
        self(error)
    }
}

const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// The line containing `position`, then a caret under its column.
pub fn excerpt_at(source: &str, position: Position) -> String {
    let offset = position.offset.min(source.len());
    let line_start = source[..offset]
        .rfind(LINE_BREAKS)
        .map(|i| i + 1)
        .unwrap_or(0);
    let line_end = source[offset..]
        .find(LINE_BREAKS)
        .map(|i| offset + i)
        .unwrap_or(source.len());
    let caret_indent = " ".repeat(position.column.saturating_sub(1));
    format!("{}\n{caret_indent}^", &source[line_start..line_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_marks_column_on_middle_line() {
        let source = "library X\nlet y = #\nlet z = 1";
        let position = Position {
            offset: 18,
            line: 2,
            column: 9,
        };
        assert_eq!(excerpt_at(source, position), "let y = #\n        ^");
    }

    #[test]
    fn test_excerpt_at_end_of_input() {
        let source = "(* abc";
        let position = Position {
            offset: 6,
            line: 1,
            column: 7,
        };
        assert_eq!(excerpt_at(source, position), "(* abc\n      ^");
    }

    #[test]
    fn test_display_and_render() {
        let error = LexError::new(
            "unexpected character '#'",
            Position {
                offset: 2,
                line: 1,
                column: 3,
            },
            "x #",
        );
        assert_eq!(error.to_string(), "1:3: unexpected character '#'");
        assert_eq!(error.render(), "1:3: unexpected character '#'\nx #\n  ^");
    }

    #[test]
    fn test_closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |error: &LexError| seen.push(error.message.clone());
            sink.report(&LexError::new("boom", Position::START, ""));
        }
        assert_eq!(seen, vec!["boom".to_string()]);
    }
}
