//! Editable token sequence
//!
//! The formatter materialises the whole token stream into a `Vec` and edits
//! it by index. Every mutating call reports positions explicitly so callers
//! can keep their cursor in step with insertions and removals.

use crate::token::{Token, TokenKind};
use std::ops::Index;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Token> {
        self.tokens.get_mut(index)
    }

    pub fn kind(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    /// Insert `token` in front of `index`; the token previously at `index`
    /// moves to `index + 1`.
    pub fn insert(&mut self, index: usize, token: Token) {
        self.tokens.insert(index, token);
    }

    /// Insert `token` right after `index` and return its position.
    pub fn insert_after(&mut self, index: usize, token: Token) -> usize {
        self.tokens.insert(index + 1, token);
        index + 1
    }

    pub fn remove(&mut self, index: usize) -> Token {
        self.tokens.remove(index)
    }

    /// Nearest token before `index` that is not whitespace or a newline.
    pub fn prev_non_space(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| !self.tokens[i].kind.is_space())
    }

    /// Nearest token after `index` that is not whitespace or a newline.
    pub fn next_non_space(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_space())
    }

    /// Nearest non-whitespace token before `index` on the same line.
    pub fn prev_on_line(&self, index: usize) -> Option<usize> {
        for i in (0..index).rev() {
            match self.tokens[i].kind {
                TokenKind::Newline => return None,
                kind if kind.is_whitespace() => continue,
                _ => return Some(i),
            }
        }
        None
    }

    /// Nearest code token before `index` on the same line, skipping comments.
    pub fn prev_code_on_line(&self, index: usize) -> Option<usize> {
        for i in (0..index).rev() {
            match self.tokens[i].kind {
                TokenKind::Newline => return None,
                kind if kind.is_code() => return Some(i),
                _ => continue,
            }
        }
        None
    }

    /// Nearest code token before `index`, across lines and comments.
    pub fn prev_code(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| self.tokens[i].kind.is_code())
    }

    /// Nearest code token after `index`, across lines and comments.
    pub fn next_code(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.tokens[i].kind.is_code())
    }

    /// True when only whitespace separates `index` from the previous newline
    /// or the start of the document.
    pub fn is_first_on_line(&self, index: usize) -> bool {
        self.prev_on_line(index).is_none()
    }

    /// Index of the first token on the line containing `index`.
    pub fn line_start(&self, index: usize) -> usize {
        (0..index)
            .rev()
            .find(|&i| self.tokens[i].kind == TokenKind::Newline)
            .map_or(0, |i| i + 1)
    }

    /// Display width of the text between the start of the line and `index`.
    pub fn width_before(&self, index: usize) -> usize {
        self.tokens[self.line_start(index)..index]
            .iter()
            .map(|t| t.text().width())
            .sum()
    }

    /// Concatenate the text of every token.
    pub fn render(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn sequence(source: &str) -> TokenSequence {
        let (tokens, error) = tokenize(source);
        assert!(error.is_none(), "{source:?} should lex");
        TokenSequence::new(tokens)
    }

    fn position_of(seq: &TokenSequence, text: &str) -> usize {
        seq.tokens()
            .iter()
            .position(|t| t.text() == text)
            .unwrap_or_else(|| panic!("{text:?} not found"))
    }

    #[test]
    fn test_render_round_trips() {
        let source = "let x =\n  (* c *) 1\n";
        assert_eq!(sequence(source).render(), source);
    }

    #[test]
    fn test_insert_and_remove_shift_positions() {
        let mut seq = sequence("a b");
        let b = position_of(&seq, "b");
        seq.insert(b, Token::synthetic(TokenKind::Newline, "\n"));
        assert_eq!(seq.kind(b + 1), Some(TokenKind::Id));
        assert_eq!(seq.render(), "a \nb");
        let removed = seq.remove(b);
        assert_eq!(removed.kind, TokenKind::Newline);
        let after_a = seq.insert_after(0, Token::synthetic(TokenKind::Whitespace, "  "));
        assert_eq!(after_a, 1);
        assert_eq!(seq.render(), "a   b");
    }

    #[test]
    fn test_neighbour_queries_skip_space() {
        let seq = sequence("a  \n  b");
        let a = position_of(&seq, "a");
        let b = position_of(&seq, "b");
        assert_eq!(seq.prev_non_space(b), Some(a));
        assert_eq!(seq.next_non_space(a), Some(b));
        assert_eq!(seq.prev_on_line(b), None);
    }

    #[test]
    fn test_first_on_line() {
        let seq = sequence("  a b\n   c (* x *) d");
        assert!(seq.is_first_on_line(position_of(&seq, "a")));
        assert!(!seq.is_first_on_line(position_of(&seq, "b")));
        assert!(seq.is_first_on_line(position_of(&seq, "c")));
        assert!(!seq.is_first_on_line(position_of(&seq, "d")));
    }

    #[test]
    fn test_code_queries_skip_comments() {
        let seq = sequence("x in (* note *)\n(* more *)\ny");
        let y = position_of(&seq, "y");
        let x_in = position_of(&seq, "in");
        assert_eq!(seq.prev_code(y), Some(x_in));
        assert_eq!(seq.prev_code_on_line(y), None);
        let comment = position_of(&seq, "(* note *)");
        assert_eq!(seq.prev_code_on_line(comment), Some(x_in));
    }

    #[test]
    fn test_width_before_measures_current_line() {
        let seq = sequence("ab\nfield name : T");
        let name = position_of(&seq, "name");
        assert_eq!(seq.width_before(name), "field ".len());
        assert_eq!(seq.line_start(name), position_of(&seq, "field"));
    }
}
