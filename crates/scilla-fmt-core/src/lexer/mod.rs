//! Hand-written lexer for Scilla sources
//!
//! The lexer is lossless: comments, whitespace and newlines are tokens, so
//! concatenating the text of every token reproduces the input exactly. It is
//! a small state machine driven by [`Iterator::next`]; [`TokenStream`] runs
//! it on a producer thread behind a rendezvous channel.

mod error;
mod stream;

pub use error::{ErrorSink, LexError, excerpt_at};
pub use stream::TokenStream;

use crate::token::{Position, Span, Token, TokenKind, tables};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Trace switches, passed in at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Log the source position and excerpt after every token
    pub trace_positions: bool,
    /// Log every emitted token
    pub trace_tokens: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Whitespace,
    Number,
    Hex,
    StringLiteral,
    Identifier,
    Comment,
    Done,
}

pub struct Lexer {
    source: Arc<str>,
    options: LexerOptions,
    start: Position,
    current: Position,
    state: State,
    sink: Option<Box<dyn ErrorSink>>,
    error: Option<LexError>,
}

impl Lexer {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            options: LexerOptions::default(),
            start: Position::START,
            current: Position::START,
            state: State::Default,
            sink: None,
            error: None,
        }
    }

    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    /// Install the callback that receives the lexical error, if any.
    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Consume the lexer, yielding the error that stopped it.
    pub fn finish(self) -> Result<(), LexError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.source[self.current.offset..].chars();
        chars.next();
        chars.next()
    }

    fn eat(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current.offset += c.len_utf8();
        // "\r\n" counts as one line break, taken at the '\n'
        if c == '\n' || (c == '\r' && self.peek() != Some('\n')) {
            self.current.line += 1;
            self.current.column = 1;
        } else {
            self.current.column += 1;
        }
        Some(c)
    }

    fn eat_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.eat();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.eat();
        }
    }

    fn lexeme(&self) -> &str {
        &self.source[self.start.offset..self.current.offset]
    }

    fn emit(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(
            kind,
            Span::new(self.start, self.current),
            Arc::clone(&self.source),
        );
        self.start = self.current;
        if self.options.trace_tokens {
            tracing::trace!("{}", token.describe());
        }
        if self.options.trace_positions {
            tracing::trace!(
                "at {}\n{}",
                self.current,
                excerpt_at(&self.source, self.current)
            );
        }
        token
    }

    fn fail(&mut self, message: impl Into<String>) -> Token {
        self.fail_at(self.current, message)
    }

    fn fail_at(&mut self, position: Position, message: impl Into<String>) -> Token {
        let error = LexError::new(message, position, &self.source);
        tracing::debug!("lexing stopped: {error}");
        if let Some(sink) = self.sink.as_mut() {
            sink.report(&error);
        }
        self.error = Some(error);
        self.state = State::Done;
        self.emit(TokenKind::Illegal)
    }

    fn lex_default(&mut self) -> Option<Token> {
        let Some(c) = self.peek() else {
            self.state = State::Done;
            return Some(self.emit(TokenKind::Eof));
        };
        match c {
            '(' => {
                self.eat();
                if self.eat_if('*') {
                    self.state = State::Comment;
                    None
                } else {
                    Some(self.emit(TokenKind::Lparen))
                }
            }
            ':' => {
                self.eat();
                let kind = if self.eat_if('=') {
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                };
                Some(self.emit(kind))
            }
            '=' => {
                self.eat();
                let kind = if self.eat_if('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Eq
                };
                Some(self.emit(kind))
            }
            '-' => {
                self.eat();
                if self.eat_if('>') {
                    Some(self.emit(TokenKind::Tarrow))
                } else if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.eat_while(|c| c.is_ascii_digit());
                    Some(self.emit(TokenKind::NumLit))
                } else {
                    Some(self.fail("illegal operator '-'"))
                }
            }
            '<' => {
                self.eat();
                if self.eat_if('-') {
                    Some(self.emit(TokenKind::Fetch))
                } else {
                    Some(self.fail("expected '-' after '<'"))
                }
            }
            '"' => {
                self.state = State::StringLiteral;
                None
            }
            '\n' => {
                self.eat();
                Some(self.emit(TokenKind::Newline))
            }
            '\r' => {
                self.eat();
                self.eat_if('\n');
                Some(self.emit(TokenKind::Newline))
            }
            c if is_blank(c) => {
                self.state = State::Whitespace;
                None
            }
            c if c.is_ascii_digit() => {
                self.state = State::Number;
                None
            }
            _ => {
                self.state = State::Identifier;
                None
            }
        }
    }

    fn lex_whitespace(&mut self) -> Option<Token> {
        self.eat_while(is_blank);
        self.state = State::Default;
        Some(self.emit(TokenKind::Whitespace))
    }

    fn lex_number(&mut self) -> Option<Token> {
        if self.peek() == Some('0') && self.peek_second() == Some('x') {
            self.eat();
            self.eat();
            self.state = State::Hex;
            return None;
        }
        self.eat_while(|c| c.is_ascii_digit());
        self.state = State::Default;
        Some(self.emit(TokenKind::NumLit))
    }

    fn lex_hex(&mut self) -> Option<Token> {
        if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            return Some(self.fail("expected hex digit after '0x'"));
        }
        self.eat_while(|c| c.is_ascii_hexdigit());
        self.state = State::Default;
        Some(self.emit(TokenKind::HexLit))
    }

    fn lex_string(&mut self) -> Option<Token> {
        self.eat();
        loop {
            match self.peek() {
                None => return Some(self.fail("unclosed string literal")),
                Some('\\') => {
                    self.eat();
                    if self.eat().is_none() {
                        return Some(self.fail("unclosed string literal"));
                    }
                }
                Some('"') => {
                    self.eat();
                    self.state = State::Default;
                    return Some(self.emit(TokenKind::StringLit));
                }
                Some(_) => {
                    self.eat();
                }
            }
        }
    }

    fn lex_comment(&mut self) -> Option<Token> {
        loop {
            match self.eat() {
                None => {
                    return Some(self.fail(
                        "unterminated comment, expected closing '*)' but reached end of input",
                    ));
                }
                Some('*') if self.peek() == Some(')') => {
                    self.eat();
                    self.state = State::Default;
                    return Some(self.emit(TokenKind::Comment));
                }
                Some(_) => {}
            }
        }
    }

    fn lex_identifier(&mut self) -> Option<Token> {
        self.state = State::Default;
        let c = self.peek()?;

        if c == '_' {
            self.eat();
            if self.peek().is_some_and(is_ident_char) {
                self.eat_while(is_ident_char);
                return Some(self.emit(TokenKind::Spid));
            }
            return Some(self.emit(TokenKind::Underscore));
        }

        if c == '\'' {
            self.eat();
            if !self.peek().is_some_and(is_ident_start) {
                return Some(self.fail("expected type parameter name after '"));
            }
            self.eat_while(is_ident_char);
            let capitalized = self.lexeme()[1..].starts_with(char::is_uppercase);
            if !capitalized {
                return Some(self.fail("type parameter name should be capitalized"));
            }
            return Some(self.emit(TokenKind::Tid));
        }

        if is_ident_start(c) {
            self.eat_while(is_ident_char);
            let kind = classify_word(self.lexeme());
            return Some(self.emit(kind));
        }

        let mut buf = [0u8; 4];
        if let Some(kind) = tables::separator(c.encode_utf8(&mut buf)) {
            self.eat();
            return Some(self.emit(kind));
        }

        let at = self.current;
        self.eat();
        Some(self.fail_at(at, format!("unexpected character {c:?}")))
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let token = match self.state {
                State::Done => return None,
                State::Default => self.lex_default(),
                State::Whitespace => self.lex_whitespace(),
                State::Number => self.lex_number(),
                State::Hex => self.lex_hex(),
                State::StringLiteral => self.lex_string(),
                State::Identifier => self.lex_identifier(),
                State::Comment => self.lex_comment(),
            };
            if token.is_some() {
                return token;
            }
        }
    }
}

impl FusedIterator for Lexer {}

fn is_blank(c: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\r'
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Primitive types win over keywords, keywords over built-in ADT names,
/// and the first letter's case decides between `Cid` and `Id`.
fn classify_word(word: &str) -> TokenKind {
    tables::primitive_type(word)
        .or_else(|| tables::keyword(word))
        .or_else(|| tables::builtin_adt(word))
        .unwrap_or_else(|| {
            if word.starts_with(char::is_uppercase) {
                TokenKind::Cid
            } else {
                TokenKind::Id
            }
        })
}

/// Lex a whole document, returning every token up to and including `Eof`
/// (or the single `Illegal` token) and the error that stopped lexing.
pub fn tokenize(source: &str) -> (Vec<Token>, Option<LexError>) {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.finish().err())
}
