//! Producer/consumer handoff between the lexer and the formatter

use super::{LexError, Lexer};
use crate::token::Token;
use async_channel::Receiver;
use std::io;
use std::thread::{self, JoinHandle};

/// Tokens delivered one at a time from a lexer running on its own thread.
///
/// The channel holds a single token: the producer blocks until the consumer
/// has taken the previous one, so lexing never runs ahead of formatting.
pub struct TokenStream {
    receiver: Receiver<Token>,
    producer: JoinHandle<Result<(), LexError>>,
}

impl TokenStream {
    pub fn spawn(lexer: Lexer) -> io::Result<Self> {
        let (sender, receiver) = async_channel::bounded(1);
        let producer = thread::Builder::new()
            .name("scilla-lexer".to_string())
            .spawn(move || {
                let mut lexer = lexer;
                for token in lexer.by_ref() {
                    if sender.send_blocking(token).is_err() {
                        tracing::trace!("token consumer hung up");
                        break;
                    }
                }
                lexer.finish()
            })?;
        Ok(Self { receiver, producer })
    }

    /// Stop consuming and collect the lexer's outcome.
    ///
    /// A panic on the producer thread is resumed here.
    pub fn finish(self) -> Result<(), LexError> {
        let Self { receiver, producer } = self;
        receiver.close();
        match producer.join() {
            Ok(outcome) => outcome,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.receiver.recv_blocking().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_stream_matches_direct_lexing() {
        let source = "transition T ()\n  accept\nend\n";
        let direct: Vec<Token> = Lexer::new(source).collect();
        let mut stream = TokenStream::spawn(Lexer::new(source)).expect("spawn lexer");
        let streamed: Vec<Token> = stream.by_ref().collect();
        assert_eq!(direct, streamed);
        assert!(stream.finish().is_ok());
    }

    #[test]
    fn test_stream_reports_error_on_finish() {
        let mut stream = TokenStream::spawn(Lexer::new("x = \"open")).expect("spawn lexer");
        let tokens: Vec<Token> = stream.by_ref().collect();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Illegal));
        let error = stream.finish().expect_err("unclosed string");
        assert_eq!(error.message, "unclosed string literal");
    }

    #[test]
    fn test_early_finish_releases_producer() {
        let source = "x ".repeat(1000);
        let mut stream = TokenStream::spawn(Lexer::new(source)).expect("spawn lexer");
        let first = stream.next();
        assert_eq!(first.map(|t| t.kind), Some(TokenKind::Id));
        assert!(stream.finish().is_ok());
    }

    #[test]
    fn test_producer_stays_one_token_ahead() {
        let mut stream = TokenStream::spawn(Lexer::new("a b c d")).expect("spawn lexer");
        assert_eq!(stream.next().map(|t| t.text().to_string()), Some("a".to_string()));
        assert!(stream.receiver.len() <= 1);
        assert_eq!(stream.receiver.capacity(), Some(1));
        assert!(stream.finish().is_ok());
    }
}
