//! Token-stream formatter for Scilla
//!
//! Formatting never builds a syntax tree. The source is lexed into a
//! [`TokenSequence`], rewritten in place by an ordered [`Pipeline`] of
//! passes, and rendered back to text. The passes only touch whitespace,
//! newlines and indentation, so the code tokens come out unchanged.
//!
//! # Example
//!
//! ```rust
//! use scilla_fmt_core::format::{FormatOptions, format_document};
//!
//! let source = "transition Ping ()\naccept\nend";
//! let formatted = format_document(source, &FormatOptions::default()).unwrap();
//!
//! assert_eq!(formatted, "transition Ping ()\n  accept\nend\n");
//! ```

pub mod context;
pub mod indentation;
pub mod pipeline;
pub mod rules;


pub use context::{BlockKind, ContextStack};
pub use pipeline::{Pipeline, Rule};

use crate::error::ScillaError;
use crate::lexer::{LexError, Lexer, LexerOptions, TokenStream};
use crate::result::Result;
use crate::sequence::TokenSequence;
use std::sync::Arc;

/// Debug tracing switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceOptions {
    /// Log the position excerpt after every lexed token
    pub lexer_positions: bool,
    /// Log every lexed token
    pub lexer_tokens: bool,
    /// Log the document after every pipeline pass
    pub rules: bool,
}

impl TraceOptions {
    pub fn lexer(&self) -> LexerOptions {
        LexerOptions {
            trace_positions: self.lexer_positions,
            trace_tokens: self.lexer_tokens,
        }
    }
}

/// Formatting options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Text of one indentation unit
    pub indent_unit: String,

    /// Whether a `|` line takes its own indentation unit
    pub indent_pattern_alternative: bool,

    /// Advisory only; lines are never wrapped
    pub max_line_length: usize,

    /// Newline sequence used for every line break in the output
    pub newline: String,

    /// Whether non-empty output ends with exactly one newline
    pub end_with_newline: bool,

    pub trace: TraceOptions,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_unit: "  ".to_string(),
            indent_pattern_alternative: false,
            max_line_length: 120,
            newline: "\n".to_string(),
            end_with_newline: true,
            trace: TraceOptions::default(),
        }
    }
}

type SharedSink = Arc<dyn Fn(&LexError) + Send + Sync>;

/// Formats documents with a fixed set of options.
///
/// Each call owns its own token sequence and context stack, so one
/// `Formatter` can be shared across threads.
pub struct Formatter {
    options: FormatOptions,
    pipeline: Pipeline,
    sink: Option<SharedSink>,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            pipeline: Pipeline::standard(),
            sink: None,
        }
    }

    /// Receive lexical errors as soon as the lexer hits them.
    pub fn with_error_sink(mut self, sink: impl Fn(&LexError) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Lex `source` on a producer thread and materialise every token.
    ///
    /// Fails on the first lexical error; no partial sequence is returned.
    pub fn lex(&self, source: &str) -> Result<TokenSequence> {
        let mut lexer = Lexer::new(source).with_options(self.options.trace.lexer());
        if let Some(sink) = &self.sink {
            let sink = Arc::clone(sink);
            lexer = lexer.with_sink(move |error: &LexError| sink(error));
        }

        let mut stream = TokenStream::spawn(lexer)
            .map_err(|e| ScillaError::internal_error(format!("failed to start lexer: {e}")))?;
        let tokens: TokenSequence = stream.by_ref().collect();
        stream.finish()?;

        tracing::debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Format a complete document.
    pub fn format(&self, source: &str) -> Result<String> {
        let mut tokens = self.lex(source)?;
        self.pipeline.run(&mut tokens, &self.options);
        Ok(tokens.render())
    }

    /// Whether `source` is already in canonical layout.
    pub fn is_formatted(&self, source: &str) -> Result<bool> {
        Ok(self.format(source)? == source)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

/// Format a complete Scilla document
pub fn format_document(source: &str, options: &FormatOptions) -> Result<String> {
    Formatter::new(options.clone()).format(source)
}
