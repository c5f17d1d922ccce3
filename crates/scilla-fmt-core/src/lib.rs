//! Scilla Formatter Core
//!
//! A lossless lexer for the Scilla smart-contract language and a formatter
//! that rewrites whitespace, line breaks and indentation directly on the
//! token stream. No syntax tree is built: indentation comes from a stack of
//! open blocks maintained while walking the tokens.

pub mod config;
pub mod error;
pub mod format;
pub mod lexer;
pub mod result;
pub mod sequence;
pub mod token;

// Re-export commonly used types
pub use config::{ConfigLoader, FormatterConfiguration, ScillaFmtConfig, TraceConfiguration};
pub use error::{ErrorKind, ScillaError};
pub use format::{FormatOptions, Formatter, TraceOptions, format_document};
pub use lexer::{ErrorSink, LexError, Lexer, LexerOptions, TokenStream, tokenize};
pub use result::Result;
pub use sequence::TokenSequence;
pub use token::{Position, Span, Token, TokenKind};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SCILLA_LOG_LEVEL";

/// Initialize the tracing subscriber for logging
///
/// The filter is read from `SCILLA_LOG_LEVEL`, falling back to
/// `default_directive`. Logs go to stderr so formatted output on stdout
/// stays clean.
pub fn init_tracing(default_directive: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
