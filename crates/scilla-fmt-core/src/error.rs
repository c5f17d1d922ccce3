//! Error types for lexing, configuration and formatting

use crate::lexer::LexError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scilla-fmt operations
#[derive(Debug, Error)]
pub enum ScillaError {
    /// The lexer rejected the input; formatting never starts
    #[error("Lex error at {0}")]
    LexError(#[from] LexError),

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input that is not valid UTF-8
    #[error("Invalid encoding in '{path}': input must be UTF-8")]
    EncodingError { path: PathBuf },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Io,
    Encoding,
    Config,
    Internal,
}

impl ScillaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScillaError::LexError(_) => ErrorKind::Lex,
            ScillaError::IoError { .. } => ErrorKind::Io,
            ScillaError::EncodingError { .. } => ErrorKind::Encoding,
            ScillaError::ConfigError { .. } => ErrorKind::Config,
            ScillaError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Errors caused by the input itself rather than by its contents.
    pub fn is_input_unavailable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io | ErrorKind::Encoding)
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn encoding_error(path: impl Into<PathBuf>) -> Self {
        Self::EncodingError { path: path.into() }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Position;

    #[test]
    fn test_lex_error_converts_and_displays_position() {
        let lex = LexError::new(
            "unclosed string literal",
            Position {
                offset: 4,
                line: 1,
                column: 5,
            },
            "x = \"abc",
        );
        let error: ScillaError = lex.into();
        assert_eq!(error.kind(), ErrorKind::Lex);
        assert_eq!(error.to_string(), "Lex error at 1:5: unclosed string literal");
        assert!(!error.is_input_unavailable());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let error = ScillaError::io_error(
            "contract.scilla",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("contract.scilla"));
        assert!(error.is_input_unavailable());
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(ScillaError::config_error("bad").kind(), ErrorKind::Config);
        assert_eq!(ScillaError::internal_error("bad").kind(), ErrorKind::Internal);
        let encoding = ScillaError::encoding_error("a.scilla");
        assert_eq!(encoding.kind(), ErrorKind::Encoding);
        assert!(encoding.is_input_unavailable());
        assert!(!ScillaError::config_error("bad").is_input_unavailable());
        assert_eq!(
            ScillaError::config_error("indent unit must not be empty").to_string(),
            "Configuration error: indent unit must not be empty"
        );
    }
}
