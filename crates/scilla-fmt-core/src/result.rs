//! Result type alias for scilla-fmt operations

use crate::error::ScillaError;

/// Standard Result type for scilla-fmt operations
pub type Result<T> = std::result::Result<T, ScillaError>;
