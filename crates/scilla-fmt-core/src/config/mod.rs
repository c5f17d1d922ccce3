//! Configuration for scilla-fmt
//!
//! Settings come from an optional file discovered by walking up from the
//! working directory. Every field is optional; anything left unset keeps the
//! [`FormatOptions`](crate::format::FormatOptions) default, and command-line
//! flags override both.
//!
//! ## Configuration Files
//!
//! Searched in this order in each directory:
//! - `.scillafmt.toml`
//! - `.scillafmt.json`
//! - `scillafmt.yaml` / `scillafmt.yml`
//! - `scillafmt.json`
//!
//! ## Example Configuration
//!
//! ```toml
//! [formatter]
//! indentUnit = "    "
//! indentPatternAlternative = true
//! newline = "crlf"
//!
//! [trace]
//! rules = true
//! ```

mod loader;
mod scilla_config;

pub use loader::ConfigLoader;
pub use scilla_config::{
    FormatterConfiguration, NewlineStyle, ScillaFmtConfig, TraceConfiguration,
};
