//! Terminal output for diagnostics and reports

use colored::*;
use scilla_fmt_core::{LexError, ScillaFmtConfig};
use std::fmt::Display;

/// Print a lexical error with its caret-marked excerpt.
pub fn print_lex_error(name: &str, error: &LexError) {
    eprintln!("{} {name}:{}", "error:".red().bold(), error.render());
}

/// Report a file that `--check` would change.
pub fn print_unformatted(name: &str) {
    eprintln!("{} {name}", "unformatted:".yellow().bold());
}

pub fn print_error(error: &impl Display) {
    eprintln!("{} {error}", "error:".red().bold());
}

pub fn print_unsupported(message: &str) {
    eprintln!("{} {message}", "unsupported:".yellow().bold());
}

/// Print the configuration file schema as pretty JSON.
pub fn print_schema() -> anyhow::Result<()> {
    let schema = ScillaFmtConfig::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
