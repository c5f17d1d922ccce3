//! Command implementations

use crate::{Cli, Status, output};
use anyhow::Context;
use scilla_fmt_core::{
    ConfigLoader, FormatOptions, Formatter, FormatterConfiguration, LexError, Lexer, ScillaError,
    TokenStream, TraceConfiguration,
};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `None` and `-` both mean standard input.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => Input::File(path.to_path_buf()),
            _ => Input::Stdin,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole input and require it to be UTF-8.
    pub fn read(&self) -> Result<String, ScillaError> {
        let bytes = match self {
            Input::Stdin => {
                let mut buffer = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buffer)
                    .map_err(|e| ScillaError::io_error(self.name(), e))?;
                buffer
            }
            Input::File(path) => std::fs::read(path).map_err(|e| ScillaError::io_error(path, e))?,
        };
        String::from_utf8(bytes).map_err(|_| ScillaError::encoding_error(self.name()))
    }

    /// Directory where configuration discovery starts.
    fn config_dir(&self) -> Option<&Path> {
        match self {
            Input::Stdin => None,
            Input::File(path) => path.parent().filter(|p| !p.as_os_str().is_empty()),
        }
    }
}

/// Configuration file values with command-line overrides on top.
pub fn load_options(cli: &Cli, input: &Input) -> anyhow::Result<FormatOptions> {
    let config = ConfigLoader::load(cli.config.as_deref(), input.config_dir())?;
    let mut options = config.format_options()?;

    let overrides = FormatterConfiguration {
        indent_unit: cli.indent_unit.clone(),
        indent_pattern_alternative: cli.indent_pattern_alternative.then_some(true),
        max_line_length: None,
        newline: None,
        end_with_newline: cli.no_final_newline.then_some(false),
    };
    overrides
        .apply_to(&mut options)
        .context("invalid command-line formatting option")?;

    let trace = TraceConfiguration {
        lexer_positions: cli.trace_lexer_positions.then_some(true),
        lexer_tokens: cli.trace_lexer_tokens.then_some(true),
        rules: cli.trace_rules.then_some(true),
    };
    trace.apply_to(&mut options.trace);
    Ok(options)
}

/// Print one line per token, stopping at the first lexical error.
pub fn dump_tokens(source: &str, input: &Input, options: &FormatOptions) -> anyhow::Result<Status> {
    let name = input.name();
    let lexer = Lexer::new(source)
        .with_options(options.trace.lexer())
        .with_sink(move |error: &LexError| output::print_lex_error(&name, error));

    let mut stream = TokenStream::spawn(lexer).context("failed to start lexer thread")?;
    let mut out = BufWriter::new(io::stdout().lock());
    let mut count = 0usize;
    for token in stream.by_ref() {
        writeln!(out, "{}", token.describe())?;
        count += 1;
    }
    out.flush()?;
    debug!("dumped {count} tokens");

    match stream.finish() {
        Ok(()) => Ok(Status::Success),
        Err(_) => Ok(Status::Failure),
    }
}

/// Exit with `Unformatted` when formatting would change the input.
pub fn check(source: &str, input: &Input, options: &FormatOptions) -> anyhow::Result<Status> {
    let Some(formatted) = format_or_report(source, input, options)? else {
        return Ok(Status::Failure);
    };
    if formatted == source {
        info!("{} is formatted", input.name());
        Ok(Status::Success)
    } else {
        output::print_unformatted(&input.name());
        Ok(Status::Unformatted)
    }
}

pub fn write_in_place(source: &str, input: &Input, options: &FormatOptions) -> anyhow::Result<Status> {
    let Input::File(path) = input else {
        anyhow::bail!("--write needs a file argument");
    };
    let Some(formatted) = format_or_report(source, input, options)? else {
        return Ok(Status::Failure);
    };
    if formatted == source {
        debug!("{} already formatted", path.display());
    } else {
        std::fs::write(path, formatted).map_err(|e| ScillaError::io_error(path, e))?;
        info!("formatted {}", path.display());
    }
    Ok(Status::Success)
}

pub fn print_formatted(source: &str, input: &Input, options: &FormatOptions) -> anyhow::Result<Status> {
    let Some(formatted) = format_or_report(source, input, options)? else {
        return Ok(Status::Failure);
    };
    let mut out = io::stdout().lock();
    out.write_all(formatted.as_bytes())?;
    out.flush()?;
    Ok(Status::Success)
}

/// Format `source`, printing a lexical error instead of returning it.
fn format_or_report(
    source: &str,
    input: &Input,
    options: &FormatOptions,
) -> anyhow::Result<Option<String>> {
    match Formatter::new(options.clone()).format(source) {
        Ok(formatted) => Ok(Some(formatted)),
        Err(ScillaError::LexError(error)) => {
            output::print_lex_error(&input.name(), &error);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
