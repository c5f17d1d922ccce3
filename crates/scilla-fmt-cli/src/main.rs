//! scilla-fmt
//!
//! Command-line formatter for Scilla smart contracts

mod commands;
mod output;

use clap::Parser;
use clap::builder::FalseyValueParser;
use commands::Input;
use scilla_fmt_core::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "scilla-fmt")]
#[command(about = "Canonical layout for Scilla smart contracts")]
#[command(version = scilla_fmt_core::VERSION)]
#[command(
    long_about = "scilla-fmt rewrites the whitespace, line breaks and indentation of a Scilla\n\
source file. Code tokens and comments are never changed.\n\
\n\
Examples:\n  \
scilla-fmt contract.scilla            # Print the formatted contract\n  \
scilla-fmt --write contract.scilla    # Format in place\n  \
scilla-fmt --check contract.scilla    # Exit 3 if the file is not formatted\n  \
cat contract.scilla | scilla-fmt -    # Format stdin\n  \
scilla-fmt --tokens contract.scilla   # Dump the token stream\n\
\n\
Exit codes: 0 success, 1 lex or other error, 2 unsupported mode,\n\
3 --check found unformatted input, 4 input could not be opened or is not UTF-8"
)]
pub(crate) struct Cli {
    /// File to format; stdin when absent or `-`
    pub file: Option<PathBuf>,

    /// Rewrite the file in place
    #[arg(short, long, requires = "file", conflicts_with_all = ["check", "tokens"])]
    pub write: bool,

    /// Dump one line per token instead of formatting
    #[arg(long, conflicts_with = "check")]
    pub tokens: bool,

    /// Exit with code 3 when the input is not already formatted
    #[arg(long)]
    pub check: bool,

    /// Print the syntax tree (not implemented)
    #[arg(long, conflicts_with_all = ["write", "tokens", "check"])]
    pub ast: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to configuration file (.scillafmt.toml/.scillafmt.json)")]
    pub config: Option<PathBuf>,

    /// Text of one indentation unit, overriding the configuration
    #[arg(long)]
    pub indent_unit: Option<String>,

    /// Indent `|` alternatives one unit deeper than their match
    #[arg(long)]
    pub indent_pattern_alternative: bool,

    /// Do not end the output with a newline
    #[arg(long)]
    pub no_final_newline: bool,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    pub print_config_schema: bool,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log the source position after every lexed token
    #[arg(long, env = "SCILLA_TRACE_LEXER_POS", value_parser = FalseyValueParser::new())]
    pub trace_lexer_positions: bool,

    /// Log every lexed token
    #[arg(long, env = "SCILLA_TRACE_LEXER_TOKEN", value_parser = FalseyValueParser::new())]
    pub trace_lexer_tokens: bool,

    /// Log the document after every formatting pass
    #[arg(long, env = "SCILLA_TRACE_RULES", value_parser = FalseyValueParser::new())]
    pub trace_rules: bool,
}

impl Cli {
    fn tracing_enabled(&self) -> bool {
        self.trace_lexer_positions || self.trace_lexer_tokens || self.trace_rules
    }

    fn log_directive(&self) -> &'static str {
        if self.tracing_enabled() {
            return "scilla_fmt=trace";
        }
        match self.verbose {
            0 => "scilla_fmt=warn",
            1 => "scilla_fmt=info",
            2 => "scilla_fmt=debug",
            _ => "scilla_fmt=trace",
        }
    }
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success = 0,
    Failure = 1,
    Unsupported = 2,
    Unformatted = 3,
    InputUnavailable = 4,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
    init_tracing(cli.log_directive());

    match run(&cli) {
        Ok(status) => {
            debug!("finished with {status:?}");
            status.into()
        }
        Err(e) => {
            debug!("scilla-fmt failed: {e:?}");
            output::print_error(&format_args!("{e:#}"));
            Status::Failure.into()
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Status> {
    if cli.print_config_schema {
        output::print_schema()?;
        return Ok(Status::Success);
    }
    if cli.ast {
        output::print_unsupported("--ast: syntax tree printing is not implemented");
        return Ok(Status::Unsupported);
    }

    let input = Input::from_arg(cli.file.as_deref());
    let source = match input.read() {
        Ok(source) => source,
        Err(e) if e.is_input_unavailable() => {
            output::print_error(&e);
            return Ok(Status::InputUnavailable);
        }
        Err(e) => return Err(e.into()),
    };
    let options = commands::load_options(cli, &input)?;
    debug!("options: {options:?}");

    if cli.tokens {
        commands::dump_tokens(&source, &input, &options)
    } else if cli.check {
        commands::check(&source, &input, &options)
    } else if cli.write {
        commands::write_in_place(&source, &input, &options)
    } else {
        commands::print_formatted(&source, &input, &options)
    }
}
