//! Configuration file schema

use crate::error::ScillaError;
use crate::format::{FormatOptions, TraceOptions};
use crate::result::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root of a scilla-fmt configuration file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScillaFmtConfig {
    /// JSON schema reference, ignored by the formatter
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Layout settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<FormatterConfiguration>,

    /// Debug tracing switches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceConfiguration>,
}

/// Line break sequence written to the output
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    Lf,
    Crlf,
    Cr,
}

impl NewlineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineStyle::Lf => "\n",
            NewlineStyle::Crlf => "\r\n",
            NewlineStyle::Cr => "\r",
        }
    }
}

/// Formatter configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfiguration {
    #[schemars(description = "Text of one indentation unit; spaces and tabs only")]
    pub indent_unit: Option<String>,

    #[schemars(description = "Indent pattern alternatives ('|') one unit deeper than their match")]
    pub indent_pattern_alternative: Option<bool>,

    #[schemars(description = "Advisory maximum line length; lines are never wrapped")]
    pub max_line_length: Option<usize>,

    #[schemars(description = "Line break sequence: 'lf', 'crlf' or 'cr'")]
    pub newline: Option<NewlineStyle>,

    #[schemars(description = "End non-empty output with exactly one newline")]
    pub end_with_newline: Option<bool>,
}

/// Debug tracing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraceConfiguration {
    #[schemars(description = "Log the source position after every lexed token")]
    pub lexer_positions: Option<bool>,

    #[schemars(description = "Log every lexed token")]
    pub lexer_tokens: Option<bool>,

    #[schemars(description = "Log the document after every formatting pass")]
    pub rules: Option<bool>,
}

impl FormatterConfiguration {
    /// Merge the fields that are set into `options`.
    pub fn apply_to(&self, options: &mut FormatOptions) -> Result<()> {
        if let Some(unit) = &self.indent_unit {
            validate_indent_unit(unit)?;
            options.indent_unit = unit.clone();
        }
        if let Some(alternative) = self.indent_pattern_alternative {
            options.indent_pattern_alternative = alternative;
        }
        if let Some(length) = self.max_line_length {
            options.max_line_length = length;
        }
        if let Some(newline) = self.newline {
            options.newline = newline.as_str().to_string();
        }
        if let Some(end) = self.end_with_newline {
            options.end_with_newline = end;
        }
        Ok(())
    }
}

impl TraceConfiguration {
    pub fn apply_to(&self, trace: &mut TraceOptions) {
        if let Some(positions) = self.lexer_positions {
            trace.lexer_positions = positions;
        }
        if let Some(tokens) = self.lexer_tokens {
            trace.lexer_tokens = tokens;
        }
        if let Some(rules) = self.rules {
            trace.rules = rules;
        }
    }
}

/// Indentation is re-lexed as whitespace, so only blanks are allowed.
pub(crate) fn validate_indent_unit(unit: &str) -> Result<()> {
    if unit.is_empty() {
        return Err(ScillaError::config_error("indent unit must not be empty"));
    }
    if !unit.chars().all(|c| c == ' ' || c == '\t') {
        return Err(ScillaError::config_error(format!(
            "indent unit {unit:?} may only contain spaces and tabs"
        )));
    }
    Ok(())
}

impl ScillaFmtConfig {
    /// Formatter options with every configured value applied over the defaults.
    pub fn format_options(&self) -> Result<FormatOptions> {
        let mut options = FormatOptions::default();
        if let Some(formatter) = &self.formatter {
            formatter.apply_to(&mut options)?;
        }
        if let Some(trace) = &self.trace {
            trace.apply_to(&mut options.trace);
        }
        Ok(options)
    }

    pub fn formatter_config(&self) -> FormatterConfiguration {
        self.formatter.clone().unwrap_or_default()
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ScillaFmtConfig)
    }
}

impl Default for ScillaFmtConfig {
    fn default() -> Self {
        Self {
            schema: None,
            formatter: Some(FormatterConfiguration::default()),
            trace: None,
        }
    }
}

impl Default for FormatterConfiguration {
    fn default() -> Self {
        Self {
            indent_unit: Some("  ".to_string()),
            indent_pattern_alternative: Some(false),
            max_line_length: Some(120),
            newline: Some(NewlineStyle::Lf),
            end_with_newline: Some(true),
        }
    }
}
