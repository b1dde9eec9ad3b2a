//! Handles all user-facing output for the CLI.
//!
//! Results and failures are written as `Result: <n>` and `Error: <message>`
//! lines, colorized when the target supports it. `--json` output is built
//! here too so every command formats outcomes the same way.

use std::io::{self, IsTerminal};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

use crate::errors::EvalError;

// ============================================================================
// LINE OUTPUT
// ============================================================================

/// termcolor's `Auto` only looks at the environment, so piped stdout is
/// checked here.
pub fn stdout_color_choice() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

pub fn write_result<W: WriteColor>(out: &mut W, value: i64) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "Result:")?;
    out.reset()?;
    writeln!(out, " {value}")
}

pub fn write_error<W: WriteColor>(out: &mut W, error: &EvalError) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "Error:")?;
    out.reset()?;
    writeln!(out, " {error}")
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

#[derive(Debug, Serialize)]
pub struct JsonOutcome<'a> {
    pub input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

#[derive(Debug, Serialize)]
pub struct JsonError {
    pub kind: &'static str,
    pub code: String,
    pub message: String,
    pub offset: usize,
}

impl<'a> JsonOutcome<'a> {
    pub fn new(input: &'a str, outcome: &Result<i64, EvalError>) -> Self {
        match outcome {
            Ok(value) => Self {
                input,
                result: Some(*value),
                error: None,
            },
            Err(error) => Self {
                input,
                result: None,
                error: Some(JsonError {
                    kind: error.kind.code_suffix(),
                    code: error.diagnostic_info.error_code.clone(),
                    message: error.to_string(),
                    offset: error.offset(),
                }),
            },
        }
    }
}
