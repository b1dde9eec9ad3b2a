//! Tally REPL (Read-Eval-Print Loop)
//!
//! Reads one expression per line and prints its value or the reason it could
//! not be evaluated. A failed line never ends the session.

use std::io::{self, BufRead, Write};

use termcolor::{StandardStream, WriteColor};
use tracing::info;

use crate::{cli::output, errors::EvalError, Evaluator};

pub const BANNER: &str = "Enter arithmetic expressions (type 'exit' to quit):";
const PROMPT: &str = "> ";

/// REPL state that persists across lines
pub struct ReplState {
    evaluator: Evaluator,
    line_number: usize,
}

impl ReplState {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            line_number: 1,
        }
    }

    /// Evaluate one line; only the line counter carries over between calls.
    pub fn eval_line(&mut self, input: &str) -> Result<i64, EvalError> {
        let source_name = format!("<repl:{}>", self.line_number);
        self.line_number += 1;
        self.evaluator.evaluate_named(&source_name, input)
    }
}

/// Counts reported when a session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub evaluated: usize,
    pub failed: usize,
}

/// Main REPL entry point, bound to stdin and stdout.
pub fn run_repl(evaluator: Evaluator) -> io::Result<SessionSummary> {
    let stdin = io::stdin();
    let mut stdout = StandardStream::stdout(output::stdout_color_choice());
    run_session(evaluator, stdin.lock(), &mut stdout)
}

/// Runs a session over any line source and colorable sink.
pub fn run_session<R: BufRead, W: WriteColor>(
    evaluator: Evaluator,
    mut input: R,
    out: &mut W,
) -> io::Result<SessionSummary> {
    writeln!(out, "{BANNER}")?;

    let mut state = ReplState::new(evaluator);
    let mut summary = SessionSummary::default();
    let mut raw = Vec::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            // EOF (Ctrl+D)
            writeln!(out)?;
            break;
        }
        // Invalid UTF-8 becomes U+FFFD, which the grammar rejects like any
        // other stray character.
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches(['\n', '\r']);

        match ReplCommand::parse(line) {
            Some(ReplCommand::Quit) => break,
            Some(ReplCommand::Help) => {
                print_help(out)?;
                continue;
            }
            None if line.trim().is_empty() => continue,
            None => {}
        }

        summary.evaluated += 1;
        match state.eval_line(line) {
            Ok(value) => output::write_result(out, value)?,
            Err(e) => {
                summary.failed += 1;
                output::write_error(out, &e)?;
            }
        }
    }

    writeln!(out, "Goodbye!")?;
    info!(evaluated = summary.evaluated, failed = summary.failed, "session ended");
    Ok(summary)
}

/// REPL command results
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Help,
    Quit,
}

impl ReplCommand {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "exit" | "quit" | ":quit" | ":q" => Some(Self::Quit),
            ":help" | ":h" => Some(Self::Help),
            _ => None,
        }
    }
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Tally REPL Commands:")?;
    writeln!(out, "  :help, :h       Show this help")?;
    writeln!(out, "  exit, quit, :q  Leave the REPL")?;
    writeln!(out)?;
    writeln!(out, "Enter an expression such as (2 + 3) * -4 to evaluate it.")?;
    writeln!(out, "Integers, + - * /, parentheses and negative literals are supported.")
}
