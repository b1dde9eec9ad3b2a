//! The Tally Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{fs, io, path::Path, process};

use clap::Parser;
use termcolor::StandardStream;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, TallyArgs};
use crate::cli::output::JsonOutcome;
use crate::{errors::print_error, repl, Evaluator};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = TallyArgs::parse();
    init_tracing(args.verbose);

    let evaluator = args.evaluator();
    debug!(max_depth = evaluator.max_depth(), "configured");

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command.unwrap_or(Command::Repl) {
        Command::Repl => repl::run_repl(evaluator).map(|_| true),
        Command::Eval { expression, json } => handle_eval(evaluator, &expression, json),
        Command::Run { file } => handle_run(evaluator, &file),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

/// Logs go to stderr so they never mix with results.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Handles the `eval` subcommand.
fn handle_eval(evaluator: Evaluator, expression: &str, json: bool) -> io::Result<bool> {
    let outcome = evaluator.evaluate_named("<eval>", expression);
    let ok = outcome.is_ok();

    if json {
        let rendered = serde_json::to_string(&JsonOutcome::new(expression, &outcome))?;
        println!("{rendered}");
        return Ok(ok);
    }

    match outcome {
        Ok(value) => println!("{value}"),
        Err(e) => print_error(e),
    }
    Ok(ok)
}

/// Handles the `run` subcommand.
fn handle_run(evaluator: Evaluator, path: &Path) -> io::Result<bool> {
    let source = fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot read {}: {}", path.display(), e))
    })?;
    let name = path.display().to_string();
    let mut stdout = StandardStream::stdout(output::stdout_color_choice());
    let mut failed = 0;

    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match evaluator.evaluate_named(&format!("{}:{}", name, index + 1), line) {
            Ok(value) => output::write_result(&mut stdout, value)?,
            Err(e) => {
                failed += 1;
                output::write_error(&mut stdout, &e)?;
            }
        }
    }

    info!(file = %name, failed, "run finished");
    Ok(failed == 0)
}
