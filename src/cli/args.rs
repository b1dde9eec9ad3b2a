//! Defines the command-line arguments and subcommands for the Tally CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::{Evaluator, DEFAULT_MAX_DEPTH};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "Evaluate integer arithmetic expressions."
)]
pub struct TallyArgs {
    /// Maximum nesting depth of parentheses.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Log more detail to stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Starts the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl TallyArgs {
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new().with_max_depth(self.max_depth)
    }
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive shell.
    Repl,
    /// Evaluate a single expression and print its value.
    Eval {
        /// The expression, e.g. "(2 + 3) * 4".
        #[arg(required = true, allow_hyphen_values = true)]
        expression: String,
        /// Print the outcome as a JSON object.
        #[arg(long)]
        json: bool,
    },
    /// Evaluate every non-blank line of a file.
    Run {
        /// The path to a file with one expression per line.
        #[arg(required = true)]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        TallyArgs::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_repl() {
        let args = TallyArgs::try_parse_from(["tally"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.evaluator(), Evaluator::default());
    }

    #[test]
    fn eval_accepts_leading_minus() {
        let args = TallyArgs::try_parse_from(["tally", "eval", "-5 + 3", "--json"]).unwrap();
        match args.command {
            Some(Command::Eval { expression, json }) => {
                assert_eq!(expression, "-5 + 3");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_options_configure_evaluator() {
        let args =
            TallyArgs::try_parse_from(["tally", "run", "exprs.txt", "--max-depth", "4", "-vv"])
                .unwrap();
        assert_eq!(args.evaluator().max_depth(), 4);
        assert_eq!(args.verbose, 2);
    }
}
