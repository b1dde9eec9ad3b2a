//! Tally evaluates integer arithmetic expressions.
//!
//! ```
//! assert_eq!(tally::evaluate("(2 + 3) * -4").unwrap(), -20);
//! ```

pub use crate::errors::{ErrorCategory, ErrorKind, EvalError};
pub use crate::eval::{evaluate, Evaluator, DEFAULT_MAX_DEPTH};

pub mod cli;
pub mod errors;
pub mod eval;
pub mod repl;
pub mod syntax;
