//! Evaluation entry point.
//!
//! An [`Evaluator`] only carries settings. Each call builds its own cursor and
//! rule state and drops them when it returns, so one evaluator can be shared
//! freely between threads and calls never influence each other.

use tracing::debug;

use crate::errors::{ErrorReporting, EvalError, SourceContext};
use crate::syntax::{Cursor, Rules};

/// Default limit on how deeply parentheses may nest. Fits a 2 MiB thread
/// stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn evaluate(&self, input: &str) -> Result<i64, EvalError> {
        self.evaluate_named("input", input)
    }

    /// Evaluates `input`, using `name` as the source name in diagnostics.
    pub fn evaluate_named(&self, name: &str, input: &str) -> Result<i64, EvalError> {
        debug!(name, input, "evaluating");
        let source = SourceContext::from_input(name, input);
        let mut cursor = Cursor::new(input);
        let mut rules = Rules::new(&source, self.max_depth);

        let value = rules.expression(&mut cursor)?;
        if !cursor.is_at_end() {
            let found = cursor.rest().chars().next().unwrap_or_default();
            return Err(source.trailing_input(found, cursor.rest_span()));
        }

        debug!(value, "evaluated");
        Ok(value)
    }
}

/// Evaluates one line with default settings.
pub fn evaluate(input: &str) -> Result<i64, EvalError> {
    Evaluator::default().evaluate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn evaluates_whole_line() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14);
    }

    #[test]
    fn trailing_input_spans_the_rest_of_the_line() {
        let err = evaluate("1 2 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput { found: '2' });
        assert_eq!(err.offset(), 2);
        assert_eq!(err.source_info.primary_span.len(), 3);
    }

    #[test]
    fn stray_close_paren_is_trailing_input() {
        let err = evaluate("(1 + 2))").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput { found: ')' });
    }

    #[test]
    fn max_depth_is_configurable() {
        let shallow = Evaluator::new().with_max_depth(1);
        assert_eq!(shallow.max_depth(), 1);
        assert_eq!(shallow.evaluate("(1 + 2) * (3)").unwrap(), 9);
        assert_eq!(
            shallow.evaluate("((1))").unwrap_err().kind,
            ErrorKind::NestingTooDeep { limit: 1 }
        );
    }

    #[test]
    fn source_name_reaches_diagnostics() {
        let err = Evaluator::new().evaluate_named("<repl:3>", "1 +").unwrap_err();
        assert_eq!(err.source_info.source.name(), "<repl:3>");
    }
}
