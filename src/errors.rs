//! Tally Error Handling
//!
//! Every failure raised while evaluating a line is an [`EvalError`]: what went
//! wrong ([`ErrorKind`]), where it happened ([`SourceInfo`]) and how to help
//! ([`DiagnosticInfo`]). Errors are never built by hand outside this module;
//! the grammar creates them through the [`ErrorReporting`] trait.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The named input line an evaluation runs over.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_input(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// A failed evaluation.
#[derive(Debug)]
pub struct EvalError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// Every way an evaluation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Syntax errors - the line is not a well-formed expression
    #[error("Unexpected character at end: '{found}'")]
    TrailingInput { found: char },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Missing closing parenthesis{}", describe_found(.found))]
    MissingCloseParen { found: Option<char> },
    #[error("Unexpected character: '{found}'")]
    UnexpectedCharacter { found: char },
    #[error("Expected a number{}", describe_found(.found))]
    ExpectedNumber { found: Option<char> },
    #[error("Parentheses nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    // Arithmetic errors - well-formed, but the value cannot be computed
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in {operation}")]
    Overflow { operation: &'static str },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!(", found '{c}'"),
        None => ", found end of input".to_string(),
    }
}

/// Where an error happened.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Arithmetic,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Arithmetic => "arithmetic",
        }
    }
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TrailingInput { .. }
            | Self::UnexpectedEnd
            | Self::MissingCloseParen { .. }
            | Self::UnexpectedCharacter { .. }
            | Self::ExpectedNumber { .. }
            | Self::NestingTooDeep { .. } => ErrorCategory::Syntax,

            Self::DivisionByZero | Self::Overflow { .. } => ErrorCategory::Arithmetic,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::TrailingInput { .. } => "trailing_input",
            Self::UnexpectedEnd => "unexpected_end",
            Self::MissingCloseParen { .. } => "missing_close_paren",
            Self::UnexpectedCharacter { .. } => "unexpected_character",
            Self::ExpectedNumber { .. } => "expected_number",
            Self::NestingTooDeep { .. } => "nesting_too_deep",
            Self::DivisionByZero => "division_by_zero",
            Self::Overflow { .. } => "overflow",
        }
    }

    fn default_help(&self) -> Option<String> {
        match self {
            Self::TrailingInput { .. } => {
                Some("an operator may be missing between two values".into())
            }
            Self::UnexpectedEnd => Some("the expression stops where a value was expected".into()),
            Self::UnexpectedCharacter { .. } => {
                Some("a value starts with a digit, '-' directly followed by a digit, or '('".into())
            }
            Self::NestingTooDeep { .. } => Some("raise the limit with --max-depth".into()),
            Self::Overflow { .. } => Some(format!(
                "values must stay within {} and {}",
                i64::MIN,
                i64::MAX
            )),
            Self::MissingCloseParen { .. } | Self::ExpectedNumber { .. } | Self::DivisionByZero => {
                None
            }
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::TrailingInput { .. } => "not part of the expression",
            Self::UnexpectedEnd => "value expected here",
            Self::MissingCloseParen { .. } => "expected ')' here",
            Self::UnexpectedCharacter { .. } => "unexpected character",
            Self::ExpectedNumber { .. } => "expected a digit here",
            Self::NestingTooDeep { .. } => "nesting limit reached",
            Self::DivisionByZero => "this evaluates to 0",
            Self::Overflow { .. } => "result does not fit in 64 bits",
        }
    }
}

impl EvalError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Byte offset of the primary span within the evaluated line.
    pub fn offset(&self) -> usize {
        self.source_info.primary_span.offset()
    }

    /// Replace the help text shown under the diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }
}

impl std::error::Error for EvalError {}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for EvalError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CONSTRUCTION
// ============================================================================

/// Context-aware error creation
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> EvalError;

    fn trailing_input(&self, found: char, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::TrailingInput { found }, span)
    }

    fn unexpected_end(&self, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::UnexpectedEnd, span)
    }

    fn missing_close_paren(&self, found: Option<char>, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::MissingCloseParen { found }, span)
    }

    fn unexpected_character(&self, found: char, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::UnexpectedCharacter { found }, span)
    }

    fn expected_number(&self, found: Option<char>, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::ExpectedNumber { found }, span)
    }

    fn nesting_too_deep(&self, limit: usize, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::NestingTooDeep { limit }, span)
    }

    fn division_by_zero(&self, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::DivisionByZero, span)
    }

    fn overflow(&self, operation: &'static str, span: SourceSpan) -> EvalError {
        self.report(ErrorKind::Overflow { operation }, span)
    }
}

impl ErrorReporting for SourceContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> EvalError {
        let error_code = format!("tally::{}::{}", kind.category().as_str(), kind.code_suffix());
        let help = kind.default_help();

        EvalError {
            kind,
            source_info: SourceInfo {
                source: self.to_named_source(),
                primary_span: span,
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an EvalError with full miette diagnostics to stderr.
pub fn print_error(error: EvalError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
