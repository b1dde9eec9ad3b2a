//! Recursive-descent rules that compute while they parse.
//!
//! ```text
//! Expression := Term (('+' | '-') Term)*
//! Term       := Factor (('*' | '/') Factor)*
//! Factor     := '(' Expression ')' | Number
//! Number     := '-'? Digit+
//! ```
//!
//! Each rule takes the cursor by exclusive reference, consumes a prefix of the
//! remaining input and returns its value. Whitespace is allowed between any two
//! tokens. No rule recovers from a failure raised by a rule it calls.

use tracing::trace;

use super::cursor::{is_digit, Cursor};
use crate::errors::{ErrorReporting, EvalError, SourceContext};

pub type RuleResult = Result<i64, EvalError>;

/// State of one in-progress parse.
pub struct Rules<'s> {
    source: &'s SourceContext,
    max_depth: usize,
    depth: usize,
}

impl<'s> Rules<'s> {
    pub fn new(source: &'s SourceContext, max_depth: usize) -> Self {
        Self {
            source,
            max_depth,
            depth: 0,
        }
    }

    /// Terms joined by `+` and `-`, applied left to right.
    pub fn expression(&mut self, cursor: &mut Cursor<'_>) -> RuleResult {
        let start = cursor.position();
        let mut total = self.term(cursor)?;
        cursor.skip_whitespace();

        while let Some(op @ ('+' | '-')) = cursor.peek() {
            cursor.bump();
            cursor.skip_whitespace();
            let rhs = self.term(cursor)?;
            total = match op {
                '+' => total
                    .checked_add(rhs)
                    .ok_or_else(|| self.source.overflow("addition", cursor.span_from(start)))?,
                _ => total
                    .checked_sub(rhs)
                    .ok_or_else(|| self.source.overflow("subtraction", cursor.span_from(start)))?,
            };
            trace!(%op, rhs, total, "additive step");
            cursor.skip_whitespace();
        }

        Ok(total)
    }

    /// Factors joined by `*` and `/`, applied left to right.
    pub fn term(&mut self, cursor: &mut Cursor<'_>) -> RuleResult {
        let start = cursor.position();
        let mut total = self.factor(cursor)?;
        cursor.skip_whitespace();

        while let Some(op @ ('*' | '/')) = cursor.peek() {
            cursor.bump();
            cursor.skip_whitespace();
            let rhs_start = cursor.position();
            let rhs = self.factor(cursor)?;
            total = match op {
                '*' => total.checked_mul(rhs).ok_or_else(|| {
                    self.source
                        .overflow("multiplication", cursor.span_from(start))
                })?,
                _ => {
                    if rhs == 0 {
                        return Err(self.source.division_by_zero(cursor.span_from(rhs_start)));
                    }
                    // Only i64::MIN / -1 can fail here.
                    total
                        .checked_div(rhs)
                        .ok_or_else(|| self.source.overflow("division", cursor.span_from(start)))?
                }
            };
            trace!(%op, rhs, total, "multiplicative step");
            cursor.skip_whitespace();
        }

        Ok(total)
    }

    /// A parenthesized expression or a number literal.
    pub fn factor(&mut self, cursor: &mut Cursor<'_>) -> RuleResult {
        cursor.skip_whitespace();

        match cursor.peek() {
            None => Err(self.source.unexpected_end(cursor.next_char_span())),
            Some('(') => self.group(cursor),
            Some(c) if is_digit(c) => self.number(cursor),
            Some('-') if cursor.peek_second().is_some_and(is_digit) => self.number(cursor),
            Some(c) => Err(self
                .source
                .unexpected_character(c, cursor.next_char_span())),
        }
    }

    fn group(&mut self, cursor: &mut Cursor<'_>) -> RuleResult {
        let open = cursor.position();
        if self.depth >= self.max_depth {
            return Err(self
                .source
                .nesting_too_deep(self.max_depth, cursor.next_char_span()));
        }

        cursor.bump();
        self.depth += 1;
        let value = self.expression(cursor)?;
        self.depth -= 1;

        match cursor.peek() {
            Some(')') => {
                cursor.bump();
                Ok(value)
            }
            found => Err(self
                .source
                .missing_close_paren(found, cursor.next_char_span())
                .with_help(format!("the '(' at offset {open} is never closed"))),
        }
    }

    /// An optionally negative run of decimal digits.
    pub fn number(&mut self, cursor: &mut Cursor<'_>) -> RuleResult {
        cursor.skip_whitespace();
        let start = cursor.position();
        let negative = cursor.eat('-');

        match cursor.peek() {
            Some(c) if is_digit(c) => {}
            found => return Err(self.source.expected_number(found, cursor.next_char_span())),
        }

        // Accumulate with the sign applied so i64::MIN is reachable.
        let mut value = Some(0i64);
        while let Some(digit) = cursor.peek().and_then(|c| c.to_digit(10)) {
            cursor.bump();
            let digit = i64::from(digit);
            value = value.and_then(|v| v.checked_mul(10)).and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            });
        }

        let value = value.ok_or_else(|| self.source.overflow("literal", cursor.span_from(start)))?;
        trace!(value, "number");
        Ok(value)
    }
}
