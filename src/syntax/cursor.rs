//! Read position over one line of input.
//!
//! A [`Cursor`] never rewinds. Positions are byte offsets, so they can be
//! handed to miette as spans without conversion.

use miette::SourceSpan;

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Looks one character past [`peek`](Self::peek). `None` at or near the end.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next()?;
        chars.next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| is_whitespace(*c)) {
            self.pos += c.len_utf8();
        }
    }

    /// Span from `start` up to the current position.
    pub fn span_from(&self, start: usize) -> SourceSpan {
        (start..self.pos).into()
    }

    /// Span of the next character, zero-width at the end of input.
    pub fn next_char_span(&self) -> SourceSpan {
        let len = self.peek().map_or(0, char::len_utf8);
        (self.pos..self.pos + len).into()
    }

    /// Span of everything not yet consumed.
    pub fn rest_span(&self) -> SourceSpan {
        (self.pos..self.input.len()).into()
    }
}

/// Space, tab, newline, carriage return, vertical tab and form feed.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeks_do_not_consume() {
        let cursor = Cursor::new("-5");
        assert_eq!(cursor.peek(), Some('-'));
        assert_eq!(cursor.peek_second(), Some('5'));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn lookahead_stops_at_end() {
        let mut cursor = Cursor::new("-");
        assert_eq!(cursor.peek_second(), None);
        cursor.bump();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.peek_second(), None);
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn skips_ascii_whitespace_only() {
        let mut cursor = Cursor::new(" \t\r\n\x0b\x0c7");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some('7'));

        let mut cursor = Cursor::new("\u{a0}7");
        cursor.skip_whitespace();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn spans_use_byte_offsets() {
        let mut cursor = Cursor::new("é+1");
        assert_eq!(cursor.next_char_span(), SourceSpan::from(0..2));
        cursor.bump();
        assert_eq!(cursor.position(), 2);
        assert!(cursor.eat('+'));
        assert!(!cursor.eat('+'));
        assert_eq!(cursor.span_from(0), SourceSpan::from(0..3));
        assert_eq!(cursor.rest(), "1");
        assert_eq!(cursor.rest_span(), SourceSpan::from(3..4));
    }

    #[test]
    fn digits_are_ascii() {
        assert!(is_digit('0'));
        assert!(is_digit('9'));
        assert!(!is_digit('٣'));
        assert!(!is_digit('a'));
    }
}
