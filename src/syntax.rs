//! Input handling and the arithmetic grammar.
//!
//! - `cursor`: read position over a line of input.
//! - `grammar`: the Expression/Term/Factor/Number rules.

pub mod cursor;
pub mod grammar;

pub use cursor::Cursor;
pub use grammar::Rules;
