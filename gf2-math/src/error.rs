//! Error types for text input.
//!
//! Only reading the textual forms of bit vectors, monomials, polynomials and
//! ideals can fail at runtime. Misuse of the algebraic API (dividing by a
//! non-divisor, inserting zero into an ideal, enumerating an order that has no
//! successor function) is a programming error and panics instead.

use thiserror::Error;

/// Error raised while reading a textual value.
///
/// Offsets are byte offsets into the input handed to the reader. The reader
/// never consumes the offending character, so `offset` also marks where a
/// caller can resume.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended before a complete token was read
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd {
        /// Offset of the end of input
        offset: usize,
    },
    /// A character that cannot start or continue the expected token
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar {
        /// The offending character
        found: char,
        /// Its offset
        offset: usize,
    },
    /// A variable prefix `x` not followed by decimal digits
    #[error("missing variable index at offset {offset}")]
    MissingIndex {
        /// Offset right after the `x`
        offset: usize,
    },
    /// A variable index that does not fit the variable count
    #[error("variable x{index} is out of range for {nvars} variables")]
    VariableOutOfRange {
        /// The index as read (saturated at `usize::MAX`)
        index: usize,
        /// Number of variables of the value being read
        nvars: usize,
    },
    /// The same variable occurs twice in one monomial
    #[error("variable x{index} occurs twice in a monomial")]
    DuplicateVariable {
        /// The repeated index
        index: usize,
    },
    /// A complete value was read but input remains
    #[error("trailing input at offset {offset}")]
    TrailingInput {
        /// Offset of the first unread non-blank character
        offset: usize,
    },
}

/// Result type for text input
pub type ParseResult<T> = Result<T, ParseError>;
