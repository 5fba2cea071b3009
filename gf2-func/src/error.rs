//! Error types for Boolean and vector functions.

use thiserror::Error;

/// Error raised when a function is built from an invalid table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FuncError {
    /// The table does not have `2^n` entries
    #[error("table has {found} entries, expected {expected}")]
    TableSize {
        /// Required number of entries
        expected: usize,
        /// Number of entries supplied
        found: usize,
    },
    /// A table entry does not fit the image width
    #[error("image {value} of {index} does not fit in {bits} bits")]
    ImageOutOfRange {
        /// Preimage whose image is too wide
        index: usize,
        /// The offending image
        value: u64,
        /// Width of the images
        bits: usize,
    },
    /// A substitution table repeats an image
    #[error("table is not a bijection")]
    NotBijective,
}

/// Result type for function construction
pub type FuncResult<T> = Result<T, FuncError>;
