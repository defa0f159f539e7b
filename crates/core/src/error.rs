//! Error types for stoseg

use thiserror::Error;

/// Main error type for stoseg operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("No data: offset ({dx}, {dy}) leaves no occupied bucket")]
    NoData { dx: isize, dy: isize },

    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type alias for stoseg operations
pub type Result<T> = std::result::Result<T, Error>;
