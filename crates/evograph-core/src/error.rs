//! Error types for evograph-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in evograph-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid hex color string
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    /// Table declared without any data series
    #[error("Table has no data series")]
    NoSeries,

    /// Row score count does not match the series header
    #[error("Row '{function}' has {actual} scores, expected {expected}")]
    RowShape {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// Series name not present in the table
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    /// Line width outside the allowed range
    #[error("Invalid line width {0}: must be between 1 and 5")]
    InvalidLineWidth(u8),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
