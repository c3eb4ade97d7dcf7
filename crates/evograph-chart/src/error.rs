//! Chart build errors

use thiserror::Error;

/// Result type for chart building
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors that abort a chart build.
///
/// Empty-input errors are separate from schema errors because the user remedy
/// differs: re-select input versus fix the file.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No series chosen; the builder never silently defaults to all series
    #[error("No series selected: choose at least one series to plot")]
    EmptySelection,

    /// The table has no rows
    #[error("Table has no rows: nothing to plot")]
    EmptyTable,

    /// Selection (or tick color source) names a series the table lacks
    #[error("Series '{0}' is not a column of the loaded table")]
    UnknownSeries(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] evograph_core::Error),
}
