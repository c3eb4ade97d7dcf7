//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while reading a score workbook
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet index out of bounds
    #[error("Sheet index {index} out of bounds (count: {count})")]
    SheetOutOfBounds { index: usize, count: usize },

    /// First column of a header-row workbook is not the functions column
    #[error("First column must be named 'Funciones' (found '{found}')")]
    MissingFunctionsHeader { found: String },

    /// Sheet content does not match the expected table layout
    #[error("Sheet does not match the expected layout: {0}")]
    Schema(String),

    /// No layout mode in the detection order accepted the sheet
    #[error("Sheet layout not recognized: {0}")]
    LayoutNotRecognized(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] evograph_core::Error),
}
