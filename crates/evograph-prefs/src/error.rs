//! Preference store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a preference store on save.
///
/// Loading never raises: an empty or unreachable store degrades to the
/// default document with a logged warning.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error while writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization failure
    #[error("Preference document error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to move the written document into place
    #[error("Failed to persist preferences: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Backend-specific failure
    #[error("Preference store failure: {0}")]
    Backend(String),
}
