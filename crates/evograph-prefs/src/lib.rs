//! # evograph-prefs
//!
//! The persisted preference document, reserved-character key sanitization,
//! and the [`PreferenceStore`] boundary with JSON-file and in-memory
//! implementations.

mod document;
mod error;
mod sanitize;
mod store;

pub use document::{remember_policy, Preferences};
pub use error::{StoreError, StoreResult};
pub use sanitize::{sanitize_key, sanitize_keys};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
