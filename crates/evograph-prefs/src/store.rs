//! Preference stores

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::document::Preferences;
use crate::error::{StoreError, StoreResult};
use crate::sanitize::sanitize_keys;

/// A durable home for one user's [`Preferences`].
///
/// `load` never fails: an empty, missing, or unreachable store degrades to
/// the default document with a logged warning, and the session continues.
/// `save` is the opposite: any failure is surfaced so a save can never
/// silently appear to succeed.
pub trait PreferenceStore {
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> StoreResult<()>;
}

/// JSON document at a filesystem path.
///
/// Writes go through a temp file in the target directory and a rename, so a
/// failed save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Preferences {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no preference document at {}", self.path.display());
                return Preferences::default();
            }
            Err(e) => {
                log::warn!(
                    "preference store unreachable ({}): continuing with defaults",
                    e
                );
                return Preferences::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!(
                    "malformed preference document at {} ({}): continuing with defaults",
                    self.path.display(),
                    e
                );
                Preferences::default()
            }
        }
    }

    fn save(&self, prefs: &Preferences) -> StoreResult<()> {
        let document = sanitize_keys(serde_json::to_value(prefs)?);

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut file = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new_in(".")?,
        };
        serde_json::to_writer_pretty(&mut file, &document)?;
        file.persist(&self.path)?;
        Ok(())
    }
}

/// In-memory store: one isolated document per instance.
///
/// Backs tests and gives each interactive session its own document without
/// touching disk. Saves sanitize exactly like the durable stores so the two
/// are interchangeable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Preferences {
        let guard = self.document.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(prefs) => prefs,
                Err(e) => {
                    log::warn!("malformed in-memory document ({e}): continuing with defaults");
                    Preferences::default()
                }
            },
            None => Preferences::default(),
        }
    }

    fn save(&self, prefs: &Preferences) -> StoreResult<()> {
        let document = sanitize_keys(serde_json::to_value(prefs)?);
        let mut guard = self.document.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(document);
        Ok(())
    }
}
