//! Storage backends for the remembered path.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::quote::strip_quotes;

/// Namespace directory under the platform data directory.
pub const NAMESPACE: &str = "fscpy";

/// File holding the remembered path.
pub const CLIPBOARD_FILE: &str = "clipboard.toml";

/// Value older installs wrote to mean "nothing remembered".
const EMPTY_SENTINEL: &str = "nil";

/// Remembers one source path between a copy and a later paste.
pub trait PathStore {
    /// Remember `path`, replacing anything remembered before.
    ///
    /// # Errors
    ///
    /// * If the backend cannot be written
    fn remember(&self, path: &Path) -> Result<(), StoreError>;

    /// The remembered path, or `None` if nothing is remembered.
    ///
    /// # Errors
    ///
    /// * If the backend exists but cannot be read
    fn recall(&self) -> Result<Option<PathBuf>, StoreError>;

    /// Forget the remembered path.
    ///
    /// # Errors
    ///
    /// * If the backend cannot be written
    fn forget(&self) -> Result<(), StoreError>;
}

/// On-disk clipboard contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Clipboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

/// Normalize a stored value, mapping every "nothing" form to `None`.
fn normalize(value: Option<&str>) -> Option<PathBuf> {
    let value = strip_quotes(value?.trim());
    if value.is_empty() || value == EMPTY_SENTINEL {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// A TOML file in the per-user data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the default location, `<data_local_dir>/fscpy/clipboard.toml`.
    ///
    /// # Errors
    ///
    /// * If the platform has no data directory
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::at(dir.join(NAMESPACE).join(CLIPBOARD_FILE)))
    }

    /// Store backed by the given file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, clipboard: &Clipboard) -> Result<(), StoreError> {
        let content = toml::to_string(clipboard)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(&self.path, content).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl PathStore for FileStore {
    fn remember(&self, path: &Path) -> Result<(), StoreError> {
        let value = strip_quotes(&path.to_string_lossy()).to_string();
        log::debug!("Remembering {value} in {}", self.path.display());
        self.write(&Clipboard { path: Some(value) })
    }

    fn recall(&self) -> Result<Option<PathBuf>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No clipboard at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let clipboard: Clipboard =
            toml::from_str(&content).map_err(|e| StoreError::ParseError {
                path: self.path.clone(),
                source: e,
            })?;

        let recalled = normalize(clipboard.path.as_deref());
        log::debug!("Recalled {recalled:?} from {}", self.path.display());
        Ok(recalled)
    }

    fn forget(&self) -> Result<(), StoreError> {
        log::debug!("Clearing clipboard at {}", self.path.display());
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PathStore for MemoryStore {
    fn remember(&self, path: &Path) -> Result<(), StoreError> {
        let value = strip_quotes(&path.to_string_lossy()).to_string();
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        Ok(())
    }

    fn recall(&self) -> Result<Option<PathBuf>, StoreError> {
        let value = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(normalize(value.as_deref()))
    }

    fn forget(&self) -> Result<(), StoreError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
