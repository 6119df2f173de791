//! Error types for the clipboard store.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while remembering or recalling a path.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No per-user data directory on this platform.
    #[error("Could not determine a data directory for the clipboard")]
    NoDataDir,

    /// Failed to read the clipboard file.
    #[error("Failed to read clipboard {}: {source}", path.display())]
    ReadError {
        /// Path to the clipboard file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the clipboard file.
    #[error("Failed to write clipboard {}: {source}", path.display())]
    WriteError {
        /// Path to the clipboard file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The clipboard file is not valid TOML.
    #[error("Failed to parse clipboard {}: {source}", path.display())]
    ParseError {
        /// Path to the clipboard file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The clipboard contents could not be serialized.
    #[error("Failed to serialize clipboard: {0}")]
    SerializeError(#[from] toml::ser::Error),
}
