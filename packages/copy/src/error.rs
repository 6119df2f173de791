//! Error types for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use crate::progress::CopySummary;

/// Errors that can occur during copy operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Failed to open the source file for reading.
    #[error("Failed to open {}: {io_error}", path.display())]
    OpenSourceError {
        /// The source file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create (or truncate) the target file.
    #[error("Failed to create {}: {io_error}", path.display())]
    CreateTargetError {
        /// The target file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed while streaming bytes between two files.
    #[error("Failed to copy {} to {}: {io_error}", source_path.display(), target_path.display())]
    FileCopyError {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create target directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to apply permission bits.
    #[error("Failed to set permissions on {}: {io_error}", path.display())]
    PermissionsError {
        /// The path whose permissions could not be set.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("Failed to enumerate directory {}: {message}", path.display())]
    EnumerationError {
        /// The directory path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A walked path was not located under the base it is remapped against.
    #[error("{} is not located under {}", path.display(), base.display())]
    OutsideSource {
        /// The offending path.
        path: PathBuf,
        /// The base that should prefix it.
        base: PathBuf,
    },

    /// A directory was to be copied onto an existing non-directory.
    #[error("Cannot copy directory {} onto {}: not a directory", source_path.display(), target_path.display())]
    TargetNotADirectory {
        /// Source directory.
        source_path: PathBuf,
        /// Existing non-directory at the destination.
        target_path: PathBuf,
    },

    /// The destination lies inside the source tree.
    #[error("Cannot copy {} into itself ({})", source_path.display(), target_path.display())]
    DestinationInsideSource {
        /// Source directory.
        source_path: PathBuf,
        /// Requested destination.
        target_path: PathBuf,
    },

    /// Failed to build the worker pool.
    #[error("Failed to start copy workers: {message}")]
    WorkerPoolError {
        /// Error message from the pool builder.
        message: String,
    },

    /// Some jobs failed while the rest of the tree was copied.
    #[error("{} of {} files failed to copy", failures.len(), summary.files_total)]
    Partial {
        /// What was copied before and around the failures.
        summary: CopySummary,
        /// Every job failure, in completion order.
        failures: Vec<Self>,
    },
}
