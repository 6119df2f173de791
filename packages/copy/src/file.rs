//! Streaming single-file copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::error::CopyError;

/// Reference chunk size for streaming copies.
pub const DEFAULT_BUFFER_SIZE: usize = 128_000;

/// What a single file job did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Contents were streamed to the target.
    Copied {
        /// Number of bytes written.
        bytes: u64,
    },
    /// Source and target are the same path; nothing was done.
    SameFile,
    /// Source did not exist when the job ran; nothing was done.
    SourceMissing,
}

/// Copy the contents of `source` to `target` in `buffer_size` chunks.
///
/// The target is created or truncated; only contents are copied.
///
/// # Arguments
///
/// * `target` - Target file path
/// * `source` - Source file path
/// * `buffer_size` - Chunk size in bytes (clamped to at least 1)
///
/// # Errors
///
/// * If the source cannot be opened for any reason other than not existing
/// * If the target cannot be created
/// * If any read or write fails
pub fn copy_file(target: &Path, source: &Path, buffer_size: usize) -> Result<JobOutcome, CopyError> {
    if target == source {
        log::debug!("Skipping self-copy of {}", source.display());
        return Ok(JobOutcome::SameFile);
    }

    let mut reader = match File::open(source) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Source {} vanished, skipping", source.display());
            return Ok(JobOutcome::SourceMissing);
        }
        Err(e) => {
            return Err(CopyError::OpenSourceError {
                path: source.to_path_buf(),
                io_error: e,
            });
        }
    };

    let mut writer = File::create(target).map_err(|e| CopyError::CreateTargetError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    let stream_error = |e: std::io::Error| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    };

    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut bytes = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(stream_error(e)),
        };
        writer.write_all(&buffer[..read]).map_err(stream_error)?;
        bytes += read as u64;
    }
    writer.flush().map_err(stream_error)?;

    log::debug!(
        "Copied {} -> {} ({bytes} bytes)",
        source.display(),
        target.display()
    );

    Ok(JobOutcome::Copied { bytes })
}
