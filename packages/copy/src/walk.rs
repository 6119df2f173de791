//! Depth-first source walk that mirrors directories and queues file jobs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, Permissions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CopyError;
use crate::remap::remap;

/// One file to copy. Built by the walk, consumed by exactly one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    /// Destination file path.
    pub target: PathBuf,
    /// Source file path.
    pub source: PathBuf,
}

/// A directory the walk created, with the bits it must end up with.
#[derive(Debug, Clone)]
pub struct CreatedDir {
    /// Destination directory path.
    pub path: PathBuf,
    /// Permissions copied from the source directory.
    pub permissions: Permissions,
}

/// Everything a walk produced.
#[derive(Debug, Default)]
pub struct WalkPlan {
    /// File jobs in traversal order.
    pub jobs: Vec<CopyJob>,
    /// Directories created during the walk, parents before children.
    pub created_dirs: Vec<CreatedDir>,
}

/// Resolve where the source root lands and make sure that directory exists.
///
/// Returns the root image and, if it had to be created, its record.
///
/// # Errors
///
/// * If the source metadata cannot be read
/// * If the destination lies inside the source
/// * If the root image exists but is not a directory
/// * If the root image cannot be created
pub fn prepare_root(to: &Path, from: &Path) -> Result<(PathBuf, Option<CreatedDir>), CopyError> {
    let root = remap(to, from, from)?;

    if root != from && is_within(&root, from) {
        return Err(CopyError::DestinationInsideSource {
            source_path: from.to_path_buf(),
            target_path: root,
        });
    }

    if root.exists() && !root.is_dir() {
        return Err(CopyError::TargetNotADirectory {
            source_path: from.to_path_buf(),
            target_path: root,
        });
    }

    let permissions = fs::metadata(from)
        .map_err(|e| CopyError::MetadataError {
            path: from.to_path_buf(),
            io_error: e,
        })?
        .permissions();

    let created = create_dir(&root, &permissions)?.then(|| CreatedDir {
        path: root.clone(),
        permissions,
    });

    Ok((root, created))
}

/// Walk every descendant of `from`, depth first.
///
/// Directories are created under `root` as they are reached, so a
/// directory always exists before any job targeting a file inside it is
/// queued. Files become [`CopyJob`]s and are not copied here.
///
/// Results are appended to `plan`, which keeps every directory created so
/// far even when the walk stops on an error.
///
/// # Errors
///
/// * If a directory cannot be listed
/// * If a destination directory cannot be created
pub fn walk_tree(root: &Path, from: &Path, plan: &mut WalkPlan) -> Result<(), CopyError> {
    log::debug!("Walking {} into {}", from.display(), root.display());

    for entry in jwalk::WalkDir::new(from)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial)
    {
        let entry = entry.map_err(|e| CopyError::EnumerationError {
            path: e.path().unwrap_or(from).to_path_buf(),
            message: e.to_string(),
        })?;

        let source_path = entry.path();
        if source_path == from {
            continue;
        }

        let target_path = remap(root, from, &source_path)?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let permissions = entry
                .metadata()
                .map_err(|e| CopyError::EnumerationError {
                    path: source_path.clone(),
                    message: e.to_string(),
                })?
                .permissions();
            if create_dir(&target_path, &permissions)? {
                plan.created_dirs.push(CreatedDir {
                    path: target_path,
                    permissions,
                });
            }
            // jwalk reports an unreadable directory on its entry, not as an item.
            if let Some(e) = &entry.read_children_error {
                return Err(CopyError::EnumerationError {
                    path: source_path,
                    message: e.to_string(),
                });
            }
            continue;
        }

        if file_type.is_symlink() && source_path.is_dir() {
            log::warn!(
                "Not following directory symlink {}",
                source_path.display()
            );
            continue;
        }

        plan.jobs.push(CopyJob {
            target: target_path,
            source: source_path,
        });
    }

    log::debug!(
        "Queued {} files, created {} directories",
        plan.jobs.len(),
        plan.created_dirs.len()
    );

    Ok(())
}

/// Reapply source permissions to created directories, deepest first.
///
/// # Errors
///
/// * If permissions cannot be set on any directory
pub fn restore_dir_permissions(created_dirs: &[CreatedDir]) -> Result<(), CopyError> {
    for dir in created_dirs.iter().rev() {
        fs::set_permissions(&dir.path, dir.permissions.clone()).map_err(|e| {
            CopyError::PermissionsError {
                path: dir.path.clone(),
                io_error: e,
            }
        })?;
    }
    Ok(())
}

/// Create `path` with the given bits unless it is already a directory.
fn create_dir(path: &Path, permissions: &Permissions) -> Result<bool, CopyError> {
    if path.is_dir() {
        return Ok(false);
    }
    if path.exists() {
        return Err(CopyError::CreateDirError {
            path: path.to_path_buf(),
            io_error: std::io::Error::new(ErrorKind::AlreadyExists, "not a directory"),
        });
    }

    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        // Owner keeps write access until the bits are restored after the drain.
        builder.mode(permissions.mode() | 0o700);
    }
    #[cfg(not(unix))]
    let _ = permissions;

    builder.create(path).map_err(|e| CopyError::CreateDirError {
        path: path.to_path_buf(),
        io_error: e,
    })?;

    log::trace!("Created directory {}", path.display());
    Ok(true)
}

/// Whether `path` lies under `dir`, comparing canonical forms where possible.
fn is_within(path: &Path, dir: &Path) -> bool {
    let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    let path = fs::canonicalize(path)
        .ok()
        .or_else(|| {
            let parent = fs::canonicalize(path.parent()?).ok()?;
            Some(parent.join(path.file_name()?))
        })
        .unwrap_or_else(|| path.to_path_buf());
    path.starts_with(dir)
}
