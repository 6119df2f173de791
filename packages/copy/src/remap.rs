//! Source-to-destination path translation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::CopyError;

/// Map `path`, found while walking under `from`, to its image under `to`.
///
/// * If `to` is not an existing directory it is an explicit target name and
///   is returned unchanged.
/// * Remapping the root itself (`path == from`) keeps the root's own name, so
///   `/a/b` remapped into `/c` is `/c/b`.
/// * Any other path keeps its position relative to `from`: `/a/b/x/y` under
///   `/c/b` is `/c/b/x/y`.
///
/// # Errors
///
/// * If `path` is not located under the base being stripped
pub fn remap(to: &Path, from: &Path, path: &Path) -> Result<PathBuf, CopyError> {
    if !to.is_dir() {
        return Ok(to.to_path_buf());
    }

    let base = if path == from {
        from.parent().unwrap_or(from)
    } else {
        from
    };

    let suffix = path
        .strip_prefix(base)
        .map_err(|_| CopyError::OutsideSource {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        })?;

    if suffix.as_os_str().is_empty() {
        return Ok(to.to_path_buf());
    }

    // `join` only inserts a separator when `to` does not already end in one.
    Ok(to.join(suffix))
}
