//! Recursive copy engine for fscpy.
//!
//! This crate copies a single file or a whole directory tree:
//!
//! * Depth-first walk using `jwalk`, creating destination directories inline
//! * File contents streamed in fixed-size chunks
//! * File jobs run on a `rayon` pool with a ceiling on jobs in flight
//! * Returns only after every launched job has finished
//!
//! # Example
//!
//! ```rust,ignore
//! use fscpy_copy::{CopyOptions, CopyProgress, copy_tree};
//!
//! let summary = copy_tree(target, source, &CopyOptions::default(), |progress: &CopyProgress| {
//!     println!("{}/{} files", progress.files_done, progress.files_total);
//! })?;
//! println!("{} bytes copied", summary.bytes_copied);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod counter;
mod dispatch;
mod error;
mod file;
mod progress;
mod remap;
mod walk;

pub use counter::{JobCounter, JobSlot, default_max_jobs};
pub use dispatch::{CopyOptions, DispatchReport, Dispatcher};
pub use error::CopyError;
pub use file::{DEFAULT_BUFFER_SIZE, JobOutcome, copy_file};
pub use progress::{CopyProgress, CopySummary, ProgressTracker};
pub use remap::remap;
pub use walk::{CopyJob, CreatedDir, WalkPlan, prepare_root, restore_dir_permissions, walk_tree};

use std::path::Path;

/// Copy `from` to `to`.
///
/// A file is copied to `to` itself, or into it when `to` is an existing
/// directory. A directory is recreated under `to` (keeping its own name) when
/// `to` is an existing directory, or as `to` otherwise.
///
/// A missing source, or a destination equal to the source, is a no-op.
///
/// # Arguments
///
/// * `to` - Destination path
/// * `from` - Source path
/// * `options` - Ceiling, chunk size and failure policy
/// * `on_progress` - Called after each file job finishes
///
/// # Errors
///
/// * If walking the source or creating a directory fails
/// * If a directory source would land on an existing non-directory
/// * With `fail_fast`, the first failed file job
/// * Without `fail_fast`, [`CopyError::Partial`] listing every failed job
pub fn copy_tree<F>(
    to: &Path,
    from: &Path,
    options: &CopyOptions,
    on_progress: F,
) -> Result<CopySummary, CopyError>
where
    F: Fn(&CopyProgress) + Sync,
{
    log::info!("Copying {} to {}", from.display(), to.display());

    if !from.exists() {
        log::debug!("Source does not exist");
        return Ok(CopySummary::default());
    }

    if to == from {
        log::debug!("Source and destination are the same");
        return Ok(CopySummary::default());
    }

    let tracker = ProgressTracker::new();

    if !from.is_dir() {
        let target = remap(to, from, from)?;
        tracker.set_total(1);
        match copy_file(&target, from, options.buffer_size)? {
            JobOutcome::Copied { bytes } => tracker.record_copied(bytes),
            JobOutcome::SameFile | JobOutcome::SourceMissing => tracker.record_skipped(),
        }
        on_progress(&tracker.snapshot(Some(from.to_string_lossy().to_string())));
        return Ok(tracker.summary(0, 1));
    }

    let (root, created_root) = prepare_root(to, from)?;

    let mut plan = WalkPlan::default();
    plan.created_dirs.extend(created_root);

    let report = walk_tree(&root, from, &mut plan).and_then(|()| {
        tracker.set_total(plan.jobs.len() as u64);
        on_progress(&tracker.snapshot(None));
        let jobs = std::mem::take(&mut plan.jobs);
        Dispatcher::new(options.clone()).run(jobs, &tracker, &on_progress)
    });

    // Created directories get their source bits back whether or not the copy got through.
    let restored = restore_dir_permissions(&plan.created_dirs);
    let report = report?;
    restored?;

    let summary = tracker.summary(plan.created_dirs.len() as u64, report.peak_in_flight);
    log::info!(
        "Copied {} files ({} bytes), skipped {}, created {} directories",
        summary.files_copied,
        summary.bytes_copied,
        summary.files_skipped,
        summary.directories_created
    );

    let mut failures = report.failures;
    if failures.is_empty() {
        Ok(summary)
    } else if options.fail_fast {
        Err(failures.swap_remove(0))
    } else {
        Err(CopyError::Partial { summary, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copy_tree_into_existing_dir() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let target = dir.path().join("dst");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(source.join("a.txt"), "hello").unwrap();
        fs::write(source.join("sub/b.txt"), "").unwrap();

        let summary = copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(fs::read(target.join("src/a.txt")).unwrap(), b"hello");
        assert!(target.join("src/sub").is_dir());
        assert_eq!(fs::metadata(target.join("src/sub/b.txt")).unwrap().len(), 0);
        assert_eq!(summary.files_total, 2);
        assert_eq!(summary.files_copied, 2);
        assert_eq!(summary.bytes_copied, 5);
        assert_eq!(summary.directories_created, 2);
    }

    #[test]
    fn test_copy_single_file_to_new_name() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("note.txt");
        let backup = dir.path().join("backup");
        let target = backup.join("note_copy.txt");
        fs::create_dir(&backup).unwrap();
        fs::write(&source, "remember me").unwrap();

        let summary = copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(summary.files_copied, 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), "remember me");
        assert_eq!(fs::read_to_string(&source).unwrap(), "remember me");
        assert_eq!(fs::read_dir(&backup).unwrap().count(), 1);
    }

    #[test]
    fn test_copy_single_file_into_existing_dir() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("note.txt");
        let target = dir.path().join("backup");
        fs::create_dir(&target).unwrap();
        fs::write(&source, "x").unwrap();

        copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(fs::read_to_string(target.join("note.txt")).unwrap(), "x");
    }

    #[test]
    fn test_copy_dir_root_rule() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a/b");
        let target = dir.path().join("c");
        fs::create_dir_all(source.join("x")).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(source.join("x/y.txt"), "y").unwrap();

        copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(fs::read_to_string(target.join("b/x/y.txt")).unwrap(), "y");
        assert!(!target.join("x").exists());
    }

    #[test]
    fn test_copy_dir_to_new_name() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("project");
        let target = dir.path().join("project-copy");
        fs::create_dir_all(source.join("docs")).unwrap();
        fs::write(source.join("docs/readme.md"), "# hi").unwrap();

        copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(
            fs::read_to_string(target.join("docs/readme.md")).unwrap(),
            "# hi"
        );
    }

    #[test]
    fn test_self_copy_is_noop() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("same.txt");
        fs::write(&source, "stay").unwrap();

        let summary = copy_tree(&source, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(summary, CopySummary::default());
        assert_eq!(fs::read_to_string(&source).unwrap(), "stay");
    }

    #[test]
    fn test_copy_dir_into_own_parent_is_noop() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("tree");
        fs::create_dir_all(source.join("inner")).unwrap();
        fs::write(source.join("inner/f.txt"), "same").unwrap();

        let summary = copy_tree(dir.path(), &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(summary.files_copied, 0);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(
            fs::read_to_string(source.join("inner/f.txt")).unwrap(),
            "same"
        );
    }

    #[test]
    fn test_missing_source_is_noop() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("gone");
        let target = dir.path().join("dst");

        let summary = copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        assert_eq!(summary, CopySummary::default());
        assert!(!target.exists());
    }

    #[test]
    fn test_bounded_concurrency_and_drain() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("wide");
        let target = dir.path().join("out");
        for d in 0..5 {
            let sub = source.join(format!("d{d}"));
            fs::create_dir_all(&sub).unwrap();
            for f in 0..20 {
                fs::write(sub.join(format!("f{f}.bin")), vec![d as u8; f * 100]).unwrap();
            }
        }
        fs::create_dir_all(&target).unwrap();

        let options = CopyOptions {
            max_jobs: 4,
            buffer_size: 64,
            fail_fast: true,
        };
        let summary = copy_tree(&target, &source, &options, |_| {}).unwrap();

        assert_eq!(summary.files_copied, 100);
        assert!(summary.peak_in_flight <= 4);
        for d in 0..5 {
            for f in 0..20 {
                let path = target.join(format!("wide/d{d}/f{f}.bin"));
                assert_eq!(fs::metadata(&path).unwrap().len(), (f * 100) as u64);
            }
        }
    }

    #[test]
    fn test_keep_going_returns_partial() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let target = dir.path().join("dst");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(target.join("src/blocked.txt")).unwrap();
        fs::write(source.join("blocked.txt"), "cannot land").unwrap();
        fs::write(source.join("ok.txt"), "fine").unwrap();

        let options = CopyOptions {
            fail_fast: false,
            ..CopyOptions::default()
        };
        let err = copy_tree(&target, &source, &options, |_| {}).unwrap_err();

        match err {
            CopyError::Partial { summary, failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(summary.files_copied, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_to_string(target.join("src/ok.txt")).unwrap(), "fine");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_modes_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("locked")).unwrap();
        fs::create_dir_all(source.join("shared")).unwrap();
        fs::write(source.join("locked/secret.txt"), "s").unwrap();
        fs::set_permissions(source.join("shared"), fs::Permissions::from_mode(0o750)).unwrap();
        fs::set_permissions(source.join("locked"), fs::Permissions::from_mode(0o500)).unwrap();
        let target = dir.path().join("dst");

        copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&target.join("shared")), 0o750);
        assert_eq!(mode(&target.join("locked")), 0o500);
        assert_eq!(
            fs::read_to_string(target.join("locked/secret.txt")).unwrap(),
            "s"
        );

        // Let the temp dir clean up.
        fs::set_permissions(source.join("locked"), fs::Permissions::from_mode(0o700)).unwrap();
        fs::set_permissions(target.join("locked"), fs::Permissions::from_mode(0o700)).unwrap();
    }

    #[test]
    fn test_copy_dir_onto_existing_file_keeps_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let target = dir.path().join("notes.txt");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.txt"), "a").unwrap();
        fs::write(&target, "precious").unwrap();

        let err = copy_tree(&target, &source, &CopyOptions::default(), |_| {}).unwrap_err();

        assert!(matches!(err, CopyError::TargetNotADirectory { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "precious");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_modes_restored_after_walk_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("a_shared")).unwrap();
        fs::create_dir_all(source.join("b_locked")).unwrap();
        fs::set_permissions(source.join("a_shared"), fs::Permissions::from_mode(0o750)).unwrap();
        fs::set_permissions(source.join("b_locked"), fs::Permissions::from_mode(0o000)).unwrap();
        let target = dir.path().join("dst");

        // Privileged users can list the directory anyway.
        if fs::read_dir(source.join("b_locked")).is_ok() {
            fs::set_permissions(source.join("b_locked"), fs::Permissions::from_mode(0o700))
                .unwrap();
            return;
        }

        let result = copy_tree(&target, &source, &CopyOptions::default(), |_| {});

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        let locked_mode = mode(&target.join("b_locked"));
        let shared_mode = mode(&target.join("a_shared"));

        // Let the temp dir clean up.
        fs::set_permissions(source.join("b_locked"), fs::Permissions::from_mode(0o700)).unwrap();
        fs::set_permissions(target.join("b_locked"), fs::Permissions::from_mode(0o700)).unwrap();

        assert!(matches!(result, Err(CopyError::EnumerationError { .. })));
        assert_eq!(locked_mode, 0o000);
        assert_eq!(shared_mode, 0o750);
    }
}
