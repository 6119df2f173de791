//! Execution of a parsed action against a clipboard store.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fscpy_copy::{CopyOptions, CopyProgress, CopySummary, copy_tree};
use fscpy_store::PathStore;

use crate::args::Action;

/// What an action did.
#[derive(Debug)]
pub enum Outcome {
    /// A source path was remembered.
    Remembered(PathBuf),
    /// A copy ran to completion.
    Pasted {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Copy totals.
        summary: CopySummary,
        /// Wall time of the copy.
        elapsed: Duration,
    },
    /// A paste was requested with nothing remembered.
    NothingToPaste,
    /// The remembered path was looked up.
    Shown(Option<PathBuf>),
    /// The remembered path was cleared.
    Forgotten,
    /// Nothing was requested.
    Idle,
}

/// Make `path` absolute against `cwd`.
fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn paste<F>(
    from: PathBuf,
    to: PathBuf,
    options: &CopyOptions,
    on_progress: F,
) -> Result<Outcome, Box<dyn Error>>
where
    F: Fn(&CopyProgress) + Sync,
{
    let start = Instant::now();
    let summary = copy_tree(&to, &from, options, on_progress)?;
    let elapsed = start.elapsed();
    log::info!("Done in {elapsed:?}");

    Ok(Outcome::Pasted {
        from,
        to,
        summary,
        elapsed,
    })
}

/// Run `action`.
///
/// Relative paths are resolved against `cwd` so a remembered path stays
/// valid from any later working directory.
///
/// # Errors
///
/// * If the store cannot be read or written
/// * If the copy fails
pub fn execute<F>(
    action: Action,
    cwd: &Path,
    store: &dyn PathStore,
    options: &CopyOptions,
    on_progress: F,
) -> Result<Outcome, Box<dyn Error>>
where
    F: Fn(&CopyProgress) + Sync,
{
    match action {
        Action::Remember(from) => {
            let from = absolutize(cwd, from);
            store.remember(&from)?;
            Ok(Outcome::Remembered(from))
        }
        Action::Paste(to) => {
            let Some(from) = store.recall()? else {
                log::debug!("Nothing remembered, nothing to paste");
                return Ok(Outcome::NothingToPaste);
            };
            paste(from, absolutize(cwd, to), options, on_progress)
        }
        Action::Direct { from, to } => paste(
            absolutize(cwd, from),
            absolutize(cwd, to),
            options,
            on_progress,
        ),
        Action::Show => Ok(Outcome::Shown(store.recall()?)),
        Action::Forget => {
            store.forget()?;
            Ok(Outcome::Forgotten)
        }
        Action::Idle => Ok(Outcome::Idle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fscpy_store::MemoryStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copy_then_paste() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photos");
        let target = dir.path().join("backup");
        fs::create_dir_all(source.join("2024")).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(source.join("2024/beach.jpg"), "jpeg").unwrap();
        let store = MemoryStore::new();
        let options = CopyOptions::default();

        let outcome = execute(
            Action::Remember(PathBuf::from("photos")),
            dir.path(),
            &store,
            &options,
            |_| {},
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Remembered(ref p) if p == &source));

        let outcome = execute(
            Action::Paste(PathBuf::from("backup")),
            dir.path(),
            &store,
            &options,
            |_| {},
        )
        .unwrap();

        match outcome {
            Outcome::Pasted { summary, .. } => assert_eq!(summary.files_copied, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            fs::read_to_string(target.join("photos/2024/beach.jpg")).unwrap(),
            "jpeg"
        );
    }

    #[test]
    fn test_paste_with_nothing_remembered() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();

        let outcome = execute(
            Action::Paste(dir.path().to_path_buf()),
            dir.path(),
            &store,
            &CopyOptions::default(),
            |_| {},
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::NothingToPaste));
    }

    #[test]
    fn test_direct_copy_skips_store() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("note.txt"), "n").unwrap();
        let store = MemoryStore::new();

        execute(
            Action::Direct {
                from: PathBuf::from("note.txt"),
                to: PathBuf::from("note_copy.txt"),
            },
            dir.path(),
            &store,
            &CopyOptions::default(),
            |_| {},
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("note_copy.txt")).unwrap(),
            "n"
        );
        assert_eq!(store.recall().unwrap(), None);
    }

    #[test]
    fn test_show_and_forget() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        store.remember(Path::new("/srv/share")).unwrap();
        let options = CopyOptions::default();

        let shown = execute(Action::Show, dir.path(), &store, &options, |_| {}).unwrap();
        assert!(matches!(shown, Outcome::Shown(Some(ref p)) if p == Path::new("/srv/share")));

        execute(Action::Forget, dir.path(), &store, &options, |_| {}).unwrap();
        assert_eq!(store.recall().unwrap(), None);
    }
}
