//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use fscpy_store::strip_quotes;

/// CLI arguments for fscpy.
#[derive(Debug, Parser)]
#[command(
    name = "fscpy",
    about = "Copy a file or directory now, paste it somewhere else later",
    version
)]
pub struct Args {
    /// Remember this path for a later paste (copies directly when combined with --paste).
    #[arg(long, value_name = "PATH")]
    pub copy: Option<String>,

    /// Paste the remembered path into this location.
    #[arg(long, value_name = "PATH")]
    pub paste: Option<String>,

    /// Print the remembered path and exit.
    #[arg(long, conflicts_with_all = ["copy", "paste", "forget"])]
    pub show: bool,

    /// Forget the remembered path.
    #[arg(long, conflicts_with_all = ["copy", "paste"])]
    pub forget: bool,

    /// Maximum concurrent file copies (overrides config).
    #[arg(long, short = 'j')]
    pub jobs: Option<NonZeroUsize>,

    /// Keep copying other files after one fails.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Settings file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remember a source for a later paste.
    Remember(PathBuf),
    /// Paste the remembered source into a destination.
    Paste(PathBuf),
    /// Copy straight from a source to a destination.
    Direct {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
    },
    /// Print the remembered path.
    Show,
    /// Clear the remembered path.
    Forget,
    /// No action requested.
    Idle,
}

impl Args {
    /// Decide the action from the flags, unquoting path arguments.
    #[must_use]
    pub fn action(&self) -> Action {
        let unquote = |s: &String| PathBuf::from(strip_quotes(s));

        match (self.copy.as_ref(), self.paste.as_ref()) {
            (Some(from), Some(to)) => Action::Direct {
                from: unquote(from),
                to: unquote(to),
            },
            (Some(from), None) => Action::Remember(unquote(from)),
            (None, Some(to)) => Action::Paste(unquote(to)),
            (None, None) if self.show => Action::Show,
            (None, None) if self.forget => Action::Forget,
            (None, None) => Action::Idle,
        }
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fscpy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_copy_only_remembers() {
        let args = parse(&["--copy", "\"/home/me/photos\""]);

        assert_eq!(
            args.action(),
            Action::Remember(PathBuf::from("/home/me/photos"))
        );
    }

    #[test]
    fn test_paste_only() {
        let args = parse(&["--paste=/mnt/backup"]);

        assert_eq!(args.action(), Action::Paste(PathBuf::from("/mnt/backup")));
    }

    #[test]
    fn test_copy_and_paste_is_direct() {
        let args = parse(&["--copy", "/a", "--paste", "/b", "-v"]);

        assert_eq!(
            args.action(),
            Action::Direct {
                from: PathBuf::from("/a"),
                to: PathBuf::from("/b"),
            }
        );
        assert!(args.verbose);
    }

    #[test]
    fn test_no_flags_is_idle() {
        assert_eq!(parse(&[]).action(), Action::Idle);
    }

    #[test]
    fn test_show_conflicts_with_copy() {
        let result = Args::try_parse_from(["fscpy", "--show", "--copy", "/a"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let result = Args::try_parse_from(["fscpy", "--jobs", "0", "--paste", "/b"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_tuning_flags() {
        let args = parse(&["--paste", "/b", "-j", "6", "--keep-going", "--no-progress"]);

        assert_eq!(args.jobs.map(NonZeroUsize::get), Some(6));
        assert!(args.keep_going);
        assert!(!args.should_show_progress());
    }
}
