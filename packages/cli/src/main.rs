//! fscpy CLI entry point.
//!
//! Copy a file or directory in one invocation and paste it in another.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod commands;
mod output;
mod progress;

use std::env;

use clap::Parser;

use args::{Action, Args};
use commands::{Outcome, execute};
use fscpy_config::resolve_settings;
use fscpy_copy::CopyError;
use fscpy_store::FileStore;
use progress::PasteProgress;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        if let Some(CopyError::Partial { failures, .. }) = e.downcast_ref::<CopyError>() {
            for failure in failures {
                output::print_error(&failure.to_string());
            }
        }
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let action = args.action();
    if action == Action::Idle {
        output::print_warning("Nothing to do. Pass --copy, --paste, --show or --forget.");
        return Ok(());
    }

    let settings = resolve_settings(args.config.as_deref())?;
    let mut options = settings.copy_options();
    if let Some(jobs) = args.jobs {
        options.max_jobs = jobs.get();
    }
    if args.keep_going {
        options.fail_fast = false;
    }
    log::debug!("Copy options: {options:?}");

    let store = FileStore::open_default()?;
    let cwd = env::current_dir()?;

    let progress = PasteProgress::new(args.should_show_progress() && settings.progress);
    let result = execute(action, &cwd, &store, &options, |p| progress.update(p));
    progress.finish();

    match result? {
        Outcome::Remembered(path) => output::print_remembered(&path),
        Outcome::Pasted {
            from,
            to,
            summary,
            elapsed,
        } => output::print_summary(&from, &to, &summary, elapsed),
        Outcome::NothingToPaste => output::print_warning("Nothing has been copied yet."),
        Outcome::Shown(path) => output::print_clipboard(path.as_deref()),
        Outcome::Forgotten => output::print_forgotten(),
        Outcome::Idle => {}
    }

    Ok(())
}
