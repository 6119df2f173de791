//! Concurrent execution of queued file jobs under a ceiling.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::counter::{JobCounter, default_max_jobs};
use crate::error::CopyError;
use crate::file::{DEFAULT_BUFFER_SIZE, JobOutcome, copy_file};
use crate::progress::{CopyProgress, ProgressTracker};
use crate::walk::CopyJob;

/// Tuning for a copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Maximum number of file jobs in flight at once.
    pub max_jobs: usize,
    /// Chunk size for streaming file contents.
    pub buffer_size: usize,
    /// Stop launching jobs after the first failure.
    pub fail_fast: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            max_jobs: default_max_jobs(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            fail_fast: true,
        }
    }
}

/// What the dispatcher observed once every launched job returned.
#[derive(Debug)]
pub struct DispatchReport {
    /// Job failures in completion order.
    pub failures: Vec<CopyError>,
    /// Highest number of jobs in flight at once.
    pub peak_in_flight: usize,
    /// Jobs never launched because an earlier one failed.
    pub not_launched: usize,
}

/// Runs [`CopyJob`]s concurrently, at most `max_jobs` at a time.
#[derive(Debug)]
pub struct Dispatcher {
    options: CopyOptions,
    counter: JobCounter,
}

impl Dispatcher {
    /// Create a dispatcher for the given options.
    #[must_use]
    pub fn new(options: CopyOptions) -> Self {
        let counter = JobCounter::new(options.max_jobs);
        Self { options, counter }
    }

    /// The job counter backing the ceiling.
    #[must_use]
    pub const fn counter(&self) -> &JobCounter {
        &self.counter
    }

    /// Launch every job in queue order and return once all have finished.
    ///
    /// The calling thread runs the launch loop. It blocks while the ceiling
    /// is reached and again at the end until the job counter drains to zero.
    ///
    /// # Errors
    ///
    /// * If the worker pool cannot be built
    pub fn run<F>(
        &self,
        jobs: Vec<CopyJob>,
        tracker: &ProgressTracker,
        on_progress: F,
    ) -> Result<DispatchReport, CopyError>
    where
        F: Fn(&CopyProgress) + Sync,
    {
        let total = jobs.len();
        let failures = Mutex::new(Vec::new());
        let aborted = AtomicBool::new(false);
        let buffer_size = self.options.buffer_size;
        let fail_fast = self.options.fail_fast;

        let launched = self.launch(jobs, &aborted, |job: CopyJob| {
            if fail_fast && aborted.load(Ordering::SeqCst) {
                return;
            }

            match copy_file(&job.target, &job.source, buffer_size) {
                Ok(JobOutcome::Copied { bytes }) => tracker.record_copied(bytes),
                Ok(JobOutcome::SameFile | JobOutcome::SourceMissing) => {
                    tracker.record_skipped();
                }
                Err(e) => {
                    log::error!("{e}");
                    aborted.store(true, Ordering::SeqCst);
                    failures
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(e);
                    return;
                }
            }

            on_progress(&tracker.snapshot(Some(job.source.to_string_lossy().to_string())));
        })?;

        Ok(DispatchReport {
            failures: failures.into_inner().unwrap_or_else(PoisonError::into_inner),
            peak_in_flight: self.counter.peak(),
            not_launched: total - launched,
        })
    }

    /// Run `work` once per item on the pool, holding a counter slot for each.
    ///
    /// With `fail_fast`, launching stops once `aborted` is set. Returns the
    /// number of items launched, after every one of them has returned.
    fn launch<T, W>(&self, items: Vec<T>, aborted: &AtomicBool, work: W) -> Result<usize, CopyError>
    where
        T: Send,
        W: Fn(T) + Sync,
    {
        log::debug!(
            "Dispatching {} jobs with ceiling {}",
            items.len(),
            self.counter.max_jobs()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.counter.max_jobs().min(items.len().max(1)))
            .thread_name(|i| format!("fscpy-copy-{i}"))
            .build()
            .map_err(|e| CopyError::WorkerPoolError {
                message: e.to_string(),
            })?;

        let fail_fast = self.options.fail_fast;
        let work_ref = &work;
        let mut launched = 0usize;

        pool.in_place_scope(|scope| {
            for item in items {
                if fail_fast && aborted.load(Ordering::SeqCst) {
                    log::debug!("Earlier job failed, not launching more");
                    break;
                }

                let slot = self.counter.acquire();
                launched += 1;

                scope.spawn(move |_| {
                    let _slot = slot;
                    work_ref(item);
                });
            }
        });

        // The scope has joined every spawned job.
        self.counter.wait_drained();

        Ok(launched)
    }
}
