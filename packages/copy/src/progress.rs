//! Progress tracking for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicU64, Ordering};

/// Progress information for a copy operation.
#[derive(Debug, Clone)]
pub struct CopyProgress {
    /// Total number of files queued for copying.
    pub files_total: u64,
    /// Number of file jobs finished so far (copied or skipped).
    pub files_done: u64,
    /// Bytes written so far.
    pub bytes_copied: u64,
    /// File whose job just finished (if any).
    pub current_file: Option<String>,
}

impl CopyProgress {
    /// Calculate progress as a percentage (0.0 to 100.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.files_total == 0 {
            100.0
        } else {
            (self.files_done as f64 / self.files_total as f64) * 100.0
        }
    }
}

/// Totals for a finished (or aborted) tree copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Number of file jobs queued by the walk.
    pub files_total: u64,
    /// Files whose contents were written.
    pub files_copied: u64,
    /// Files skipped because source and target were the same or the source vanished.
    pub files_skipped: u64,
    /// Bytes written across all files.
    pub bytes_copied: u64,
    /// Directories created under the destination.
    pub directories_created: u64,
    /// Highest number of jobs observed in flight at once.
    pub peak_in_flight: usize,
}

/// Thread-safe progress tracker using atomics.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    files_total: AtomicU64,
    files_copied: AtomicU64,
    files_skipped: AtomicU64,
    bytes_copied: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of files.
    pub fn set_total(&self, total: u64) {
        self.files_total.store(total, Ordering::SeqCst);
    }

    /// Record a file whose contents were written.
    pub fn record_copied(&self, bytes: u64) {
        self.bytes_copied.fetch_add(bytes, Ordering::SeqCst);
        self.files_copied.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a file job that had nothing to do.
    pub fn record_skipped(&self) {
        self.files_skipped.fetch_add(1, Ordering::SeqCst);
    }

    /// Get the current total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.files_total.load(Ordering::SeqCst)
    }

    /// Get the number of finished file jobs.
    #[must_use]
    pub fn done(&self) -> u64 {
        self.files_copied.load(Ordering::SeqCst) + self.files_skipped.load(Ordering::SeqCst)
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self, current_file: Option<String>) -> CopyProgress {
        CopyProgress {
            files_total: self.total(),
            files_done: self.done(),
            bytes_copied: self.bytes_copied.load(Ordering::SeqCst),
            current_file,
        }
    }

    /// Fold the counters into a summary.
    #[must_use]
    pub fn summary(&self, directories_created: u64, peak_in_flight: usize) -> CopySummary {
        CopySummary {
            files_total: self.total(),
            files_copied: self.files_copied.load(Ordering::SeqCst),
            files_skipped: self.files_skipped.load(Ordering::SeqCst),
            bytes_copied: self.bytes_copied.load(Ordering::SeqCst),
            directories_created,
            peak_in_flight,
        }
    }
}
