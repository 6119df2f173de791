//! In-flight job accounting with a concurrency ceiling.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};

/// Default ceiling: four jobs per logical CPU.
#[must_use]
pub fn default_max_jobs() -> usize {
    num_cpus::get().max(1) * 4
}

/// Counts copy jobs that have been launched but not yet returned.
///
/// The count only changes through [`JobCounter::acquire`] (increment) and
/// dropping the returned [`JobSlot`] (decrement), so it always equals the
/// number of live slots.
#[derive(Debug)]
pub struct JobCounter {
    max_jobs: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    lock: Mutex<()>,
    changed: Condvar,
}

impl JobCounter {
    /// Create a counter admitting at most `max_jobs` concurrent jobs.
    #[must_use]
    pub fn new(max_jobs: usize) -> Self {
        Self {
            max_jobs: max_jobs.max(1),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            lock: Mutex::new(()),
            changed: Condvar::new(),
        }
    }

    /// The ceiling.
    #[must_use]
    pub const fn max_jobs(&self) -> usize {
        self.max_jobs
    }

    /// Current number of live slots.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of live slots seen so far.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Block until a slot is free under the ceiling, then take it.
    pub fn acquire(&self) -> JobSlot<'_> {
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        while self.in_flight.load(Ordering::SeqCst) >= self.max_jobs {
            log::trace!("Job ceiling {} reached, waiting", self.max_jobs);
            guard = self
                .changed
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        drop(guard);

        JobSlot { counter: self }
    }

    /// Block until no slot is live.
    pub fn wait_drained(&self) {
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        while self.in_flight.load(Ordering::SeqCst) > 0 {
            guard = self
                .changed
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn release(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        // Waiters check the count while holding the lock, so notifying under
        // it cannot slip between their check and their wait.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.changed.notify_all();
    }
}

/// A live job. Dropping it releases the slot exactly once.
#[derive(Debug)]
#[must_use = "dropping a slot immediately releases it"]
pub struct JobSlot<'a> {
    counter: &'a JobCounter,
}

impl Drop for JobSlot<'_> {
    fn drop(&mut self) {
        self.counter.release();
    }
}
