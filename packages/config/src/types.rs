//! Configuration types for fscpy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};

use fscpy_copy::{CopyOptions, DEFAULT_BUFFER_SIZE, default_max_jobs};

const fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

const fn default_true() -> bool {
    true
}

/// User settings for fscpy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Maximum concurrent file copies. Defaults to four per CPU.
    #[serde(default)]
    pub max_jobs: Option<usize>,

    /// Chunk size in bytes for streaming file contents.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Abort a tree copy on the first failed file.
    #[serde(default = "default_true")]
    pub fail_fast: bool,

    /// Show a progress bar while pasting.
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_jobs: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            fail_fast: true,
            progress: true,
        }
    }
}

impl Settings {
    /// Options for the copy engine.
    #[must_use]
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            max_jobs: self.max_jobs.unwrap_or_else(default_max_jobs),
            buffer_size: self.buffer_size,
            fail_fast: self.fail_fast,
        }
    }
}
