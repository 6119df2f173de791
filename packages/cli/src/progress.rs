//! Progress bar for paste operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use fscpy_copy::CopyProgress;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a tree copy.
///
/// The total is unknown until the walk finishes, so the bar length follows
/// the first report it receives.
pub struct PasteProgress {
    bar: ProgressBar,
}

impl PasteProgress {
    /// Create a progress bar, hidden when `enabled` is false.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(0);
        match ProgressStyle::default_bar()
            .template("  {prefix:<10} [{bar:25.green/dim}] {pos}/{len} files {msg}")
        {
            Ok(style) => bar.set_style(style.progress_chars("━━─")),
            Err(e) => log::debug!("Falling back to default progress style: {e}"),
        }
        bar.set_prefix("Pasting");
        Self { bar }
    }

    /// Apply a progress report from the copy engine.
    pub fn update(&self, progress: &CopyProgress) {
        self.bar.set_length(progress.files_total);
        self.bar.set_position(progress.files_done);
        self.bar.set_message(format_bytes(progress.bytes_copied));
    }

    /// Clear the bar (for clean output after completion).
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Render a byte count with a binary unit.
#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
