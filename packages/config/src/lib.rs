//! Configuration loading for fscpy.
//!
//! Settings live in an optional TOML file, by default
//! `<config_dir>/fscpy/config.toml`. Every key is optional:
//!
//! ```toml
//! maxJobs = 16
//! bufferSize = 128000
//! failFast = true
//! progress = true
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{CONFIG_FILE, default_config_path, load_settings, resolve_settings};
pub use types::Settings;
