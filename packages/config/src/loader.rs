//! TOML settings file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::Settings;

/// Settings file name inside the config namespace directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default settings location, `<config_dir>/fscpy/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fscpy").join(CONFIG_FILE))
}

/// Load a TOML settings file.
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML
/// * If a value is out of range
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    log::debug!("Loading settings from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if settings.buffer_size == 0 {
        return Err(ConfigError::InvalidValue {
            path: path.to_path_buf(),
            key: "bufferSize",
            message: "must be greater than zero".to_string(),
        });
    }

    if settings.max_jobs == Some(0) {
        return Err(ConfigError::InvalidValue {
            path: path.to_path_buf(),
            key: "maxJobs",
            message: "must be greater than zero".to_string(),
        });
    }

    log::debug!("Loaded settings: {settings:?}");

    Ok(settings)
}

/// Load settings from an explicit path, or from the default location.
///
/// An explicit path must exist. A missing file at the default location
/// yields [`Settings::default`].
///
/// # Errors
///
/// * If the chosen file exists but cannot be loaded
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        return load_settings(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_settings(&path),
        _ => {
            log::debug!("No settings file, using defaults");
            Ok(Settings::default())
        }
    }
}
