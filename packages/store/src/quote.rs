//! Quote handling for paths handed over by a shell.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Strip surrounding double quotes from a path argument.
///
/// Context-menu handlers pass paths as `"\"%1\""`, so the argument can arrive
/// wrapped in one or more quote characters on either side.
#[must_use]
pub fn strip_quotes(value: &str) -> &str {
    value.trim_start_matches('"').trim_end_matches('"')
}
