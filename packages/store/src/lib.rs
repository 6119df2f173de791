//! Persisted clipboard for fscpy.
//!
//! A copy invocation remembers a source path; a later paste invocation
//! recalls it. The path lives in a small TOML file under the per-user data
//! directory, namespaced as `fscpy/clipboard.toml`.
//!
//! # Example
//!
//! ```rust,ignore
//! use fscpy_store::{FileStore, PathStore};
//!
//! let store = FileStore::open_default()?;
//! store.remember(Path::new("/home/me/photos"))?;
//! assert_eq!(store.recall()?, Some(PathBuf::from("/home/me/photos")));
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod quote;
mod store;

pub use error::StoreError;
pub use quote::strip_quotes;
pub use store::{CLIPBOARD_FILE, FileStore, MemoryStore, NAMESPACE, PathStore};
