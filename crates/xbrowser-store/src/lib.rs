//! Key-value persistence for xbrowser.
//!
//! The shell only ever reads or replaces whole values (the bookmark list
//! is stored as one JSON document), so the abstraction is a flat map from
//! string keys to string values.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use xbrowser_types::error::{Result, ShellError};

/// Abstraction over a flat string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Check whether `key` holds a value.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Reject keys that cannot be stored portably (empty, path separators,
/// or leading dots that would escape or hide files in a [`FileStore`]).
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ShellError::Store(format!("invalid key: {key:?}")))
    }
}
