//! In-memory key-value store.
//!
//! Useful for unit tests and private sessions that must not touch disk.

use std::collections::BTreeMap;

use xbrowser_types::error::Result;

use crate::{KeyValueStore, check_key};

/// A fully in-memory key-value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
