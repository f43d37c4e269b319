//! File-backed key-value store: one `<key>.json` file per key under a
//! root directory.
//!
//! Writes go to a temporary sibling first and are renamed into place, so
//! a crash mid-write never leaves a truncated value behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use xbrowser_types::error::Result;

use crate::{KeyValueStore, check_key};

/// Key-value store persisted as files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        log::debug!("file store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let target = self.path_for(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
