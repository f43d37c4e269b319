//! Bookmarks persisted wholesale to a [`KeyValueStore`].
//!
//! The whole list is stored as one JSON array under a fixed key. Every
//! change writes the new list first and only then updates memory, so a
//! failed write leaves both sides as they were.

use serde::{Deserialize, Serialize};
use xbrowser_store::KeyValueStore;
use xbrowser_types::error::Result;

/// One saved page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// What [`BookmarkList::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkChange {
    Added,
    Removed,
}

impl BookmarkChange {
    /// Status line text.
    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "Bookmark added",
            Self::Removed => "Bookmark removed",
        }
    }
}

/// Ordered bookmark list backed by a store key.
#[derive(Debug, Clone)]
pub struct BookmarkList {
    key: String,
    items: Vec<Bookmark>,
}

impl BookmarkList {
    /// Read the list stored under `key`. A missing key is an empty list.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Self> {
        let items: Vec<Bookmark> = match store.get(key)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        log::debug!("loaded {} bookmarks from {key}", items.len());
        Ok(Self {
            key: key.to_string(),
            items,
        })
    }

    /// Add `url` if it is not bookmarked, remove it otherwise.
    pub fn toggle(
        &mut self,
        url: &str,
        title: &str,
        store: &mut dyn KeyValueStore,
    ) -> Result<BookmarkChange> {
        if self.contains(url) {
            self.remove(url, store)?;
            Ok(BookmarkChange::Removed)
        } else {
            self.add(
                Bookmark {
                    url: url.to_string(),
                    title: title.to_string(),
                    timestamp: crate::now_millis(),
                },
                store,
            )?;
            Ok(BookmarkChange::Added)
        }
    }

    /// Append `bookmark`. An already bookmarked URL is left as is.
    pub fn add(&mut self, bookmark: Bookmark, store: &mut dyn KeyValueStore) -> Result<bool> {
        if self.contains(&bookmark.url) {
            return Ok(false);
        }
        let mut next = self.items.clone();
        next.push(bookmark);
        self.commit(next, store)?;
        Ok(true)
    }

    /// Remove `url`. Returns `false` if it was not bookmarked.
    pub fn remove(&mut self, url: &str, store: &mut dyn KeyValueStore) -> Result<bool> {
        if !self.contains(url) {
            return Ok(false);
        }
        let next: Vec<_> = self.items.iter().filter(|b| b.url != url).cloned().collect();
        self.commit(next, store)?;
        Ok(true)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.items.iter().any(|b| b.url == url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn commit(&mut self, next: Vec<Bookmark>, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        store.put(&self.key, &json)?;
        log::info!("saved {} bookmarks", next.len());
        self.items = next;
        Ok(())
    }
}
