//! Navigation history: an ordered list of URLs with a cursor marking the
//! current entry.
//!
//! Shared by the single-pane [`HistoryController`](crate::pane::HistoryController)
//! and by every [`TabRecord`](crate::tab::TabRecord).

/// Back/forward history for one content surface.
///
/// Never empty: it is seeded with an initial URL and `cursor` always
/// indexes a valid entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl NavigationHistory {
    /// Create a history holding only `seed`.
    pub fn new(seed: &str) -> Self {
        Self {
            entries: vec![seed.to_string()],
            cursor: 0,
        }
    }

    /// Append `url` after the current entry, discarding any forward
    /// entries, and make it current. Consecutive duplicates are kept.
    pub fn push(&mut self, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url.to_string());
        self.cursor = self.entries.len() - 1;
    }

    /// The entry [`go_back`](Self::go_back) would move to, if any.
    pub fn back_target(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .map(|i| self.entries[i].as_str())
    }

    /// The entry [`go_forward`](Self::go_forward) would move to, if any.
    pub fn forward_target(&self) -> Option<&str> {
        self.entries.get(self.cursor + 1).map(String::as_str)
    }

    /// Step back. Returns the new current entry, or `None` at the start.
    pub fn go_back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward. Returns the new current entry, or `None` at the end.
    pub fn go_forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry except the current one.
    pub fn clear(&mut self) {
        let current = self.entries.swap_remove(self.cursor);
        self.entries.clear();
        self.entries.push(current);
        self.cursor = 0;
    }
}
