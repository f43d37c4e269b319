//! Browser shell core: address resolution, navigation history and tab
//! lifecycle.
//!
//! The shell runs in one of two modes. Single-pane mode drives one
//! content surface through a [`HistoryController`]. Multi-tab mode gives
//! every tab its own surface, tracked by the [`TabRegistry`]. Neither
//! renders or fetches anything: a [`SurfaceHost`] supplied by the embedder
//! does that work and reports progress as [`SurfaceEvent`]s.

pub mod bookmarks;
pub mod history;
pub mod info;
pub mod pane;
pub mod registry;
pub mod resolve;
pub mod status;
pub mod surface;
pub mod tab;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use bookmarks::{Bookmark, BookmarkChange, BookmarkList};
pub use history::NavigationHistory;
pub use info::BrowserInfo;
pub use pane::HistoryController;
pub use registry::{CloseSummary, TabRegistry};
pub use resolve::{SecurityLevel, UrlResolver};
pub use surface::{SurfaceConfig, SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceId};
pub use tab::{TabPhase, TabRecord};

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
