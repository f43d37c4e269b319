//! A single tab: one independent content surface and its history.

use crate::history::NavigationHistory;
use crate::surface::{SurfaceHandle, SurfaceId};

/// Lifecycle phase of a live tab. Closed tabs are removed from the
/// registry rather than kept in a terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabPhase {
    /// Surface requested but not yet reported as created.
    Creating,
    /// A load was requested and has not finished.
    Loading,
    Loaded,
}

/// State of one tab.
///
/// Fields are read-only outside the crate; all mutation goes through
/// [`TabRegistry`](crate::registry::TabRegistry).
#[derive(Debug, Clone)]
pub struct TabRecord {
    id: SurfaceId,
    url: String,
    title: String,
    phase: TabPhase,
    surface: SurfaceHandle,
    created_at: u64,
    /// Set once the host reports the surface exists. Independent of
    /// `phase`: a load can be requested before creation completes.
    surface_ready: bool,
    history: NavigationHistory,
}

impl TabRecord {
    pub(crate) fn new(id: SurfaceId, url: &str, created_at: u64) -> Self {
        let surface = SurfaceHandle::for_tab(&id);
        Self {
            id,
            url: url.to_string(),
            title: url.to_string(),
            phase: TabPhase::Creating,
            surface,
            created_at,
            surface_ready: false,
            history: NavigationHistory::new(url),
        }
    }

    pub fn id(&self) -> &SurfaceId {
        &self.id
    }

    /// URL currently shown in the tab.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Display name; the URL until the page reports a title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> TabPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != TabPhase::Loaded
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Whether the host has reported the surface as created.
    pub fn surface_ready(&self) -> bool {
        self.surface_ready
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    // -- registry-only mutators --------------------------------------

    pub(crate) fn set_phase(&mut self, phase: TabPhase) {
        self.phase = phase;
    }

    pub(crate) fn mark_surface_ready(&mut self) {
        self.surface_ready = true;
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Record a navigation the shell requested.
    pub(crate) fn push_url(&mut self, url: &str) {
        self.history.push(url);
        self.url = url.to_string();
        self.title = url.to_string();
    }

    /// Record a URL the page navigated to on its own (link click,
    /// script). A URL not already shown is pushed onto history.
    pub(crate) fn observe_url(&mut self, url: &str) {
        if self.url != url && self.history.current() != url {
            self.history.push(url);
        }
        self.url = url.to_string();
    }

    /// Show the URL a load resolved to (after redirects). History keeps
    /// the requested entry so back does not land on a redirect.
    pub(crate) fn show_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub(crate) fn history_mut(&mut self) -> &mut NavigationHistory {
        &mut self.history
    }

    /// Sync the displayed URL to the history cursor after back/forward.
    pub(crate) fn sync_url_to_history(&mut self) {
        self.url = self.history.current().to_string();
    }
}
