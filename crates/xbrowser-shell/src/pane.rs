//! Single-pane mode: one history stack driving one content surface.

use xbrowser_types::config::ShellConfig;
use xbrowser_types::error::Result;

use crate::history::NavigationHistory;
use crate::resolve::{SecurityLevel, UrlResolver};
use crate::status::StatusLine;
use crate::surface::{
    SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceId, operation_error, require_valid,
};

/// Navigation controller for the single content pane.
///
/// The history only moves after the host accepted the load request, so a
/// failed load leaves it exactly as it was.
#[derive(Debug, Clone)]
pub struct HistoryController {
    id: SurfaceId,
    surface: SurfaceHandle,
    resolver: UrlResolver,
    home_url: String,
    history: NavigationHistory,
    is_loading: bool,
    /// URL the surface reported after redirects, when it differs from the
    /// current history entry.
    observed_url: Option<String>,
    title: Option<String>,
    status: StatusLine,
}

impl HistoryController {
    /// Create a controller for the pane `id` whose surface is `surface`.
    /// History is seeded with the configured home URL.
    pub fn new(config: &ShellConfig, id: SurfaceId, surface: SurfaceHandle) -> Self {
        Self {
            id,
            surface,
            resolver: UrlResolver::from_config(config),
            home_url: config.home_url.clone(),
            history: NavigationHistory::new(&config.home_url),
            is_loading: false,
            observed_url: None,
            title: None,
            status: StatusLine::new("Ready - enter a URL to start browsing"),
        }
    }

    // ---------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------

    /// Resolve `raw`, validate it, load it, and push it onto history.
    ///
    /// Returns the URL that was loaded.
    pub fn navigate(&mut self, raw: &str, host: &mut dyn SurfaceHost) -> Result<String> {
        let url = self.resolver.resolve(raw)?;
        self.is_loading = true;
        self.status.set(format!("Loading {url}..."));

        if let Err(e) = require_valid(&*host, &url) {
            self.is_loading = false;
            self.status.error("Failed to load", &e);
            return Err(e);
        }
        self.request_load(host, &url, "navigate")?;

        self.history.push(&url);
        self.after_move();
        log::debug!("pane {} navigated to {url}", self.id);
        Ok(url)
    }

    /// Step back one entry. `Ok(None)` when already at the oldest entry.
    pub fn go_back(&mut self, host: &mut dyn SurfaceHost) -> Result<Option<String>> {
        let Some(target) = self.history.back_target().map(str::to_string) else {
            return Ok(None);
        };
        self.request_load(host, &target, "back")?;
        self.history.go_back();
        self.after_move();
        Ok(Some(target))
    }

    /// Step forward one entry. `Ok(None)` when already at the newest entry.
    pub fn go_forward(&mut self, host: &mut dyn SurfaceHost) -> Result<Option<String>> {
        let Some(target) = self.history.forward_target().map(str::to_string) else {
            return Ok(None);
        };
        self.request_load(host, &target, "forward")?;
        self.history.go_forward();
        self.after_move();
        Ok(Some(target))
    }

    /// Reload the current entry without touching history.
    pub fn refresh(&mut self, host: &mut dyn SurfaceHost) -> Result<()> {
        let url = self.history.current().to_string();
        self.status.set("Refreshing page...");
        self.request_load(host, &url, "refresh")
    }

    /// Navigate to the configured home page.
    pub fn go_home(&mut self, host: &mut dyn SurfaceHost) -> Result<String> {
        let home = self.home_url.clone();
        self.navigate(&home, host)
    }

    /// Forget every entry except the current one.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.status.set("History cleared");
    }

    fn request_load(&mut self, host: &mut dyn SurfaceHost, url: &str, action: &str) -> Result<()> {
        match host.load_in_surface(&self.surface, url) {
            Ok(()) => {
                self.is_loading = true;
                Ok(())
            },
            Err(e) => {
                let err = operation_error(action, e);
                log::warn!("pane {}: {err}", self.id);
                self.is_loading = false;
                self.status.error(&format!("Failed to {action}"), &err);
                Err(err)
            },
        }
    }

    fn after_move(&mut self) {
        self.observed_url = None;
        self.title = None;
        self.status.set(format!("Loading {}...", self.history.current()));
    }

    // ---------------------------------------------------------------
    // Surface events
    // ---------------------------------------------------------------

    /// The surface finished loading. A differing `observed` URL (redirect)
    /// is kept for display only; history does not grow.
    pub fn on_surface_loaded(&mut self, observed: Option<&str>) {
        self.is_loading = false;
        self.observe_url(observed);
        self.status.set(format!("Loaded {}", self.effective_url()));
    }

    fn observe_url(&mut self, observed: Option<&str>) {
        self.observed_url = observed
            .filter(|u| *u != self.history.current())
            .map(str::to_string);
    }

    /// Apply an event addressed to this pane. Returns `false` (and does
    /// nothing) for events addressed to another surface.
    pub fn handle_surface_event(&mut self, event: &SurfaceEvent) -> bool {
        if event.id() != &self.id {
            log::debug!("pane {} ignoring {} event for {}", self.id, event.kind(), event.id());
            return false;
        }
        match event {
            SurfaceEvent::Created { .. } => {},
            SurfaceEvent::CreationFailed { reason, .. } => {
                self.is_loading = false;
                self.status.set(format!("Failed to open browser window: {reason}"));
            },
            SurfaceEvent::Loaded { url, title, .. } => {
                if let Some(title) = title {
                    self.title = Some(title.clone());
                }
                self.on_surface_loaded(url.as_deref());
            },
            SurfaceEvent::TitleChanged { title, .. } => self.title = Some(title.clone()),
            SurfaceEvent::UrlChanged { url, .. } => self.observe_url(Some(url.as_str())),
            SurfaceEvent::CloseRequested { .. } | SurfaceEvent::Closed { .. } => {
                self.is_loading = false;
                self.status.set("Browser window closed");
            },
        }
        true
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn id(&self) -> &SurfaceId {
        &self.id
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    /// Current history entry.
    pub fn current_url(&self) -> &str {
        self.history.current()
    }

    /// URL to show in the address bar: the surface-reported URL if it
    /// differs from the history entry, else the entry itself.
    pub fn effective_url(&self) -> &str {
        self.observed_url
            .as_deref()
            .unwrap_or_else(|| self.history.current())
    }

    /// Page title if the surface reported one, else the effective URL.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.effective_url())
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn security(&self) -> SecurityLevel {
        SecurityLevel::of(self.effective_url())
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn status(&self) -> &str {
        self.status.message()
    }
}
