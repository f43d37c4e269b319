//! Multi-tab mode: the registry of live tabs and their surfaces.
//!
//! The registry is the only writer of [`TabRecord`]s. User operations
//! (`create_tab`, `close_tab`, ...) and surface events both go through it,
//! and each completes its state transition before returning, so an event
//! delivered later never observes a half-applied change.
//!
//! A tab is removed whenever the user or the surface asks for it to go
//! away, even if the host fails to close the window: the UI must never
//! keep showing a tab the user closed.

use std::collections::HashMap;

use xbrowser_types::config::{ShellConfig, WindowConfig};
use xbrowser_types::error::{Result, ShellError};

use crate::resolve::UrlResolver;
use crate::status::StatusLine;
use crate::surface::{
    SurfaceConfig, SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceId, creation_error,
    operation_error, require_valid,
};
use crate::tab::{TabPhase, TabRecord};

#[cfg(test)]
mod tests;

/// Result of [`TabRegistry::close_all_tabs`].
#[derive(Debug, Default)]
pub struct CloseSummary {
    /// Tabs removed from the registry (all of them).
    pub closed: usize,
    /// Surfaces the host failed to close. Their tabs were removed anyway.
    pub failures: Vec<(SurfaceId, ShellError)>,
}

/// Owner of every live tab, in display (insertion) order.
#[derive(Debug)]
pub struct TabRegistry {
    tabs: Vec<TabRecord>,
    active: Option<SurfaceId>,
    resolver: UrlResolver,
    window: WindowConfig,
    /// Surfaces of tabs closed while still being created. A late `Created`
    /// event for one of these triggers another close request.
    orphans: HashMap<SurfaceId, SurfaceHandle>,
    next_seq: u64,
    status: StatusLine,
}

impl TabRegistry {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            resolver: UrlResolver::from_config(config),
            window: config.window.clone(),
            orphans: HashMap::new(),
            next_seq: 0,
            status: StatusLine::default(),
        }
    }

    // ---------------------------------------------------------------
    // Tab lifecycle
    // ---------------------------------------------------------------

    /// Open `raw` in a new tab and make it active.
    ///
    /// Atomic: on any error the registry is unchanged.
    pub fn create_tab(&mut self, raw: &str, host: &mut dyn SurfaceHost) -> Result<SurfaceId> {
        let url = match self.resolver.resolve(raw) {
            Ok(url) => url,
            Err(e) => {
                self.status.error("Failed to open tab", &e);
                return Err(e);
            },
        };
        self.status.set(format!("Creating new tab for {url}..."));

        if let Err(e) = require_valid(&*host, &url) {
            self.status.error("Invalid URL provided", &e);
            return Err(e);
        }

        let created_at = crate::now_millis();
        let id = self.next_id(created_at);
        let record = TabRecord::new(id.clone(), &url, created_at);
        let config = SurfaceConfig::new(&url, &self.window);

        if let Err(e) = host.create_surface(record.surface(), &config) {
            let err = creation_error(e);
            log::warn!("tab {id}: {err}");
            self.status.error("Failed to create tab", &err);
            return Err(err);
        }

        log::info!("tab {id} opened for {url}");
        self.tabs.push(record);
        self.active = Some(id.clone());
        self.status.set(format!("Tab opened: {url}"));
        Ok(id)
    }

    /// Close tab `id`. Returns `false` if no such tab exists.
    ///
    /// The record is removed even when the host fails to close the
    /// surface; the failure is logged and shown in the status line.
    pub fn close_tab(&mut self, id: &SurfaceId, host: &mut dyn SurfaceHost) -> bool {
        let Some(index) = self.position(id) else {
            log::debug!("close_tab: no tab {id}");
            return false;
        };
        let surface_pending = !self.tabs[index].surface_ready();
        let (record, failure) = self.discard(index, host, surface_pending);
        match failure {
            None => self.status.set(format!("Tab closed: {}", record.url())),
            Some(err) => self.status.set(format!(
                "Tab closed: {} (window close failed: {err})",
                record.url()
            )),
        }
        true
    }

    /// Close every tab. Never stops early: each surface gets a close
    /// request and every record is removed regardless of failures.
    ///
    /// Surfaces left over from earlier mid-creation closes are asked to
    /// close again first.
    pub fn close_all_tabs(&mut self, host: &mut dyn SurfaceHost) -> CloseSummary {
        self.status.set("Closing all tabs...");
        self.sweep_orphans(host);
        let mut summary = CloseSummary::default();
        while !self.tabs.is_empty() {
            let surface_pending = !self.tabs[0].surface_ready();
            let (record, failure) = self.discard(0, host, surface_pending);
            summary.closed += 1;
            if let Some(err) = failure {
                summary.failures.push((record.id().clone(), err));
            }
        }
        self.active = None;

        if summary.failures.is_empty() {
            self.status.set("All tabs closed");
        } else {
            self.status.set(format!(
                "All tabs closed ({} windows failed to close)",
                summary.failures.len()
            ));
        }
        log::info!("closed {} tabs", summary.closed);
        summary
    }

    /// Bring tab `id` to the front and make it active.
    ///
    /// `Ok(false)` if the tab does not exist, or if its surface has
    /// vanished (the stale tab is then removed).
    pub fn focus_tab(&mut self, id: &SurfaceId, host: &mut dyn SurfaceHost) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let record = &self.tabs[index];
        if !record.surface_ready() {
            // The window opens focused; nothing to raise yet.
            self.active = Some(id.clone());
            return Ok(true);
        }

        match host.focus_surface(record.surface()) {
            Ok(true) => {
                self.status.set(format!("Focused on tab: {}", record.url()));
                self.active = Some(id.clone());
                Ok(true)
            },
            Ok(false) => {
                log::info!("tab {id}: surface vanished, removing");
                self.close_tab(id, host);
                Ok(false)
            },
            Err(e) => {
                let err = operation_error("focus", e);
                log::warn!("tab {id}: {err}");
                self.status.error("Error focusing tab", &err);
                Err(err)
            },
        }
    }

    // ---------------------------------------------------------------
    // Per-tab navigation
    // ---------------------------------------------------------------

    /// Load `raw` in an existing tab, pushing it onto the tab's history.
    /// `Ok(None)` if the tab does not exist.
    pub fn navigate_tab(
        &mut self,
        id: &SurfaceId,
        raw: &str,
        host: &mut dyn SurfaceHost,
    ) -> Result<Option<String>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let url = self.resolver.resolve(raw)?;
        if let Err(e) = require_valid(&*host, &url) {
            self.status.error("Failed to load", &e);
            return Err(e);
        }
        self.load_in_tab(index, &url, "navigate", host)?;
        let record = &mut self.tabs[index];
        record.push_url(&url);
        record.set_phase(TabPhase::Loading);
        Ok(Some(url))
    }

    /// Reload a tab's current URL. `Ok(false)` if the tab does not exist.
    pub fn reload_tab(&mut self, id: &SurfaceId, host: &mut dyn SurfaceHost) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let url = self.tabs[index].url().to_string();
        self.load_in_tab(index, &url, "refresh", host)?;
        self.tabs[index].set_phase(TabPhase::Loading);
        Ok(true)
    }

    /// Step a tab back in its own history.
    pub fn tab_go_back(
        &mut self,
        id: &SurfaceId,
        host: &mut dyn SurfaceHost,
    ) -> Result<Option<String>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let Some(target) = self.tabs[index].history().back_target().map(str::to_string) else {
            return Ok(None);
        };
        self.load_in_tab(index, &target, "back", host)?;
        let record = &mut self.tabs[index];
        record.history_mut().go_back();
        record.sync_url_to_history();
        record.set_phase(TabPhase::Loading);
        Ok(Some(target))
    }

    /// Step a tab forward in its own history.
    pub fn tab_go_forward(
        &mut self,
        id: &SurfaceId,
        host: &mut dyn SurfaceHost,
    ) -> Result<Option<String>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let Some(target) = self.tabs[index]
            .history()
            .forward_target()
            .map(str::to_string)
        else {
            return Ok(None);
        };
        self.load_in_tab(index, &target, "forward", host)?;
        let record = &mut self.tabs[index];
        record.history_mut().go_forward();
        record.sync_url_to_history();
        record.set_phase(TabPhase::Loading);
        Ok(Some(target))
    }

    fn load_in_tab(
        &mut self,
        index: usize,
        url: &str,
        action: &str,
        host: &mut dyn SurfaceHost,
    ) -> Result<()> {
        let record = &self.tabs[index];
        host.load_in_surface(record.surface(), url).map_err(|e| {
            let err = operation_error(action, e);
            log::warn!("tab {}: {err}", record.id());
            self.status.error(&format!("Failed to {action}"), &err);
            err
        })
    }

    // ---------------------------------------------------------------
    // Surface events
    // ---------------------------------------------------------------

    /// Apply a lifecycle event from a tab surface.
    ///
    /// Events for unknown ids are ignored: the tab may have been closed
    /// while the event was in flight. Returns whether the event changed
    /// anything.
    pub fn handle_surface_event(&mut self, event: &SurfaceEvent, host: &mut dyn SurfaceHost) -> bool {
        let id = event.id();

        if let Some(handle) = self.orphans.get(id).cloned() {
            return self.handle_orphan_event(event, &handle, host);
        }

        let Some(index) = self.position(id) else {
            log::debug!("ignoring {} event for unknown tab {id}", event.kind());
            return false;
        };

        match event {
            SurfaceEvent::Created { .. } => {
                let record = &mut self.tabs[index];
                if record.surface_ready() {
                    return false;
                }
                record.mark_surface_ready();
                // A load requested before creation finished keeps Loading.
                if record.phase() == TabPhase::Creating {
                    record.set_phase(TabPhase::Loaded);
                }
                self.status.set(format!("Tab created successfully: {}", record.url()));
            },
            SurfaceEvent::CreationFailed { reason, .. } => {
                log::warn!("tab {id}: surface creation failed: {reason}");
                self.discard(index, host, false);
                self.status.set(format!("Failed to create tab: {reason}"));
            },
            SurfaceEvent::Loaded { url, title, .. } => {
                let record = &mut self.tabs[index];
                if let Some(url) = url {
                    record.show_url(url);
                }
                if let Some(title) = title {
                    record.set_title(title);
                }
                record.mark_surface_ready();
                record.set_phase(TabPhase::Loaded);
            },
            SurfaceEvent::TitleChanged { title, .. } => self.tabs[index].set_title(title),
            SurfaceEvent::UrlChanged { url, .. } => self.tabs[index].observe_url(url),
            SurfaceEvent::CloseRequested { .. } => {
                self.close_tab(id, host);
            },
            SurfaceEvent::Closed { .. } => {
                let (record, _) = self.discard(index, host, false);
                self.status.set(format!("Tab closed: {}", record.url()));
            },
        }
        true
    }

    fn handle_orphan_event(
        &mut self,
        event: &SurfaceEvent,
        handle: &SurfaceHandle,
        host: &mut dyn SurfaceHost,
    ) -> bool {
        let id = event.id();
        match event {
            SurfaceEvent::Created { .. } => {
                log::info!("tab {id} finished creating after close, closing surface");
                if let Err(e) = host.close_surface(handle) {
                    log::warn!("tab {id}: {}", operation_error("close", e));
                }
                self.orphans.remove(id);
                true
            },
            SurfaceEvent::CreationFailed { .. } | SurfaceEvent::Closed { .. } => {
                self.orphans.remove(id);
                true
            },
            _ => false,
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Tabs in display order.
    pub fn tabs(&self) -> &[TabRecord] {
        &self.tabs
    }

    pub fn get(&self, id: &SurfaceId) -> Option<&TabRecord> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &SurfaceId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_tab_id(&self) -> Option<&SurfaceId> {
        self.active.as_ref()
    }

    pub fn active_tab(&self) -> Option<&TabRecord> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    /// Surfaces still awaiting teardown after their tab was closed
    /// mid-creation.
    pub fn pending_teardown(&self) -> usize {
        self.orphans.len()
    }

    pub fn status(&self) -> &str {
        self.status.message()
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    /// Retry closing orphaned surfaces. Ones the host reports closed are
    /// forgotten; the rest keep waiting for their creation event.
    fn sweep_orphans(&mut self, host: &mut dyn SurfaceHost) {
        self.orphans.retain(|id, handle| match host.close_surface(handle) {
            Ok(true) => {
                log::info!("tab {id}: orphaned surface closed");
                false
            },
            Ok(false) => true,
            Err(e) => {
                log::warn!("tab {id}: {}", operation_error("close", e));
                true
            },
        });
    }

    fn position(&self, id: &SurfaceId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == id)
    }

    fn next_id(&mut self, created_at: u64) -> SurfaceId {
        let seq = self.next_seq;
        self.next_seq += 1;
        SurfaceId::new(format!("tab_{created_at}_{seq}"))
    }

    /// Remove the record at `index`, request its surface closure, and
    /// reassign the active tab if needed. Returns the removed record and
    /// the close failure, if any.
    ///
    /// With `surface_pending`, a surface the host does not know yet is
    /// remembered so a late `Created` event can still tear it down.
    fn discard(
        &mut self,
        index: usize,
        host: &mut dyn SurfaceHost,
        surface_pending: bool,
    ) -> (TabRecord, Option<ShellError>) {
        let record = self.tabs.remove(index);
        if self.active.as_ref() == Some(record.id()) {
            self.active = self.tabs.last().map(|t| t.id().clone());
        }

        let failure = match host.close_surface(record.surface()) {
            Ok(true) => None,
            Ok(false) => {
                log::debug!("tab {}: surface already gone", record.id());
                if surface_pending {
                    self.orphans
                        .insert(record.id().clone(), record.surface().clone());
                }
                None
            },
            Err(e) => {
                let err = operation_error("close", e);
                log::warn!("tab {}: {err}", record.id());
                if surface_pending {
                    self.orphans
                        .insert(record.id().clone(), record.surface().clone());
                }
                Some(err)
            },
        };
        log::info!("tab {} closed", record.id());
        (record, failure)
    }
}
