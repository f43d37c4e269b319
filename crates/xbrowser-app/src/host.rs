//! A surface host with no windows.
//!
//! Every call is logged, and the events a real webview would emit
//! (created, then loaded with the host name as title) are queued for the
//! driver to feed back into the shell.

use std::collections::{HashMap, HashSet, VecDeque};

use xbrowser_shell::{SurfaceConfig, SurfaceEvent, SurfaceHandle, SurfaceHost, SurfaceId};
use xbrowser_types::error::Result;

const TAB_LABEL_PREFIX: &str = "webview_";

#[derive(Debug, Default)]
pub struct HeadlessHost {
    /// Window label to the id its events are reported under.
    ids: HashMap<String, SurfaceId>,
    open: HashSet<String>,
    pending: VecDeque<SurfaceEvent>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface that exists from startup (the single pane).
    pub fn attach(&mut self, handle: &SurfaceHandle, id: SurfaceId) {
        self.ids.insert(handle.label().to_string(), id);
        self.open.insert(handle.label().to_string());
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        self.pending.drain(..).collect()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    fn id_for(&self, handle: &SurfaceHandle) -> SurfaceId {
        match self.ids.get(handle.label()) {
            Some(id) => id.clone(),
            None => {
                let label = handle.label();
                SurfaceId::new(label.strip_prefix(TAB_LABEL_PREFIX).unwrap_or(label))
            },
        }
    }

    fn queue_loaded(&mut self, id: SurfaceId, url: &str) {
        self.pending.push_back(SurfaceEvent::Loaded {
            id,
            url: Some(url.to_string()),
            title: page_title(url),
        });
    }
}

/// Host name of `url`, standing in for the title a real page would report.
fn page_title(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

impl SurfaceHost for HeadlessHost {
    fn create_surface(&mut self, handle: &SurfaceHandle, config: &SurfaceConfig) -> Result<()> {
        log::info!(
            "create {} ({}x{}) -> {}",
            handle,
            config.width,
            config.height,
            config.url
        );
        let id = self.id_for(handle);
        self.ids.insert(handle.label().to_string(), id.clone());
        self.open.insert(handle.label().to_string());
        self.pending.push_back(SurfaceEvent::Created { id: id.clone() });
        self.queue_loaded(id, &config.url);
        Ok(())
    }

    fn close_surface(&mut self, handle: &SurfaceHandle) -> Result<bool> {
        log::info!("close {handle}");
        Ok(self.open.remove(handle.label()))
    }

    fn focus_surface(&mut self, handle: &SurfaceHandle) -> Result<bool> {
        log::info!("focus {handle}");
        Ok(self.open.contains(handle.label()))
    }

    fn load_in_surface(&mut self, handle: &SurfaceHandle, url: &str) -> Result<()> {
        log::info!("load {handle} -> {url}");
        let id = self.id_for(handle);
        self.queue_loaded(id, url);
        Ok(())
    }
}
