//! Driver state: both shell modes over one headless host.

use xbrowser_shell::{
    BookmarkList, BrowserInfo, HistoryController, SurfaceHandle, SurfaceId, TabRegistry,
};
use xbrowser_store::KeyValueStore;
use xbrowser_types::config::ShellConfig;

use crate::commands::{Command, HELP};
use crate::host::HeadlessHost;

pub const PANE_ID: &str = "pane";
pub const PANE_LABEL: &str = "browser";

pub struct AppState {
    pub pane: HistoryController,
    pub tabs: TabRegistry,
    pub bookmarks: BookmarkList,
    pub host: HeadlessHost,
    store: Box<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(config: &ShellConfig, store: Box<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let pane_id = SurfaceId::new(PANE_ID);
        let pane_handle = SurfaceHandle::new(PANE_LABEL);
        let mut host = HeadlessHost::new();
        host.attach(&pane_handle, pane_id.clone());

        let bookmarks = BookmarkList::load(&*store, &config.bookmarks_key)?;
        log::info!("{} bookmarks loaded", bookmarks.len());

        Ok(Self {
            pane: HistoryController::new(config, pane_id, pane_handle),
            tabs: TabRegistry::new(config),
            bookmarks,
            host,
            store,
        })
    }

    /// Run one command and deliver the events it caused. Returns the
    /// lines to print.
    pub fn execute(&mut self, cmd: Command) -> Vec<String> {
        let mut out = Vec::new();
        match cmd {
            Command::Open(input) => {
                if let Err(e) = self.pane.navigate(&input, &mut self.host) {
                    log::debug!("open failed: {e}");
                }
                self.pump_events();
                out.push(self.pane_line());
            },
            Command::Back => {
                if let Err(e) = self.pane.go_back(&mut self.host) {
                    log::debug!("back failed: {e}");
                }
                self.pump_events();
                out.push(self.pane_line());
            },
            Command::Forward => {
                if let Err(e) = self.pane.go_forward(&mut self.host) {
                    log::debug!("forward failed: {e}");
                }
                self.pump_events();
                out.push(self.pane_line());
            },
            Command::Reload => {
                if let Err(e) = self.pane.refresh(&mut self.host) {
                    log::debug!("reload failed: {e}");
                }
                self.pump_events();
                out.push(self.pane_line());
            },
            Command::Home => {
                if let Err(e) = self.pane.go_home(&mut self.host) {
                    log::debug!("home failed: {e}");
                }
                self.pump_events();
                out.push(self.pane_line());
            },
            Command::Tab(input) => {
                if let Err(e) = self.tabs.create_tab(&input, &mut self.host) {
                    log::debug!("tab failed: {e}");
                }
                self.pump_events();
                out.push(self.tabs.status().to_string());
            },
            Command::Tabs => {
                let active = self.tabs.active_tab_id().cloned();
                for tab in self.tabs.tabs() {
                    let marker = if Some(tab.id()) == active.as_ref() { '*' } else { ' ' };
                    out.push(format!("{marker} {}  {}  {}", tab.id(), tab.title(), tab.url()));
                }
                if out.is_empty() {
                    out.push("no tabs".into());
                }
            },
            Command::Focus(id) => {
                match self.tabs.focus_tab(&id, &mut self.host) {
                    Ok(true) => out.push(self.tabs.status().to_string()),
                    Ok(false) => out.push(format!("no such tab: {id}")),
                    Err(e) => out.push(e.to_string()),
                }
                self.pump_events();
            },
            Command::Close(id) => {
                if self.tabs.close_tab(&id, &mut self.host) {
                    out.push(self.tabs.status().to_string());
                } else {
                    out.push(format!("no such tab: {id}"));
                }
                self.pump_events();
            },
            Command::CloseAll => {
                let summary = self.tabs.close_all_tabs(&mut self.host);
                for (id, err) in &summary.failures {
                    out.push(format!("{id}: {err}"));
                }
                out.push(self.tabs.status().to_string());
                self.pump_events();
            },
            Command::Bookmark => {
                let url = self.pane.current_url().to_string();
                let title = self.pane.title().to_string();
                match self.bookmarks.toggle(&url, &title, &mut *self.store) {
                    Ok(change) => out.push(change.message().to_string()),
                    Err(e) => {
                        log::warn!("bookmark update failed: {e}");
                        out.push("Failed to update bookmark".into());
                    },
                }
            },
            Command::Bookmarks => {
                for b in self.bookmarks.iter() {
                    out.push(format!("{}  {}", b.title, b.url));
                }
                if out.is_empty() {
                    out.push("no bookmarks".into());
                }
            },
            Command::Info => match info_json(&BrowserInfo::current()) {
                Some(json) => out.extend(json.lines().map(str::to_string)),
                None => out.push("browser info unavailable".into()),
            },
            Command::Help => out.extend(HELP.lines().map(str::to_string)),
            Command::Quit => {},
        }
        out
    }

    /// Feed queued surface events back into whichever controller owns
    /// them, until the host has nothing left.
    pub fn pump_events(&mut self) {
        loop {
            let events = self.host.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                if event.id() == self.pane.id() {
                    self.pane.handle_surface_event(&event);
                } else {
                    self.tabs.handle_surface_event(&event, &mut self.host);
                }
            }
        }
    }

    fn pane_line(&self) -> String {
        let mut line = format!("[{}] {}", self.pane.security().label(), self.pane.status());
        if self.pane.can_go_back() {
            line.push_str("  <");
        }
        if self.pane.can_go_forward() {
            line.push_str("  >");
        }
        line
    }
}

fn info_json(info: &BrowserInfo) -> Option<String> {
    match serde_json::to_string_pretty(info) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("cannot serialise browser info: {e}");
            None
        },
    }
}
