//! Contract with the external runtime that owns content surfaces.
//!
//! The shell never renders anything. It asks a [`SurfaceHost`] to create,
//! load, focus and close surfaces, and the host reports back through
//! [`SurfaceEvent`]s that the embedder feeds to
//! [`TabRegistry::handle_surface_event`](crate::registry::TabRegistry::handle_surface_event)
//! or [`HistoryController::handle_surface_event`](crate::pane::HistoryController::handle_surface_event).
//!
//! Host calls only *request* work. Completion (a window actually
//! appearing, a page finishing) arrives later as an event, and other
//! events may be delivered in between.

use std::fmt;

use serde::{Deserialize, Serialize};
use xbrowser_types::config::WindowConfig;
use xbrowser_types::error::{Result, ShellError};

// -----------------------------------------------------------------------
// Identifiers
// -----------------------------------------------------------------------

/// Opaque identifier of a tab or of the single pane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lookup key (window label) for an external surface.
///
/// Holding a handle does not keep the surface alive; every host call
/// made with it must tolerate the surface having vanished.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(String);

impl SurfaceHandle {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The window label used for a tab's surface.
    pub fn for_tab(id: &SurfaceId) -> Self {
        Self(format!("webview_{id}"))
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -----------------------------------------------------------------------
// SurfaceConfig
// -----------------------------------------------------------------------

/// Parameters for a new content surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub url: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub resizable: bool,
    pub decorations: bool,
    pub always_on_top: bool,
    pub center: bool,
}

impl SurfaceConfig {
    pub fn new(url: &str, window: &WindowConfig) -> Self {
        Self {
            url: url.to_string(),
            title: format!("Loading {url}..."),
            width: window.width,
            height: window.height,
            min_width: window.min_width,
            min_height: window.min_height,
            resizable: window.resizable,
            decorations: window.decorations,
            always_on_top: window.always_on_top,
            center: window.center,
        }
    }
}

// -----------------------------------------------------------------------
// SurfaceHost
// -----------------------------------------------------------------------

/// The external runtime that validates URLs and owns content surfaces.
pub trait SurfaceHost {
    /// Check that `url` is something a surface may load.
    ///
    /// `Ok(false)` and `Err` are both treated as rejection. The default
    /// accepts any parseable `http`/`https` URL.
    fn validate_url(&self, url: &str) -> Result<bool> {
        Ok(is_web_url(url))
    }

    /// Request a new surface labelled `handle`. The surface reports
    /// `Created` or `CreationFailed` later.
    ///
    /// Hosts must always send one of the two once this returns `Ok`: a
    /// tab closed before creation finished is only torn down when that
    /// event arrives, or on the next `close_all_tabs` retry.
    fn create_surface(&mut self, handle: &SurfaceHandle, config: &SurfaceConfig) -> Result<()>;

    /// Request closure. `Ok(false)` means the surface was already gone,
    /// which is not an error.
    fn close_surface(&mut self, handle: &SurfaceHandle) -> Result<bool>;

    /// Bring the surface to the front. `Ok(false)` means not found.
    fn focus_surface(&mut self, handle: &SurfaceHandle) -> Result<bool>;

    /// Point an existing surface at `url` (also used for reload).
    fn load_in_surface(&mut self, handle: &SurfaceHandle, url: &str) -> Result<()>;
}

/// True for URLs with an `http` or `https` scheme that `url` can parse.
pub fn is_web_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Ask the host to validate `url`; rejection and validator failure both
/// become [`ShellError::InvalidUrl`].
pub(crate) fn require_valid(host: &dyn SurfaceHost, url: &str) -> Result<()> {
    match host.validate_url(url) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ShellError::InvalidUrl(url.to_string())),
        Err(e) => Err(ShellError::InvalidUrl(format!("{url} ({})", host_message(e)))),
    }
}

/// Wrap a host failure as a best-effort operation error.
pub(crate) fn operation_error(action: &str, err: ShellError) -> ShellError {
    ShellError::SurfaceOperation(format!("{action}: {}", host_message(err)))
}

/// Wrap a host failure during surface creation.
pub(crate) fn creation_error(err: ShellError) -> ShellError {
    ShellError::SurfaceCreation(host_message(err))
}

fn host_message(err: ShellError) -> String {
    match err {
        ShellError::SurfaceOperation(msg) | ShellError::SurfaceCreation(msg) => msg,
        other => other.to_string(),
    }
}

// -----------------------------------------------------------------------
// SurfaceEvent
// -----------------------------------------------------------------------

/// Lifecycle notification from an external surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface finished initialising.
    Created { id: SurfaceId },
    /// The surface could not be initialised.
    CreationFailed { id: SurfaceId, reason: String },
    /// A page finished loading. `url` is the resolved URL after redirects.
    Loaded {
        id: SurfaceId,
        url: Option<String>,
        title: Option<String>,
    },
    TitleChanged { id: SurfaceId, title: String },
    /// The surface navigated on its own (link click, script).
    UrlChanged { id: SurfaceId, url: String },
    /// The user asked the window to close (e.g. its close button).
    CloseRequested { id: SurfaceId },
    /// The surface is gone.
    Closed { id: SurfaceId },
}

impl SurfaceEvent {
    pub fn id(&self) -> &SurfaceId {
        match self {
            Self::Created { id }
            | Self::CreationFailed { id, .. }
            | Self::Loaded { id, .. }
            | Self::TitleChanged { id, .. }
            | Self::UrlChanged { id, .. }
            | Self::CloseRequested { id }
            | Self::Closed { id } => id,
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::CreationFailed { .. } => "creation-failed",
            Self::Loaded { .. } => "loaded",
            Self::TitleChanged { .. } => "title-changed",
            Self::UrlChanged { .. } => "url-changed",
            Self::CloseRequested { .. } => "close-requested",
            Self::Closed { .. } => "closed",
        }
    }

    /// Decode an inter-window JSON message sent by a tab's content script.
    pub fn from_window_message(json: &str) -> Result<Self> {
        let msg: WindowMessage = serde_json::from_str(json)?;
        msg.try_into()
    }
}

/// Wire shape of messages posted by tab windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowMessage {
    #[serde(rename = "type")]
    pub kind: WindowMessageKind,
    pub payload: WindowMessagePayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowMessageKind {
    TabLoaded,
    TabTitleChanged,
    TabUrlChanged,
    TabClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMessagePayload {
    pub tab_id: SurfaceId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub window_label: Option<String>,
}

impl TryFrom<WindowMessage> for SurfaceEvent {
    type Error = ShellError;

    fn try_from(msg: WindowMessage) -> Result<Self> {
        let WindowMessagePayload {
            tab_id: id,
            url,
            title,
            ..
        } = msg.payload;
        let missing = |field: &str| {
            ShellError::SurfaceOperation(format!("{:?} message for {id} without {field}", msg.kind))
        };
        Ok(match msg.kind {
            WindowMessageKind::TabLoaded => Self::Loaded { id, url, title },
            WindowMessageKind::TabTitleChanged => {
                let title = title.ok_or_else(|| missing("title"))?;
                Self::TitleChanged { id, title }
            },
            WindowMessageKind::TabUrlChanged => {
                let url = url.ok_or_else(|| missing("url"))?;
                Self::UrlChanged { id, url }
            },
            WindowMessageKind::TabClosed => Self::Closed { id },
        })
    }
}
