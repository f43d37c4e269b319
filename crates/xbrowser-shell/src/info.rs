//! Static identity of the shell, as shown in the About dialog.

use serde::{Deserialize, Serialize};

/// Name, version and engine of the running shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserInfo {
    pub name: String,
    pub version: String,
    pub user_agent: String,
    pub engine: String,
}

impl BrowserInfo {
    pub fn current() -> Self {
        let version = env!("CARGO_PKG_VERSION");
        Self {
            name: "xbrowser".into(),
            version: version.into(),
            user_agent: format!("xbrowser/{version} (Native Webview)"),
            engine: "WebKit".into(),
        }
    }
}

impl Default for BrowserInfo {
    fn default() -> Self {
        Self::current()
    }
}
