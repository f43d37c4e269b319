//! Shell configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all)
//! yields a working configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Placeholder substituted with the encoded query in `search_template`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Geometry and chrome flags for newly created content surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub resizable: bool,
    pub decorations: bool,
    pub always_on_top: bool,
    pub center: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            min_width: 800,
            min_height: 600,
            resizable: true,
            decorations: true,
            always_on_top: false,
            center: true,
        }
    }
}

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Seed entry of every pane history and target of "home".
    pub home_url: String,
    /// Search URL with a `{query}` placeholder.
    pub search_template: String,
    /// Key the bookmark list is stored under.
    pub bookmarks_key: String,
    pub window: WindowConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_url: "https://www.google.com".to_string(),
            search_template: "https://www.google.com/search?q={query}".to_string(),
            bookmarks_key: "bookmarks".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text).map_err(|e| match e {
            ShellError::Config(msg) => ShellError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        log::debug!("loaded shell config from {}", path.display());
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.search_template.contains(QUERY_PLACEHOLDER) {
            return Err(ShellError::Config(format!(
                "search_template must contain {QUERY_PLACEHOLDER}"
            )));
        }
        if self.home_url.trim().is_empty() {
            return Err(ShellError::Config("home_url is empty".into()));
        }
        if self.bookmarks_key.trim().is_empty() {
            return Err(ShellError::Config("bookmarks_key is empty".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ShellError::Config("window size must be non-zero".into()));
        }
        Ok(())
    }
}
