//! Error types for xbrowser.

use std::io;

/// Errors produced by the xbrowser shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("empty navigation input")]
    EmptyInput,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("surface operation failed: {0}")]
    SurfaceOperation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// True for errors that leave the caller's state untouched and need
    /// no user-facing report (blank address bar submissions).
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
