//! User-visible status line.

use xbrowser_types::error::ShellError;

/// Latest status message shown under the address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    message: String,
}

impl StatusLine {
    pub fn new(initial: &str) -> Self {
        Self {
            message: initial.to_string(),
        }
    }

    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Report a failed operation. Silent errors (blank input) leave the
    /// current message in place.
    pub fn error(&mut self, context: &str, err: &ShellError) {
        if err.is_silent() {
            return;
        }
        self.message = format!("{context}: {err}");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new("Ready")
    }
}
