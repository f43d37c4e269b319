//! Shared test utilities for the shell.
//!
//! Provides a [`MockSurfaceHost`] that records every host call for
//! assertion and can be scripted to fail individual operations.

use std::collections::HashSet;

use xbrowser_types::error::{Result, ShellError};

use crate::surface::{SurfaceConfig, SurfaceHandle, SurfaceHost};

/// A recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create { label: String, url: String },
    Close(String),
    Focus(String),
    Load { label: String, url: String },
}

/// A mock host that records calls and tracks which surfaces are open.
#[derive(Default)]
pub struct MockSurfaceHost {
    pub calls: Vec<HostCall>,
    /// Labels of surfaces currently open.
    pub open: HashSet<String>,
    pub reject_urls: bool,
    pub fail_validation: bool,
    pub fail_create: bool,
    pub fail_close: bool,
    pub fail_focus: bool,
    pub fail_load: bool,
}

impl MockSurfaceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of recorded `Load` calls.
    pub fn load_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Load { .. }))
            .count()
    }

    /// Count of recorded `Close` calls.
    pub fn close_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Close(_)))
            .count()
    }

    /// URL of the most recent `Load` call.
    pub fn last_loaded(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::Load { url, .. } => Some(url.as_str()),
            _ => None,
        })
    }

    /// Simulate the user or OS destroying a window behind the shell's back.
    pub fn vanish(&mut self, handle: &SurfaceHandle) {
        self.open.remove(handle.label());
    }
}

impl SurfaceHost for MockSurfaceHost {
    fn validate_url(&self, url: &str) -> Result<bool> {
        if self.fail_validation {
            return Err(ShellError::SurfaceOperation("validator offline".into()));
        }
        Ok(!self.reject_urls && crate::surface::is_web_url(url))
    }

    fn create_surface(&mut self, handle: &SurfaceHandle, config: &SurfaceConfig) -> Result<()> {
        self.calls.push(HostCall::Create {
            label: handle.label().to_string(),
            url: config.url.clone(),
        });
        if self.fail_create {
            return Err(ShellError::SurfaceOperation("no display".into()));
        }
        self.open.insert(handle.label().to_string());
        Ok(())
    }

    fn close_surface(&mut self, handle: &SurfaceHandle) -> Result<bool> {
        self.calls.push(HostCall::Close(handle.label().to_string()));
        if self.fail_close {
            return Err(ShellError::SurfaceOperation("close refused".into()));
        }
        Ok(self.open.remove(handle.label()))
    }

    fn focus_surface(&mut self, handle: &SurfaceHandle) -> Result<bool> {
        self.calls.push(HostCall::Focus(handle.label().to_string()));
        if self.fail_focus {
            return Err(ShellError::SurfaceOperation("focus refused".into()));
        }
        Ok(self.open.contains(handle.label()))
    }

    fn load_in_surface(&mut self, handle: &SurfaceHandle, url: &str) -> Result<()> {
        self.calls.push(HostCall::Load {
            label: handle.label().to_string(),
            url: url.to_string(),
        });
        if self.fail_load {
            return Err(ShellError::SurfaceOperation("load refused".into()));
        }
        Ok(())
    }
}
