//! Foundation types for xbrowser.
//!
//! Shared by every xbrowser crate: the error enum with its `Result`
//! alias, and the TOML-backed shell configuration.

pub mod config;
pub mod error;
