//! Configuration module for ssl-cert-check
//!
//! Handles loading settings from TOML files.

pub mod settings;

pub use settings::{MailSettings, Settings, ToolkitSettings};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from `path` when given, otherwise from the default location
pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load_default(),
    }
}
