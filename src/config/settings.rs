//! Application settings configuration
//!
//! Defines the toolkit executable and the mail transport used for reports.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Default location of the settings file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// External toolkit settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ToolkitSettings {
    #[serde(default = "default_openssl_path")]
    pub openssl_path: String,
}

fn default_openssl_path() -> String {
    "openssl".to_string()
}

impl Default for ToolkitSettings {
    fn default() -> Self {
        Self {
            openssl_path: default_openssl_path(),
        }
    }
}

/// Email report settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MailSettings {
    #[serde(default = "default_sendmail_path")]
    pub sendmail_path: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_sendmail_path() -> String {
    "sendmail".to_string()
}

fn default_subject() -> String {
    "SSL certificate check warnings".to_string()
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sendmail_path: default_sendmail_path(),
            from: None,
            subject: default_subject(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub toolkit: ToolkitSettings,
    #[serde(default)]
    pub mail: MailSettings,
}

impl Settings {
    /// Load settings from the default config file, or defaults when absent
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new(DEFAULT_CONFIG_PATH);
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.toolkit.openssl_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "toolkit.openssl_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.mail.sendmail_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "mail.sendmail_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
