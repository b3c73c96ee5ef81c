use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::DisplayZone;
use crate::sync::google_api::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "CONF_SCHEDULE_API_KEY";
pub const CALENDAR_ID_VAR: &str = "CONF_SCHEDULE_CALENDAR_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Missing configuration value: {0}")]
    MissingValue(&'static str),
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("calendar_id", &self.calendar_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub header: String,
    /// "local" or an IANA zone name such as "America/Phoenix".
    pub time_zone: String,
    pub theme: String,
    pub show_fetch_errors: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            calendar_id: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            header: "SHPE Conference 2026".to_string(),
            time_zone: "local".to_string(),
            theme: "default".to_string(),
            show_fetch_errors: false,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Loads the config file (creating it with defaults when absent), then applies
    /// `.env` and process environment overrides for the secrets.
    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        dotenvy::dotenv().ok();
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_key) = lookup(API_KEY_VAR).filter(|v| !v.is_empty()) {
            self.google.api_key = api_key;
        }
        if let Some(calendar_id) = lookup(CALENDAR_ID_VAR).filter(|v| !v.is_empty()) {
            self.google.calendar_id = calendar_id;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google.api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("google.api_key"));
        }
        if self.google.calendar_id.trim().is_empty() {
            return Err(ConfigError::MissingValue("google.calendar_id"));
        }
        self.display_zone()?;
        Ok(())
    }

    pub fn display_zone(&self) -> Result<DisplayZone, ConfigError> {
        self.ui
            .time_zone
            .parse::<DisplayZone>()
            .map_err(ConfigError::InvalidTimeZone)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("conf-schedule")
            .join("config.toml")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}
