//! Configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::errors::{ClientError, Result};
use crate::common::types::{Category, ShareChannel, TimeWindow};
use crate::strategy::FetchStrategy;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// NYT Most Popular API configuration
    #[serde(default)]
    pub nytimes: NytimesConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// NYT Most Popular API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NytimesConfig {
    /// API key sent as the `api-key` query parameter
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the Most Popular API
    #[serde(default = "default_nytimes_base_url")]
    pub base_url: String,
}

impl Default for NytimesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_nytimes_base_url(),
        }
    }
}

pub(crate) fn default_nytimes_base_url() -> String {
    "https://api.nytimes.com/svc/mostpopular/v2".to_string()
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Category selected at startup (viewed, emailed, shared)
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Time window selected at startup (1, 7 or 30)
    #[serde(default = "default_window")]
    pub default_window: u32,
    /// Channel used for the "shared" category
    #[serde(default = "default_share_channel")]
    pub share_channel: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
            default_category: default_category(),
            default_window: default_window(),
            share_channel: default_share_channel(),
        }
    }
}

impl AppSettings {
    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Build the strategy selected at startup
    pub fn initial_strategy(&self) -> Result<FetchStrategy> {
        let window = TimeWindow::try_from(self.default_window).map_err(ClientError::Configuration)?;
        let category = match self
            .default_category
            .parse::<Category>()
            .map_err(ClientError::Configuration)?
        {
            Category::Shared(_) => Category::Shared(
                self.share_channel
                    .parse::<ShareChannel>()
                    .map_err(ClientError::Configuration)?,
            ),
            other => other,
        };
        Ok(FetchStrategy::new(category, window))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_category() -> String {
    "viewed".to_string()
}

fn default_window() -> u32 {
    7
}

fn default_share_channel() -> String {
    "facebook".to_string()
}

/// API credentials for the Most Popular API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Take the key from configuration, rejecting a missing or blank value
    pub fn from_config(config: &NytimesConfig) -> Result<Self> {
        match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(ClientError::Configuration(
                "missing NYT API key (set NYT_API_KEY or nytimes.api_key)".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
