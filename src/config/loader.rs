//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{default_nytimes_base_url, AppConfig, AppSettings, NytimesConfig};
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables prefixed with NYT_ (e.g. NYT_API_KEY)
/// 2. Environment variables prefixed with APP__ (e.g. APP__SETTINGS__LOG_LEVEL)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    apply_nyt_env(&mut app_config.nytimes);
    Ok(app_config)
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut nytimes = NytimesConfig {
        api_key: None,
        base_url: default_nytimes_base_url(),
    };
    apply_nyt_env(&mut nytimes);

    Ok(AppConfig {
        nytimes,
        settings: AppSettings::default(),
    })
}

/// Overlay the NYT_* variables on top of whatever the other sources produced
fn apply_nyt_env(nytimes: &mut NytimesConfig) {
    if let Ok(key) = std::env::var("NYT_API_KEY") {
        nytimes.api_key = Some(key);
    }
    if let Ok(url) = std::env::var("NYT_BASE_URL") {
        nytimes.base_url = url;
    }
}
