//! Configuration loading with defaults and environment overrides

use std::path::Path;

use tracing::debug;

use crate::errors::{Result, VeilaError};
use crate::fs;
use crate::schemas::Config;

/// Overrides `api_base_url`
pub const API_URL_ENV_VAR: &str = "VEILA_API_URL";
/// Overrides `api_token`
pub const API_TOKEN_ENV_VAR: &str = "VEILA_API_TOKEN";

/// Load configuration from `path`, falling back to defaults, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = fs::read_config(path)?;
    debug!(path = %path.display(), "loaded config");
    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Apply `VEILA_API_URL` / `VEILA_API_TOKEN` from `lookup`; blank values are ignored.
pub fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(url) = lookup(API_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }
    if let Some(token) = lookup(API_TOKEN_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        config.api_token = Some(token.trim().to_string());
    }
    config
}

/// Reject settings no request could succeed with
pub fn validate_config(config: &Config) -> Result<()> {
    if config.api_base_url.trim().is_empty() {
        return Err(VeilaError::ConfigError("api_base_url must not be empty".to_string()));
    }
    if config.page_size == 0 {
        return Err(VeilaError::ConfigError("page_size must be at least 1".to_string()));
    }
    Ok(())
}
