//! Path resolution utilities for veila
//!
//! Locates the configuration file.

use std::path::{Path, PathBuf};

use crate::errors::{Result, VeilaError};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VEILA_CONFIG";

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Get the per-user veila config directory (e.g. `~/.config/veila`).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("veila"))
        .ok_or_else(|| {
            VeilaError::ConfigError("Could not determine the user config directory".to_string())
        })
}

/// Resolve which config file to use.
///
/// `explicit` is the `--config` flag, which clap also fills from
/// `$VEILA_CONFIG`. Without it the file lives at `<config dir>/veila/config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.to_path_buf()),
        _ => Ok(get_config_dir()?.join(CONFIG_FILE_NAME)),
    }
}
