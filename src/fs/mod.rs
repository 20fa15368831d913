//! File system utilities for veila
//!
//! Provides config path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, write_config, write_json};
pub use paths::{get_config_dir, resolve_config_path, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
