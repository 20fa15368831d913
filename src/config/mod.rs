//! Configuration loading

mod loader;

pub use loader::{
    apply_env_overrides, load_config, validate_config, API_TOKEN_ENV_VAR, API_URL_ENV_VAR,
};
