//! Config schema - Configuration for the veila client

use serde::{Deserialize, Serialize};

/// Main configuration for veila
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the marketplace API (e.g., "https://api.veila.example/v1")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with every request, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Page size used when listing milestones and tasks
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout_seconds() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            api_token: None,
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    /// Copy of this config safe to print: the token is masked
    pub fn redacted(&self) -> Config {
        Config {
            api_token: self.api_token.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}
