//! Error types for veila
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for veila operations
pub type Result<T> = std::result::Result<T, VeilaError>;

/// Shown for failures that carry no message meant for a user
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Main error type for all veila operations
#[derive(Debug, Error)]
pub enum VeilaError {
    /// Input rejected before any request was sent
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The API answered with a non-2xx status
    #[error("Request rejected ({status}): {message}")]
    Remote { status: u16, message: String },

    /// A milestone or task missing from the list the API returned
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request never produced an API answer
    #[error("Network error: {0}")]
    Network(String),

    /// Status change refused by the client-side gate
    #[error("State transition error: {0}")]
    StateTransition(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation was interrupted (e.g., by SIGINT)
    #[error("Operation interrupted")]
    Interrupted,

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl VeilaError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            VeilaError::Validation { .. } => "VALIDATION",
            VeilaError::Remote { .. } => "REMOTE_REJECTED",
            VeilaError::NotFound(_) => "NOT_FOUND",
            VeilaError::Network(_) => "NETWORK",
            VeilaError::StateTransition(_) => "STATE_TRANSITION",
            VeilaError::InvalidJson(_) => "INVALID_JSON",
            VeilaError::FileNotFound(_) => "FILE_NOT_FOUND",
            VeilaError::ConfigError(_) => "CONFIG_ERROR",
            VeilaError::Interrupted => "INTERRUPTED",
            VeilaError::Io(_) => "IO_ERROR",
            VeilaError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Build a validation error for a form field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        VeilaError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        VeilaError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }

    /// Whether this error was raised before any request left the client
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            VeilaError::Validation { .. }
                | VeilaError::StateTransition(_)
                | VeilaError::NotFound(_)
        )
    }

    /// The text a user should see for this error.
    ///
    /// Server and validation messages are passed through verbatim; anything
    /// unexpected collapses to a generic notice.
    pub fn user_message(&self) -> String {
        match self {
            VeilaError::Validation { message, .. } => message.clone(),
            VeilaError::Remote { message, .. } => message.clone(),
            VeilaError::StateTransition(message) => message.clone(),
            VeilaError::NotFound(message) => message.clone(),
            VeilaError::ConfigError(message) => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &VeilaError) -> i32 {
    match error {
        VeilaError::Interrupted => 130, // Standard Unix exit code for SIGINT
        VeilaError::Validation { .. } | VeilaError::StateTransition(_) => 2,
        _ => 1,
    }
}
