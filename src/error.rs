//! Error types for userdir
//!
//! Every failure the fetch path, the config layer and the front ends can hit.

use thiserror::Error;

/// Main error type for userdir operations
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load users: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("GUI error: {0}")]
    Gui(String),
}

/// Result type alias for userdir operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

impl DirectoryError {
    /// Create a status error from a non-2xx response
    pub fn from_status(status: u16, url: &str) -> Self {
        DirectoryError::Status {
            status,
            url: url.to_string(),
        }
    }

    /// Network failure or non-2xx answer, as opposed to a bad payload
    pub fn is_transport(&self) -> bool {
        matches!(self, DirectoryError::Http(_) | DirectoryError::Status { .. })
    }
}
