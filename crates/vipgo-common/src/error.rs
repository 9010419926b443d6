//! Error types for VIP Go
//!
//! This module defines the common error types used by configuration
//! loading and process bootstrap.

use thiserror::Error;

/// Common result type for VIP Go operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for VIP Go
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error came from the configuration file itself
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Configuration(_))
    }
}
