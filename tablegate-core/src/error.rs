//! Structured error types for tablegate-core.
//!
//! Library consumers get `thiserror` enums; the `tablegate` binary wraps
//! them with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file exists but is not valid TOML for this schema
    #[error("Failed to parse config (invalid TOML): {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is present but unusable
    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Result type alias for tablegate-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid-value error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
