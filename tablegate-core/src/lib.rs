//! tablegate-core: configuration shared by the server and the CLI.

pub mod config;
pub mod error;

pub use config::{DatabaseConfig, ServerSettings, TablegateConfig};
pub use error::{ConfigError, Result};
