mod loader;
mod types;
mod validate;

pub use loader::{load_server_config, load_server_config_from_str, resolve_provider_settings};
pub use types::*;
pub use validate::{validate_provider_settings, validate_server_config};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
