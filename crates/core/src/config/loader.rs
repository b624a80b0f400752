use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment, Provider,
};
use std::path::Path;

use super::types::{ProviderSettings, ResolvedSettings, ServerConfig};
use super::ConfigError;

const PROVIDER_KEYS: &[&str] = &["url", "api_key", "extra_headers", "get_retries"];
const SERVER_KEYS: &[&str] = &["host", "port", "log_format"];

/// Merge the provider block over `SONARR_*` environment variables.
///
/// `SONARR_EXTRA_HEADERS` uses figment dict syntax, e.g.
/// `{X-Forwarded-User=admin}`.
pub fn resolve_provider_settings(block: &ProviderSettings) -> Result<ResolvedSettings, ConfigError> {
    resolve_from(Env::prefixed("SONARR_").only(PROVIDER_KEYS), block)
}

fn resolve_from(env: impl Provider, block: &ProviderSettings) -> Result<ResolvedSettings, ConfigError> {
    Figment::new()
        .merge(env)
        .merge(Serialized::defaults(block))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load server configuration from an optional file with
/// `SONARR_PROVIDER_*` environment overrides.
pub fn load_server_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut figment = Figment::new().merge(Serialized::defaults(ServerConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed("SONARR_PROVIDER_").only(SERVER_KEYS))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load server configuration from TOML string (useful for testing)
pub fn load_server_config_from_str(toml_str: &str) -> Result<ServerConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
