use reqwest::Url;

use super::types::{ResolvedSettings, ServerConfig};
use super::ConfigError;
use crate::sdk::ClientConfig;

/// Validate server configuration
/// Currently validates:
/// - Server port is not 0
pub fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// Turn resolved provider settings into a client configuration.
///
/// Returns `None` when neither `url` nor `api_key` is set: configuration
/// is deferred and resources report an unconfigured client.
pub fn validate_provider_settings(
    settings: &ResolvedSettings,
) -> Result<Option<ClientConfig>, ConfigError> {
    match (settings.url.is_empty(), settings.api_key.is_empty()) {
        (true, true) => return Ok(None),
        (true, false) => {
            return Err(ConfigError::ValidationError(
                "url is required: set it in the provider block or SONARR_URL".to_string(),
            ))
        }
        (false, true) => {
            return Err(ConfigError::ValidationError(
                "api_key is required: set it in the provider block or SONARR_API_KEY".to_string(),
            ))
        }
        (false, false) => {}
    }

    let url = Url::parse(&settings.url)
        .map_err(|e| ConfigError::ValidationError(format!("url is not valid: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "url must use http or https, got {}",
            url.scheme()
        )));
    }

    Ok(Some(ClientConfig {
        url: settings.url.clone(),
        api_key: settings.api_key.clone(),
        extra_headers: settings.extra_headers.clone(),
        get_retries: settings.get_retries,
    }))
}
