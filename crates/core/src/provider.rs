//! Provider registry.
//!
//! Owns every resource kind and data source, publishes their schemas under
//! `<type name>_<kind>`, and hands the one configured [`SonarrClient`] to
//! each of them.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{
    resolve_provider_settings, validate_provider_settings, ConfigError, ProviderSettings,
    SanitizedSettings,
};
use crate::data_sources::{self, DataSource};
use crate::error::{Diagnostic, ProviderError};
use crate::resources::{self, ProviderData, Resource};
use crate::schema::{Attribute, Schema, Validator, HTTP_URL};
use crate::sdk::SonarrClient;
use crate::value::Object;

/// Type name every resource and data source is prefixed with.
pub const PROVIDER_TYPE_NAME: &str = "sonarr";

pub struct SonarrProvider {
    type_name: String,
    resources: BTreeMap<String, Arc<dyn Resource>>,
    data_sources: BTreeMap<String, Arc<dyn DataSource>>,
}

impl std::fmt::Debug for SonarrProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SonarrProvider")
            .field("type_name", &self.type_name)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for SonarrProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SonarrProvider {
    pub fn new() -> Self {
        Self::with_type_name(PROVIDER_TYPE_NAME)
    }

    pub fn with_type_name(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let resources = resources::all()
            .into_iter()
            .map(|r| (r.metadata(&type_name), r))
            .collect();
        let data_sources = data_sources::all()
            .into_iter()
            .map(|d| (d.metadata(&type_name), d))
            .collect();
        Self {
            type_name,
            resources,
            data_sources,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Schema of the provider block itself.
    pub fn schema(&self) -> Schema {
        Schema::new("Interact with Sonarr.")
            .attribute(
                "url",
                Attribute::string()
                    .optional()
                    .validator(Validator::matches(&HTTP_URL, "an http(s) URL"))
                    .describe(
                        "Full Sonarr URL with protocol and port (e.g. `https://test.sonarr.tv:8989`). You should NOT supply any path (`/api`), the SDK will use the appropriate paths. Can be specified via the `SONARR_URL` environment variable.",
                    ),
            )
            .attribute(
                "api_key",
                Attribute::string()
                    .optional()
                    .sensitive()
                    .describe(
                        "API key for Sonarr authentication. Can be specified via the `SONARR_API_KEY` environment variable.",
                    ),
            )
            .attribute(
                "extra_headers",
                Attribute::string_map()
                    .optional()
                    .describe("Extra headers to be sent with every request."),
            )
    }

    pub fn resource(&self, type_name: &str) -> Option<Arc<dyn Resource>> {
        self.resources.get(type_name).cloned()
    }

    pub fn data_source(&self, type_name: &str) -> Option<Arc<dyn DataSource>> {
        self.data_sources.get(type_name).cloned()
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &Arc<dyn Resource>)> {
        self.resources.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn data_sources(&self) -> impl Iterator<Item = (&str, &Arc<dyn DataSource>)> {
        self.data_sources.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Resolve the provider block against the environment and build the
    /// client. With neither url nor api key, configuration is deferred and
    /// every kind stays unconfigured.
    pub fn configure(&self, config: &Object) -> Result<SanitizedSettings, ProviderError> {
        let diagnostics = self.schema().validate(config);
        if diagnostics.iter().any(Diagnostic::is_error) {
            return Err(ProviderError::InvalidConfiguration(diagnostics));
        }

        let block = ProviderSettings::from_object(config)?;
        let resolved = resolve_provider_settings(&block).map_err(invalid_settings)?;
        let sanitized = SanitizedSettings::from(&resolved);

        let client = match validate_provider_settings(&resolved).map_err(invalid_settings)? {
            Some(client_config) => Some(SonarrClient::new(&client_config).map_err(|e| {
                ProviderError::InvalidConfiguration(vec![Diagnostic::error(
                    "Unable to Create Sonarr API Client",
                    e.to_string(),
                )])
            })?),
            None => {
                warn!("provider url and api_key are unset, configuration deferred");
                None
            }
        };

        self.configure_with(client)?;
        info!(
            "configured provider {} for {:?}",
            self.type_name, sanitized.url
        );
        Ok(sanitized)
    }

    /// Hand `client` to every resource and data source.
    pub fn configure_with(&self, client: Option<SonarrClient>) -> Result<(), ProviderError> {
        let data = client.map(ProviderData::new);
        for resource in self.resources.values() {
            resource.configure(data.as_ref())?;
        }
        for source in self.data_sources.values() {
            source.configure(data.as_ref())?;
        }
        Ok(())
    }
}

fn invalid_settings(err: ConfigError) -> ProviderError {
    ProviderError::InvalidConfiguration(vec![Diagnostic::error(
        "Invalid Provider Configuration",
        err.to_string(),
    )])
}
