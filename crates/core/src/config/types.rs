use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::value::{Object, ValueError};

/// Provider block as configured by the user. Every value is optional;
/// unset ones fall back to the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<BTreeMap<String, String>>,
}

impl ProviderSettings {
    /// Read the provider block from host attributes. Null and empty values
    /// count as unset.
    pub fn from_object(object: &Object) -> Result<Self, ValueError> {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        Ok(Self {
            url: object.string("url")?.into_known().and_then(non_empty),
            api_key: object.string("api_key")?.into_known().and_then(non_empty),
            extra_headers: object.string_map("extra_headers")?.into_known(),
        })
    }
}

/// Provider settings after merging the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolvedSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
    #[serde(default)]
    pub get_retries: u32,
}

/// Resolved settings with secrets hidden, for responses and logs.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSettings {
    pub url: String,
    pub api_key_configured: bool,
    pub extra_headers: Vec<String>,
    pub get_retries: u32,
}

impl From<&ResolvedSettings> for SanitizedSettings {
    fn from(settings: &ResolvedSettings) -> Self {
        Self {
            url: settings.url.clone(),
            api_key_configured: !settings.api_key.is_empty(),
            extra_headers: settings.extra_headers.keys().cloned().collect(),
            get_retries: settings.get_retries,
        }
    }
}

/// Host channel server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    9797
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
