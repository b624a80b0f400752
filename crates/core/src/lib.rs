pub mod config;
pub mod data_sources;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod sdk;
pub mod testing;
pub mod value;
pub mod variants;

pub use config::{
    load_server_config, load_server_config_from_str, resolve_provider_settings,
    validate_provider_settings, validate_server_config, ConfigError, LogFormat, ProviderSettings,
    ResolvedSettings, SanitizedSettings, ServerConfig,
};
pub use data_sources::DataSource;
pub use error::{Diagnostic, ProviderError, Severity, TranslationError};
pub use provider::{SonarrProvider, PROVIDER_TYPE_NAME};
pub use resources::{parse_import_id, Resource};
pub use schema::{Attribute, AttrType, Plan, Schema};
pub use sdk::{ClientConfig, ClientError, RequestContext, SonarrClient};
pub use value::{Attr, Object, Value, ValueError};
