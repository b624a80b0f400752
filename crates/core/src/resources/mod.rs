//! Reconcilers.
//!
//! Each resource kind implements [`Resource`]: schema publication plus the
//! create/read/update/delete/import lifecycle against the service. The
//! polymorphic categories share one implementation driven by a
//! [`ProviderCodec`]; the remaining kinds are written out by hand.

mod delay_profile;
mod language_profile;
mod polymorphic;
mod quality_profile;
mod remote_path_mapping;
mod root_folder;
mod series;
mod singleton;
mod tag;

pub use delay_profile::DelayProfileResourceKind;
pub use language_profile::LanguageProfileResourceKind;
pub use polymorphic::{GenericCodec, PolymorphicResource, ProviderCodec};
pub use quality_profile::QualityProfileResourceKind;
pub use remote_path_mapping::RemotePathMappingResourceKind;
pub use root_folder::RootFolderResourceKind;
pub use series::SeriesResourceKind;
pub use singleton::{SingletonResource, SingletonSpec, SINGLETONS};
pub use tag::TagResourceKind;

pub(crate) use tag::tag_schema;

use std::any::Any;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ProviderError, TranslationError};
use crate::schema::Schema;
use crate::sdk::{RequestContext, SonarrClient};
use crate::value::{Object, Value};

/// Value the service redacts secrets with.
pub const REDACTED: &str = "********";

/// Opaque value handed to every resource and data source by `Configure`.
#[derive(Clone)]
pub struct ProviderData {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ProviderData {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderData")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A managed resource kind.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Kind without the provider prefix, e.g. `indexer_newznab`.
    fn kind(&self) -> String;

    fn schema(&self) -> Schema;

    /// Store the shared client. `None` means the provider deferred
    /// configuration.
    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError>;

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError>;

    /// `Ok(None)` when the object is gone and should leave state.
    async fn read(&self, ctx: &RequestContext, state: &Object)
        -> Result<Option<Object>, ProviderError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        plan: &Object,
        prior: &Object,
    ) -> Result<Object, ProviderError>;

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError>;

    /// Seed state from an external id. A later read fills in the rest.
    async fn import_state(&self, _ctx: &RequestContext, id: &str) -> Result<Object, ProviderError> {
        let id = parse_import_id(id)?;
        Ok(self.schema().conform(&Object::new().with("id", id)))
    }

    /// Host type name, `<provider>_<kind>`.
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.kind())
    }
}

pub fn parse_import_id(id: &str) -> Result<i64, ProviderError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ProviderError::UnexpectedImportIdentifier(id.to_string()))
}

/// Holds the client a resource or data source was configured with.
#[derive(Debug, Default)]
pub struct ClientSlot {
    client: RwLock<Option<SonarrClient>>,
}

impl ClientSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept provider data; a missing value leaves the slot empty.
    pub fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        let Some(data) = data else {
            return Ok(());
        };
        let client = data
            .downcast_ref::<SonarrClient>()
            .ok_or_else(|| ProviderError::UnexpectedConfigureType(data.type_name().to_string()))?;

        let mut slot = self.client.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(client.clone());
        Ok(())
    }

    /// The configured client, or an `Unconfigured` error naming `kind`.
    pub fn get(&self, kind: &str) -> Result<SonarrClient, ProviderError> {
        self.client
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| ProviderError::Unconfigured(kind.to_string()))
    }
}

/// Sensitive attribute values captured before a call to the service.
#[derive(Debug, Clone, Default)]
pub struct SensitiveSnapshot {
    values: Vec<(String, Value)>,
}

impl SensitiveSnapshot {
    pub fn capture(schema: &Schema, source: &Object) -> Self {
        let values = schema
            .sensitive_names()
            .into_iter()
            .map(|name| (name.to_string(), source.get(name).clone()))
            .filter(|(_, value)| value.is_known())
            .collect();
        Self { values }
    }

    /// Put captured values back where the decoded value is null or
    /// redacted.
    pub fn restore(&self, target: &mut Object) {
        for (name, value) in &self.values {
            if is_redacted(target.get(name)) {
                target.set(name.clone(), value.clone());
            }
        }
    }
}

fn is_redacted(value: &Value) -> bool {
    match value {
        Value::Null | Value::Unknown => true,
        Value::String(s) => !s.is_empty() && s.chars().all(|c| c == '*'),
        _ => false,
    }
}

/// Shape decoded attributes into state: schema attributes only, no
/// unknowns left behind.
pub fn finalize(schema: &Schema, mut object: Object) -> Object {
    object.resolve_unknowns();
    schema.conform(&object)
}

/// Id of an existing object from state.
pub fn state_id(state: &Object) -> Result<i64, ProviderError> {
    state
        .int("id")?
        .into_known()
        .ok_or(ProviderError::Translation(TranslationError::MissingField("id")))
}

/// Wire id from a response.
pub(crate) fn response_id(id: Option<i32>) -> Result<i64, TranslationError> {
    id.map(i64::from).ok_or(TranslationError::MissingField("id"))
}

/// Id from state as sent on the wire.
pub(crate) fn wire_id(id: i64) -> Result<i32, TranslationError> {
    i32::try_from(id).map_err(|_| TranslationError::OutOfRange("id".to_string(), id))
}

/// Map a client failure to a provider error for `kind`.
pub(crate) fn client_error<'a>(
    kind: &'a str,
    operation: &'static str,
) -> impl FnOnce(crate::sdk::ClientError) -> ProviderError + 'a {
    move |source| ProviderError::client(format!("sonarr_{}", kind), operation, source)
}

/// Every resource kind, polymorphic ones first.
pub fn all() -> Vec<Arc<dyn Resource>> {
    let mut resources: Vec<Arc<dyn Resource>> = Vec::new();

    for category in crate::fields::Category::ALL {
        resources.push(Arc::new(PolymorphicResource::new(GenericCodec::new(category))));
    }
    for variant in crate::variants::all() {
        resources.push(Arc::new(PolymorphicResource::new(variant)));
    }

    resources.push(Arc::new(TagResourceKind::new()));
    resources.push(Arc::new(SeriesResourceKind::new()));
    resources.push(Arc::new(RootFolderResourceKind::new()));
    resources.push(Arc::new(DelayProfileResourceKind::new()));
    resources.push(Arc::new(RemotePathMappingResourceKind::new()));
    resources.push(Arc::new(QualityProfileResourceKind::new()));
    resources.push(Arc::new(LanguageProfileResourceKind::new()));
    for spec in SINGLETONS {
        resources.push(Arc::new(SingletonResource::new(*spec)));
    }

    resources
}
