//! Read-only lookups.
//!
//! A data source takes a lookup key from configuration and fills every other
//! attribute from the service. Apart from the key, its schema is
//! computed-only.

mod lookup;
mod system_status;
mod tag;

pub use lookup::{
    ProviderByNameDataSource, QualityProfileDataSource, RootFolderDataSource, SeriesDataSource,
};
pub use system_status::SystemStatusDataSource;
pub use tag::{TagDataSource, TagsDataSource};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::fields::Category;
use crate::resources::ProviderData;
use crate::schema::{Attribute, Schema};
use crate::sdk::RequestContext;
use crate::value::Object;

#[async_trait]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> String;

    fn schema(&self) -> Schema;

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError>;

    /// Resolve the lookup key in `config` into a full state object.
    async fn read(&self, ctx: &RequestContext, config: &Object) -> Result<Object, ProviderError>;

    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.kind())
    }
}

/// Turn a resource schema into a data source schema: `key` becomes the
/// required lookup attribute, everything else is set by the service.
pub fn computed_schema(resource: &Schema, key: &str, description: impl Into<String>) -> Schema {
    let mut schema = Schema::new(description);
    for (name, attribute) in resource.iter() {
        let mut attribute = Attribute {
            required: false,
            optional: false,
            computed: true,
            default: None,
            plan_modifiers: Vec::new(),
            validators: Vec::new(),
            ..attribute.clone()
        };
        if name == key {
            attribute.required = true;
            attribute.computed = false;
        }
        schema.insert(name, attribute);
    }
    schema
}

/// Exactly one match, or `NotFound` naming what was searched for.
pub(crate) fn single<T>(
    items: impl IntoIterator<Item = T>,
    kind: &str,
    key: &str,
    wanted: &str,
    matches: impl Fn(&T) -> bool,
) -> Result<T, ProviderError> {
    items.into_iter().find(|item| matches(item)).ok_or_else(|| {
        ProviderError::NotFound(format!("no {} with {} \"{}\"", kind, key, wanted))
    })
}

/// Every data source the provider offers.
pub fn all() -> Vec<Arc<dyn DataSource>> {
    vec![
        Arc::new(TagDataSource::new()),
        Arc::new(TagsDataSource::new()),
        Arc::new(SystemStatusDataSource::new()),
        Arc::new(SeriesDataSource::new()),
        Arc::new(RootFolderDataSource::new()),
        Arc::new(QualityProfileDataSource::new()),
        Arc::new(ProviderByNameDataSource::new(Category::DownloadClient)),
        Arc::new(ProviderByNameDataSource::new(Category::Indexer)),
    ]
}
