use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use super::{computed_schema, single, DataSource};
use crate::error::{ProviderError, TranslationError};
use crate::resources::{client_error, tag_schema, ClientSlot, ProviderData};
use crate::schema::{Attribute, Schema};
use crate::sdk::{Endpoint, RequestContext, TagResource};
use crate::value::Object;

/// Single tag by label.
#[derive(Debug, Default)]
pub struct TagDataSource {
    client: ClientSlot,
}

impl TagDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for TagDataSource {
    fn kind(&self) -> String {
        "tag".to_string()
    }

    fn schema(&self) -> Schema {
        computed_schema(&tag_schema(), "label", "Single Tag, looked up by label.")
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, config: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get("tag")?;
        let label = config
            .string("label")?
            .into_known()
            .ok_or(TranslationError::MissingField("label"))?;

        let tags: Vec<TagResource> = client
            .list(ctx, Endpoint::Tag)
            .await
            .map_err(client_error("tag", "read"))?;
        let tag = single(tags, "tag", "label", &label, |t| t.label == label)?;

        debug!("tag {:?} resolved to {:?}", label, tag.id);
        Ok(self
            .schema()
            .conform(&Object::new().with("id", tag.id).with("label", tag.label)))
    }
}

/// Every tag, as a label to id map.
#[derive(Debug, Default)]
pub struct TagsDataSource {
    client: ClientSlot,
}

impl TagsDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for TagsDataSource {
    fn kind(&self) -> String {
        "tags".to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new("List all available Tags.").attribute(
            "tags",
            Attribute::int_map()
                .computed()
                .describe("Tag IDs keyed by label."),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, _config: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get("tags")?;
        let tags: Vec<TagResource> = client
            .list(ctx, Endpoint::Tag)
            .await
            .map_err(client_error("tags", "read"))?;

        let by_label: BTreeMap<String, i64> = tags
            .into_iter()
            .filter_map(|t| t.id.map(|id| (t.label, i64::from(id))))
            .collect();
        Ok(Object::new().with("tags", by_label))
    }
}
