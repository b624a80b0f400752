use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    client_error, finalize, response_id, state_id, wire_id, ClientSlot, ProviderData, Resource,
};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::sdk::{Endpoint, RequestContext, TagResource};
use crate::value::Object;

const KIND: &str = "tag";

/// Tag resource. The only kind that creates or removes tags.
#[derive(Debug, Default)]
pub struct TagResourceKind {
    client: ClientSlot,
}

impl TagResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(plan: &Object) -> Result<TagResource, ProviderError> {
        Ok(TagResource {
            id: None,
            label: plan.string("label")?.into_known().unwrap_or_default(),
        })
    }

    fn decode(&self, tag: &TagResource) -> Result<Object, ProviderError> {
        let object = Object::new()
            .with("id", response_id(tag.id)?)
            .with("label", tag.label.clone());
        Ok(finalize(&self.schema(), object))
    }
}

pub(crate) fn tag_schema() -> Schema {
    Schema::new(
        "Tag resource.\nFor more information refer to [Tags](https://wiki.servarr.com/sonarr/settings#tags).",
    )
    .attribute(
        "id",
        Attribute::int64()
            .computed()
            .use_state_for_unknown()
            .describe("Tag ID."),
    )
    .attribute(
        "label",
        Attribute::string().required().describe("Tag label. It must be lowercase."),
    )
}

#[async_trait]
impl Resource for TagResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        tag_schema()
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let request = Self::request(plan)?;

        let tag: TagResource = client
            .create(ctx, Endpoint::Tag, &request)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created tag {:?} id={:?}", tag.label, tag.id);
        self.decode(&tag)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.get::<TagResource>(ctx, Endpoint::Tag, id).await {
            Ok(tag) => {
                debug!("read tag id={}", id);
                self.decode(&tag).map(Some)
            }
            Err(e) if e.is_not_found() => {
                warn!("tag {} not found, removing from state", id);
                Ok(None)
            }
            Err(e) => Err(client_error(KIND, "read")(e)),
        }
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        plan: &Object,
        prior: &Object,
    ) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(prior)?;
        let mut request = Self::request(plan)?;
        request.id = Some(wire_id(id)?);

        let tag: TagResource = client
            .update(ctx, Endpoint::Tag, id, &request)
            .await
            .map_err(client_error(KIND, "update"))?;

        info!("updated tag id={}", id);
        self.decode(&tag)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.delete(ctx, Endpoint::Tag, id).await {
            Ok(()) => {
                info!("deleted tag id={}", id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(client_error(KIND, "delete")(e)),
        }
    }
}
