use async_trait::async_trait;
use tracing::{info, warn};

use super::{
    client_error, finalize, response_id, state_id, wire_id, ClientSlot, ProviderData, Resource,
};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::sdk::{Endpoint, RemotePathMappingResource, RequestContext};
use crate::value::Object;

const KIND: &str = "remote_path_mapping";

#[derive(Debug, Default)]
pub struct RemotePathMappingResourceKind {
    client: ClientSlot,
}

impl RemotePathMappingResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(plan: &Object) -> Result<RemotePathMappingResource, ProviderError> {
        let text = |name: &str| -> Result<String, ProviderError> {
            Ok(plan.string(name)?.into_known().unwrap_or_default())
        };
        Ok(RemotePathMappingResource {
            id: None,
            host: text("host")?,
            remote_path: text("remote_path")?,
            local_path: text("local_path")?,
        })
    }

    fn decode(&self, mapping: &RemotePathMappingResource) -> Result<Object, ProviderError> {
        let object = Object::new()
            .with("id", response_id(mapping.id)?)
            .with("host", mapping.host.clone())
            .with("remote_path", mapping.remote_path.clone())
            .with("local_path", mapping.local_path.clone());
        Ok(finalize(&self.schema(), object))
    }
}

#[async_trait]
impl Resource for RemotePathMappingResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Remote Path Mapping resource.\nFor more information refer to [Remote Path Mapping](https://wiki.servarr.com/sonarr/settings#remote-path-mappings).",
        )
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe("Remote Path Mapping ID."),
        )
        .attribute("host", Attribute::string().required().describe("Download Client host."))
        .attribute(
            "remote_path",
            Attribute::string()
                .required()
                .describe("Download Client remote path."),
        )
        .attribute("local_path", Attribute::string().required().describe("Local path."))
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let request = Self::request(plan)?;

        let mapping: RemotePathMappingResource = client
            .create(ctx, Endpoint::RemotePathMapping, &request)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created remote path mapping id={:?}", mapping.id);
        self.decode(&mapping)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client
            .get::<RemotePathMappingResource>(ctx, Endpoint::RemotePathMapping, id)
            .await
        {
            Ok(mapping) => self.decode(&mapping).map(Some),
            Err(e) if e.is_not_found() => {
                warn!("remote path mapping {} not found, removing from state", id);
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

        let mapping: RemotePathMappingResource = client
            .update(ctx, Endpoint::RemotePathMapping, id, &request)
            .await
            .map_err(client_error(KIND, "update"))?;

        info!("updated remote path mapping id={}", id);
        self.decode(&mapping)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.delete(ctx, Endpoint::RemotePathMapping, id).await {
            Ok(()) => {
                info!("deleted remote path mapping id={}", id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(client_error(KIND, "delete")(e)),
        }
    }
}
