use async_trait::async_trait;
use tracing::{info, warn};

use super::{client_error, finalize, response_id, state_id, ClientSlot, ProviderData, Resource};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema, Validator, ABSOLUTE_PATH};
use crate::sdk::{Endpoint, RequestContext, RootFolderResource};
use crate::value::Object;

const KIND: &str = "root_folder";

/// Root folder resource. Every change to `path` replaces the folder.
#[derive(Debug, Default)]
pub struct RootFolderResourceKind {
    client: ClientSlot,
}

impl RootFolderResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn decode(&self, folder: &RootFolderResource) -> Result<Object, ProviderError> {
        let object = Object::new()
            .with("id", response_id(folder.id)?)
            .with("path", folder.path.clone())
            .with("accessible", folder.accessible);
        Ok(finalize(&self.schema(), object))
    }
}

#[async_trait]
impl Resource for RootFolderResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Root Folder resource.\nFor more information refer to [Root Folders](https://wiki.servarr.com/sonarr/settings#root-folders).",
        )
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe("Root Folder ID."),
        )
        .attribute(
            "path",
            Attribute::string()
                .required()
                .requires_replace()
                .validator(Validator::matches(&ABSOLUTE_PATH, "an absolute path"))
                .describe("Root Folder absolute path."),
        )
        .attribute(
            "accessible",
            Attribute::bool().computed().describe("Access flag."),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let request = RootFolderResource {
            path: plan.string("path")?.into_known().unwrap_or_default(),
            ..Default::default()
        };

        let folder: RootFolderResource = client
            .create(ctx, Endpoint::RootFolder, &request)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created root folder {:?} id={:?}", folder.path, folder.id);
        self.decode(&folder)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.get::<RootFolderResource>(ctx, Endpoint::RootFolder, id).await {
            Ok(folder) => self.decode(&folder).map(Some),
            Err(e) if e.is_not_found() => {
                warn!("root folder {} not found, removing from state", id);
                Ok(None)
            }
            Err(e) => Err(client_error(KIND, "read")(e)),
        }
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        _plan: &Object,
        _prior: &Object,
    ) -> Result<Object, ProviderError> {
        Err(ProviderError::Unsupported(
            "root folders cannot be updated in place; changing path replaces the folder"
                .to_string(),
        ))
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.delete(ctx, Endpoint::RootFolder, id).await {
            Ok(()) => {
                info!("deleted root folder id={}", id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(client_error(KIND, "delete")(e)),
        }
    }
}
