use async_trait::async_trait;
use tracing::{info, warn};

use super::{
    client_error, finalize, response_id, state_id, wire_id, ClientSlot, ProviderData, Resource,
};
use crate::envelope::{i32_set, id_set, optional_i32};
use crate::error::{ProviderError, TranslationError};
use crate::schema::{Attribute, Schema, Validator};
use crate::sdk::{DelayProfileResource, Endpoint, Protocol, RequestContext};
use crate::value::Object;

const KIND: &str = "delay_profile";

#[derive(Debug, Default)]
pub struct DelayProfileResourceKind {
    client: ClientSlot,
}

impl DelayProfileResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(plan: &Object) -> Result<DelayProfileResource, TranslationError> {
        let flag = |name: &str| -> Result<bool, TranslationError> {
            Ok(plan.boolean(name)?.into_known().unwrap_or_default())
        };
        Ok(DelayProfileResource {
            id: None,
            enable_usenet: flag("enable_usenet")?,
            enable_torrent: flag("enable_torrent")?,
            preferred_protocol: plan
                .string("preferred_protocol")?
                .into_known()
                .and_then(|p| Protocol::parse(&p)),
            usenet_delay: optional_i32(plan, "usenet_delay")?.unwrap_or_default(),
            torrent_delay: optional_i32(plan, "torrent_delay")?.unwrap_or_default(),
            bypass_if_highest_quality: flag("bypass_if_highest_quality")?,
            order: optional_i32(plan, "order")?.unwrap_or_default(),
            tags: i32_set(plan, "tags")?,
        })
    }

    fn decode(&self, profile: &DelayProfileResource) -> Result<Object, ProviderError> {
        let object = Object::new()
            .with("id", response_id(profile.id)?)
            .with("enable_usenet", profile.enable_usenet)
            .with("enable_torrent", profile.enable_torrent)
            .with(
                "preferred_protocol",
                profile
                    .preferred_protocol
                    .filter(|p| *p != Protocol::Unknown)
                    .map(|p| p.as_str()),
            )
            .with("usenet_delay", profile.usenet_delay)
            .with("torrent_delay", profile.torrent_delay)
            .with("bypass_if_highest_quality", profile.bypass_if_highest_quality)
            .with("order", profile.order)
            .with("tags", id_set(&profile.tags));
        Ok(finalize(&self.schema(), object))
    }
}

#[async_trait]
impl Resource for DelayProfileResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Delay Profile resource.\nFor more information refer to [Delay Profiles](https://wiki.servarr.com/sonarr/settings#delay-profiles).",
        )
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe("Delay Profile ID."),
        )
        .attribute(
            "enable_usenet",
            Attribute::bool().optional().computed().describe("Usenet allowed flag."),
        )
        .attribute(
            "enable_torrent",
            Attribute::bool().optional().computed().describe("Torrent allowed flag."),
        )
        .attribute(
            "bypass_if_highest_quality",
            Attribute::bool()
                .optional()
                .computed()
                .describe("Bypass for highest quality flag."),
        )
        .attribute(
            "usenet_delay",
            Attribute::int64().optional().computed().describe("Usenet delay."),
        )
        .attribute(
            "torrent_delay",
            Attribute::int64().optional().computed().describe("Torrent delay."),
        )
        .attribute(
            "order",
            Attribute::int64().optional().computed().describe("Order."),
        )
        .attribute(
            "preferred_protocol",
            Attribute::string()
                .optional()
                .computed()
                .validator(Validator::one_of_string(&["usenet", "torrent"]))
                .describe("Preferred protocol."),
        )
        .attribute(
            "tags",
            Attribute::int_set()
                .required()
                .describe("List of associated tags."),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let request = Self::request(plan)?;

        let profile: DelayProfileResource = client
            .create(ctx, Endpoint::DelayProfile, &request)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created delay profile id={:?}", profile.id);
        self.decode(&profile)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.get::<DelayProfileResource>(ctx, Endpoint::DelayProfile, id).await {
            Ok(profile) => self.decode(&profile).map(Some),
            Err(e) if e.is_not_found() => {
                warn!("delay profile {} not found, removing from state", id);
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

        let profile: DelayProfileResource = client
            .update(ctx, Endpoint::DelayProfile, id, &request)
            .await
            .map_err(client_error(KIND, "update"))?;

        info!("updated delay profile id={}", id);
        self.decode(&profile)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.delete(ctx, Endpoint::DelayProfile, id).await {
            Ok(()) => {
                info!("deleted delay profile id={}", id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(client_error(KIND, "delete")(e)),
        }
    }
}
