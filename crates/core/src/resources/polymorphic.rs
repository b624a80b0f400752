//! Reconciler shared by download clients, indexers, notifications,
//! metadata consumers and import lists.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    client_error, finalize, state_id, wire_id, ClientSlot, ProviderData, Resource, SensitiveSnapshot,
};
use crate::envelope::{decode_envelope, encode_envelope, envelope_schema, Identity};
use crate::error::{ProviderError, TranslationError};
use crate::fields::{decode_fields, encode_fields, Category, FieldBinding};
use crate::schema::{Attribute, Schema, Validator};
use crate::sdk::{ProviderResource, Protocol, RequestContext};
use crate::value::Object;
use crate::variants::VariantSpec;

/// Translation between typed attributes and a provider object.
pub trait ProviderCodec: Send + Sync {
    fn category(&self) -> Category;

    fn kind(&self) -> String;

    fn schema(&self) -> Schema;

    fn to_resource(&self, typed: &Object) -> Result<ProviderResource, TranslationError>;

    fn from_resource(
        &self,
        resource: &ProviderResource,
        typed: &mut Object,
    ) -> Result<(), TranslationError>;
}

impl ProviderCodec for &'static VariantSpec {
    fn category(&self) -> Category {
        self.category
    }

    fn kind(&self) -> String {
        self.resource_kind()
    }

    fn schema(&self) -> Schema {
        VariantSpec::schema(self)
    }

    fn to_resource(&self, typed: &Object) -> Result<ProviderResource, TranslationError> {
        VariantSpec::to_resource(self, typed)
    }

    fn from_resource(
        &self,
        resource: &ProviderResource,
        typed: &mut Object,
    ) -> Result<(), TranslationError> {
        VariantSpec::from_resource(self, resource, typed)
    }
}

/// Any member of a category, with the discriminators supplied by
/// configuration and every catalogue field exposed.
#[derive(Debug, Clone)]
pub struct GenericCodec {
    category: Category,
    bindings: Vec<FieldBinding>,
}

impl GenericCodec {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            bindings: category.catalogue().bindings(),
        }
    }

    fn identity(&self, typed: &Object) -> Result<Identity, TranslationError> {
        let protocol = match typed.string("protocol")?.into_known() {
            Some(p) if self.category.has_protocol() => Protocol::parse(&p),
            _ => None,
        };
        Ok(Identity {
            implementation: typed.string("implementation")?.into_known().unwrap_or_default(),
            config_contract: typed.string("config_contract")?.into_known().unwrap_or_default(),
            protocol,
        })
    }
}

impl ProviderCodec for GenericCodec {
    fn category(&self) -> Category {
        self.category
    }

    fn kind(&self) -> String {
        self.category.kind().to_string()
    }

    fn schema(&self) -> Schema {
        let title = self.category.title();
        let mut schema = envelope_schema(
            self.category,
            format!(
                "Generic {} resource. When possible use a specific resource instead.\nFor more information refer to [{}](https://wiki.servarr.com/sonarr/settings).",
                title.to_lowercase(),
                title,
            ),
        );

        schema.insert(
            "implementation",
            Attribute::string()
                .required()
                .requires_replace()
                .describe(format!("{} implementation name.", title)),
        );
        schema.insert(
            "config_contract",
            Attribute::string()
                .required()
                .requires_replace()
                .describe(format!("{} configuration template.", title)),
        );
        if self.category.has_protocol() {
            schema.insert(
                "protocol",
                Attribute::string()
                    .required()
                    .requires_replace()
                    .validator(Validator::one_of_string(&["usenet", "torrent"]))
                    .describe("Protocol. Valid values are 'usenet' and 'torrent'."),
            );
        }

        for binding in &self.bindings {
            let attribute = binding.kind.attribute().optional();
            let attribute = if binding.sensitive {
                attribute.sensitive()
            } else {
                attribute.computed()
            };
            schema.insert(
                binding.attribute.clone(),
                attribute.describe(format!("`{}` field.", binding.field)),
            );
        }
        schema
    }

    fn to_resource(&self, typed: &Object) -> Result<ProviderResource, TranslationError> {
        let mut resource = encode_envelope(self.category, typed, &self.identity(typed)?)?;
        resource.fields = encode_fields(&self.bindings, typed)?;
        Ok(resource)
    }

    fn from_resource(
        &self,
        resource: &ProviderResource,
        typed: &mut Object,
    ) -> Result<(), TranslationError> {
        decode_envelope(self.category, resource, typed);
        typed.set("implementation", resource.implementation.clone());
        typed.set("config_contract", resource.config_contract.clone());
        if self.category.has_protocol() {
            if let Some(protocol) = resource.protocol.filter(|p| *p != Protocol::Unknown) {
                typed.set("protocol", protocol.as_str());
            }
        }
        decode_fields(&self.bindings, &resource.fields, typed)
    }
}

/// Reconciler for one provider codec.
pub struct PolymorphicResource<C> {
    codec: C,
    schema: Schema,
    client: ClientSlot,
}

impl<C: ProviderCodec> PolymorphicResource<C> {
    pub fn new(codec: C) -> Self {
        let schema = codec.schema();
        Self {
            codec,
            schema,
            client: ClientSlot::new(),
        }
    }

    /// Decode a response on top of `base`, then put back sensitive values
    /// captured from `base`.
    fn decode(&self, resource: &ProviderResource, base: &Object) -> Result<Object, ProviderError> {
        let snapshot = SensitiveSnapshot::capture(&self.schema, base);
        let mut typed = base.clone();
        self.codec.from_resource(resource, &mut typed)?;
        snapshot.restore(&mut typed);
        Ok(finalize(&self.schema, typed))
    }
}

#[async_trait]
impl<C: ProviderCodec> Resource for PolymorphicResource<C> {
    fn kind(&self) -> String {
        self.codec.kind()
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let kind = self.kind();
        let client = self.client.get(&kind)?;

        let mut request = self.codec.to_resource(plan)?;
        request.id = None;
        debug!("creating {} {:?}", kind, request.name);

        let response: ProviderResource = client
            .create(ctx, self.codec.category().endpoint(), &request)
            .await
            .map_err(client_error(&kind, "create"))?;

        info!("created {} id={:?}", kind, response.id);
        self.decode(&response, plan)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let kind = self.kind();
        let client = self.client.get(&kind)?;
        let id = state_id(state)?;

        let response: ProviderResource =
            match client.get(ctx, self.codec.category().endpoint(), id).await {
                Ok(response) => response,
                Err(e) if e.is_not_found() => {
                    warn!("{} {} not found, removing from state", kind, id);
                    return Ok(None);
                }
                Err(e) => return Err(client_error(&kind, "read")(e)),
            };

        debug!("read {} id={}", kind, id);
        self.decode(&response, state).map(Some)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        plan: &Object,
        prior: &Object,
    ) -> Result<Object, ProviderError> {
        let kind = self.kind();
        let client = self.client.get(&kind)?;
        let id = state_id(prior)?;

        let mut request = self.codec.to_resource(plan)?;
        request.id = Some(wire_id(id)?);

        let response: ProviderResource = client
            .update(ctx, self.codec.category().endpoint(), id, &request)
            .await
            .map_err(client_error(&kind, "update"))?;

        info!("updated {} id={}", kind, id);
        self.decode(&response, plan)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let kind = self.kind();
        let client = self.client.get(&kind)?;
        let id = state_id(state)?;

        match client.delete(ctx, self.codec.category().endpoint(), id).await {
            Ok(()) => {
                info!("deleted {} id={}", kind, id);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("{} {} already gone", kind, id);
                Ok(())
            }
            Err(e) => Err(client_error(&kind, "delete")(e)),
        }
    }
}
