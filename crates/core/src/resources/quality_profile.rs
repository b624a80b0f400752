use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    client_error, finalize, response_id, state_id, wire_id, ClientSlot, ProviderData, Resource,
};
use crate::envelope::{id_set, optional_i32};
use crate::error::{ProviderError, TranslationError};
use crate::schema::{Attribute, Schema};
use crate::sdk::{Endpoint, QualityProfileResource, RequestContext};
use crate::value::Object;

const KIND: &str = "quality_profile";

/// Quality profile resource. Items come from the service template; the
/// typed surface only chooses which of them are allowed.
#[derive(Debug, Default)]
pub struct QualityProfileResourceKind {
    client: ClientSlot,
}

impl QualityProfileResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(plan: &Object, profile: &mut QualityProfileResource) -> Result<(), TranslationError> {
        if let Some(name) = plan.string("name")?.into_known() {
            profile.name = name;
        }
        if let Some(upgrade) = plan.boolean("upgrade_allowed")?.into_known() {
            profile.upgrade_allowed = upgrade;
        }
        if let Some(cutoff) = optional_i32(plan, "cutoff")? {
            profile.cutoff = cutoff;
        }
        if let Some(allowed) = plan.int_set("allowed_qualities")?.into_known() {
            for item in &mut profile.items {
                item.allowed = item
                    .key()
                    .is_some_and(|key| allowed.contains(&i64::from(key)));
            }
        }
        Ok(())
    }

    pub(crate) fn decode(&self, profile: &QualityProfileResource) -> Result<Object, ProviderError> {
        let allowed: Vec<i32> = profile
            .items
            .iter()
            .filter(|item| item.allowed)
            .filter_map(|item| item.key())
            .collect();
        let object = Object::new()
            .with("id", response_id(profile.id)?)
            .with("name", profile.name.clone())
            .with("upgrade_allowed", profile.upgrade_allowed)
            .with("cutoff", profile.cutoff)
            .with("allowed_qualities", id_set(&allowed));
        Ok(finalize(&self.schema(), object))
    }
}

/// Keys of every item offered by a template.
pub(crate) fn item_keys(profile: &QualityProfileResource) -> BTreeSet<i64> {
    profile
        .items
        .iter()
        .filter_map(|item| item.key())
        .map(i64::from)
        .collect()
}

#[async_trait]
impl Resource for QualityProfileResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Quality Profile resource.\nFor more information refer to [Quality Profiles](https://wiki.servarr.com/sonarr/settings#quality-profiles).",
        )
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe("Quality Profile ID."),
        )
        .attribute(
            "name",
            Attribute::string().required().describe("Quality Profile Name."),
        )
        .attribute(
            "upgrade_allowed",
            Attribute::bool()
                .optional()
                .computed()
                .describe("Upgrade allowed flag."),
        )
        .attribute(
            "cutoff",
            Attribute::int64()
                .required()
                .describe("Quality or quality group ID to stop upgrading at."),
        )
        .attribute(
            "allowed_qualities",
            Attribute::int_set()
                .required()
                .describe("Allowed quality and quality group IDs."),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;

        let mut profile: QualityProfileResource = client
            .schema_template(ctx, Endpoint::QualityProfile)
            .await
            .map_err(client_error(KIND, "create"))?;
        debug!("quality profile template offers {:?}", item_keys(&profile));

        Self::apply(plan, &mut profile)?;
        profile.id = None;

        let created: QualityProfileResource = client
            .create(ctx, Endpoint::QualityProfile, &profile)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created quality profile {:?} id={:?}", created.name, created.id);
        self.decode(&created)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client
            .get::<QualityProfileResource>(ctx, Endpoint::QualityProfile, id)
            .await
        {
            Ok(profile) => self.decode(&profile).map(Some),
            Err(e) if e.is_not_found() => {
                warn!("quality profile {} not found, removing from state", id);
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

        let mut profile: QualityProfileResource = client
            .get(ctx, Endpoint::QualityProfile, id)
            .await
            .map_err(client_error(KIND, "update"))?;
        Self::apply(plan, &mut profile)?;
        profile.id = Some(wire_id(id)?);

        let updated: QualityProfileResource = client
            .update(ctx, Endpoint::QualityProfile, id, &profile)
            .await
            .map_err(client_error(KIND, "update"))?;

        info!("updated quality profile id={}", id);
        self.decode(&updated)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.delete(ctx, Endpoint::QualityProfile, id).await {
            Ok(()) => {
                info!("deleted quality profile id={}", id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(client_error(KIND, "delete")(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{Quality, QualityProfileItem};
    use crate::value::Value;

    fn template() -> QualityProfileResource {
        QualityProfileResource {
            items: vec![
                QualityProfileItem {
                    quality: Some(Quality {
                        id: 1,
                        name: "SDTV".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                QualityProfileItem {
                    id: Some(1000),
                    name: Some("WEB 1080p".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_marks_allowed_items() {
        let mut profile = template();
        let plan = Object::new()
            .with("name", "HD")
            .with("cutoff", 1000_i64)
            .with("allowed_qualities", Value::Set(vec![Value::Int(1000)]));

        QualityProfileResourceKind::apply(&plan, &mut profile).unwrap();
        assert_eq!(profile.name, "HD");
        assert_eq!(profile.cutoff, 1000);
        assert!(!profile.items[0].allowed);
        assert!(profile.items[1].allowed);
        assert_eq!(item_keys(&profile), BTreeSet::from([1, 1000]));
    }

    #[test]
    fn test_decode_collects_allowed_keys() {
        let mut profile = template();
        profile.id = Some(4);
        profile.items[0].allowed = true;

        let state = QualityProfileResourceKind::new().decode(&profile).unwrap();
        assert_eq!(state.get("allowed_qualities"), &Value::Set(vec![Value::Int(1)]));
        assert_eq!(state.get("id"), &Value::Int(4));
    }
}
