use async_trait::async_trait;
use tracing::{info, warn};

use super::{
    client_error, finalize, response_id, state_id, wire_id, ClientSlot, ProviderData, Resource,
};
use crate::error::{Diagnostic, ProviderError};
use crate::schema::{Attribute, Schema};
use crate::sdk::{Endpoint, LanguageProfileResource, RequestContext};
use crate::value::{Object, Value};

const KIND: &str = "language_profile";

/// Language profile resource, addressed by language names.
#[derive(Debug, Default)]
pub struct LanguageProfileResourceKind {
    client: ClientSlot,
}

impl LanguageProfileResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(plan: &Object, profile: &mut LanguageProfileResource) -> Result<(), ProviderError> {
        if let Some(name) = plan.string("name")?.into_known() {
            profile.name = name;
        }
        if let Some(upgrade) = plan.boolean("upgrade_allowed")?.into_known() {
            profile.upgrade_allowed = upgrade;
        }
        if let Some(allowed) = plan.string_set("languages")?.into_known() {
            for item in &mut profile.languages {
                item.allowed = allowed.contains(&item.language.name);
            }
        }
        if let Some(cutoff) = plan.string("cutoff")?.into_known() {
            profile.cutoff = profile
                .languages
                .iter()
                .map(|item| &item.language)
                .find(|language| language.name == cutoff)
                .cloned()
                .ok_or_else(|| {
                    ProviderError::InvalidConfiguration(vec![Diagnostic::error(
                        "Invalid Attribute Value",
                        format!("language \"{}\" is not offered by the service", cutoff),
                    )
                    .at("cutoff")])
                })?;
        }
        Ok(())
    }

    fn decode(&self, profile: &LanguageProfileResource) -> Result<Object, ProviderError> {
        let languages = Value::set_of(
            profile
                .languages
                .iter()
                .filter(|item| item.allowed)
                .map(|item| Value::from(item.language.name.as_str())),
        );
        let object = Object::new()
            .with("id", response_id(profile.id)?)
            .with("name", profile.name.clone())
            .with("upgrade_allowed", profile.upgrade_allowed)
            .with("cutoff", profile.cutoff.name.clone())
            .with("languages", languages);
        Ok(finalize(&self.schema(), object))
    }
}

#[async_trait]
impl Resource for LanguageProfileResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Language Profile resource.\nFor more information refer to [Language Profiles](https://wiki.servarr.com/sonarr/settings#language-profiles).",
        )
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe("Language Profile ID."),
        )
        .attribute(
            "name",
            Attribute::string().required().describe("Language Profile name."),
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
            Attribute::string().required().describe("Name of the cutoff language."),
        )
        .attribute(
            "languages",
            Attribute::string_set()
                .required()
                .describe("Names of the allowed languages."),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;

        let mut profile: LanguageProfileResource = client
            .schema_template(ctx, Endpoint::LanguageProfile)
            .await
            .map_err(client_error(KIND, "create"))?;
        Self::apply(plan, &mut profile)?;
        profile.id = None;

        let created: LanguageProfileResource = client
            .create(ctx, Endpoint::LanguageProfile, &profile)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created language profile {:?} id={:?}", created.name, created.id);
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
            .get::<LanguageProfileResource>(ctx, Endpoint::LanguageProfile, id)
            .await
        {
            Ok(profile) => self.decode(&profile).map(Some),
            Err(e) if e.is_not_found() => {
                warn!("language profile {} not found, removing from state", id);
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

        let mut profile: LanguageProfileResource = client
            .get(ctx, Endpoint::LanguageProfile, id)
            .await
            .map_err(client_error(KIND, "update"))?;
        Self::apply(plan, &mut profile)?;
        profile.id = Some(wire_id(id)?);

        let updated: LanguageProfileResource = client
            .update(ctx, Endpoint::LanguageProfile, id, &profile)
            .await
            .map_err(client_error(KIND, "update"))?;

        info!("updated language profile id={}", id);
        self.decode(&updated)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.delete(ctx, Endpoint::LanguageProfile, id).await {
            Ok(()) => {
                info!("deleted language profile id={}", id);
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
    use crate::sdk::{Language, LanguageProfileItem};

    fn template() -> LanguageProfileResource {
        let item = |id, name: &str| LanguageProfileItem {
            language: Language {
                id,
                name: name.to_string(),
            },
            allowed: false,
        };
        LanguageProfileResource {
            languages: vec![item(1, "English"), item(2, "French"), item(8, "Japanese")],
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_sets_allowed_and_cutoff() {
        let mut profile = template();
        let plan = Object::new()
            .with("name", "Anime")
            .with("cutoff", "Japanese")
            .with(
                "languages",
                Value::Set(vec![Value::from("Japanese"), Value::from("English")]),
            );

        LanguageProfileResourceKind::apply(&plan, &mut profile).unwrap();
        assert_eq!(profile.cutoff.id, 8);
        assert!(profile.languages[0].allowed);
        assert!(!profile.languages[1].allowed);
    }

    #[test]
    fn test_unknown_cutoff_is_invalid_configuration() {
        let mut profile = template();
        let plan = Object::new().with("cutoff", "Klingon");
        let err = LanguageProfileResourceKind::apply(&plan, &mut profile).unwrap_err();
        assert_eq!(err.diagnostics()[0].attribute.as_deref(), Some("cutoff"));
    }
}
