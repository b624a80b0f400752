use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    client_error, finalize, response_id, state_id, wire_id, ClientSlot, ProviderData, Resource,
};
use crate::envelope::{decode_tags, i32_set, optional_i32, SERIES_TYPES};
use crate::error::{ProviderError, TranslationError};
use crate::schema::{Attribute, Schema, Validator, ABSOLUTE_PATH};
use crate::sdk::{AddSeriesOptions, Endpoint, RequestContext, SeriesResource};
use crate::value::Object;

const KIND: &str = "series";

/// Series resource. New series are resolved through the metadata lookup
/// so the service receives seasons and images it expects.
#[derive(Debug, Default)]
pub struct SeriesResourceKind {
    client: ClientSlot,
}

impl SeriesResourceKind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay configured values on a service object.
    fn apply(plan: &Object, series: &mut SeriesResource) -> Result<(), TranslationError> {
        if let Some(title) = plan.string("title")?.into_known() {
            series.title = title;
        }
        if let Some(tvdb_id) = optional_i32(plan, "tvdb_id")? {
            series.tvdb_id = tvdb_id;
        }
        if let Some(id) = optional_i32(plan, "quality_profile_id")? {
            series.quality_profile_id = Some(id);
        }
        if let Some(id) = optional_i32(plan, "language_profile_id")? {
            series.language_profile_id = Some(id);
        }
        if let Some(monitored) = plan.boolean("monitored")?.into_known() {
            series.monitored = monitored;
        }
        if let Some(season_folder) = plan.boolean("season_folder")?.into_known() {
            series.season_folder = season_folder;
        }
        if let Some(scene) = plan.boolean("use_scene_numbering")?.into_known() {
            series.use_scene_numbering = scene;
        }
        if let Some(path) = plan.string("path")?.into_known() {
            series.path = Some(path);
        }
        if let Some(root) = plan.string("root_folder_path")?.into_known() {
            series.root_folder_path = Some(root);
        }
        if let Some(series_type) = plan.string("series_type")?.into_known() {
            series.series_type = Some(series_type);
        }
        if plan.get("tags").is_known() {
            series.tags = i32_set(plan, "tags")?;
        }
        Ok(())
    }

    pub(crate) fn decode(
        &self,
        series: &SeriesResource,
        base: &Object,
    ) -> Result<Object, ProviderError> {
        let mut typed = base.clone();
        typed.set("id", response_id(series.id)?);
        typed.set("title", series.title.clone());
        typed.set("title_slug", series.title_slug.clone());
        typed.set("tvdb_id", series.tvdb_id);
        typed.set("quality_profile_id", series.quality_profile_id);
        typed.set("language_profile_id", series.language_profile_id);
        typed.set("monitored", series.monitored);
        typed.set("season_folder", series.season_folder);
        typed.set("use_scene_numbering", series.use_scene_numbering);
        typed.set("path", series.path.clone());
        if series.root_folder_path.is_some() || !typed.get("root_folder_path").is_known() {
            typed.set("root_folder_path", series.root_folder_path.clone());
        }
        typed.set("series_type", series.series_type.clone());
        decode_tags(&mut typed, "tags", &series.tags);
        Ok(finalize(&self.schema(), typed))
    }
}

#[async_trait]
impl Resource for SeriesResourceKind {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Series resource.\nFor more information refer to [Series](https://wiki.servarr.com/sonarr/library#series).",
        )
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe("Series ID."),
        )
        .attribute("title", Attribute::string().required().describe("Series title."))
        .attribute(
            "title_slug",
            Attribute::string().computed().describe("Series title in kebab format."),
        )
        .attribute(
            "tvdb_id",
            Attribute::int64()
                .required()
                .requires_replace()
                .describe("TVDB ID."),
        )
        .attribute(
            "quality_profile_id",
            Attribute::int64().required().describe("Quality profile ID."),
        )
        .attribute(
            "language_profile_id",
            Attribute::int64()
                .optional()
                .computed()
                .describe("Language profile ID."),
        )
        .attribute(
            "monitored",
            Attribute::bool().default_value(true).describe("Monitored flag."),
        )
        .attribute(
            "season_folder",
            Attribute::bool().default_value(true).describe("Season folder flag."),
        )
        .attribute(
            "use_scene_numbering",
            Attribute::bool()
                .default_value(false)
                .describe("Scene numbering flag."),
        )
        .attribute(
            "path",
            Attribute::string()
                .required()
                .validator(Validator::matches(&ABSOLUTE_PATH, "an absolute path"))
                .describe("Series full path."),
        )
        .attribute(
            "root_folder_path",
            Attribute::string()
                .optional()
                .computed()
                .describe("Series root folder."),
        )
        .attribute(
            "series_type",
            Attribute::string()
                .optional()
                .computed()
                .validator(Validator::one_of_string(SERIES_TYPES))
                .describe("Series type. Valid values are 'standard', 'anime' and 'daily'."),
        )
        .attribute(
            "tags",
            Attribute::int_set()
                .optional()
                .computed()
                .describe("List of associated tags."),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let tvdb_id = plan
            .int("tvdb_id")?
            .into_known()
            .ok_or(TranslationError::MissingField("tvdb_id"))?;

        let term = format!("tvdb:{}", tvdb_id);
        debug!("looking up series {}", term);
        let mut series = client
            .lookup_series(ctx, &term)
            .await
            .map_err(client_error(KIND, "create"))?
            .into_iter()
            .find(|s| i64::from(s.tvdb_id) == tvdb_id)
            .ok_or_else(|| ProviderError::NotFound(format!("no series matches {}", term)))?;

        Self::apply(plan, &mut series)?;
        series.id = None;
        series.add_options = Some(AddSeriesOptions {
            monitor: "all".to_string(),
            search_for_missing_episodes: false,
            search_for_cutoff_unmet_episodes: false,
        });

        let created: SeriesResource = client
            .create(ctx, Endpoint::Series, &series)
            .await
            .map_err(client_error(KIND, "create"))?;

        info!("created series {:?} id={:?}", created.title, created.id);
        self.decode(&created, plan)
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        match client.get::<SeriesResource>(ctx, Endpoint::Series, id).await {
            Ok(series) => self.decode(&series, state).map(Some),
            Err(e) if e.is_not_found() => {
                warn!("series {} not found, removing from state", id);
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

        let mut series: SeriesResource = client
            .get(ctx, Endpoint::Series, id)
            .await
            .map_err(client_error(KIND, "update"))?;
        Self::apply(plan, &mut series)?;
        series.id = Some(wire_id(id)?);

        let updated: SeriesResource = client
            .update(ctx, Endpoint::Series, id, &series)
            .await
            .map_err(client_error(KIND, "update"))?;

        info!("updated series id={}", id);
        self.decode(&updated, plan)
    }

    async fn delete(&self, ctx: &RequestContext, state: &Object) -> Result<(), ProviderError> {
        let client = self.client.get(KIND)?;
        let id = state_id(state)?;

        let query = [("deleteFiles", "false"), ("addImportListExclusion", "false")];
        match client.delete_with(ctx, Endpoint::Series, id, &query).await {
            Ok(()) => {
                info!("deleted series id={}", id);
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(client_error(KIND, "delete")(e)),
        }
    }
}
