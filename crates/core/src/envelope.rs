//! Common envelope of polymorphic provider objects.
//!
//! Every category shares `id`, `name`, `tags` and the discriminators; on top
//! of that each category has its own toggles (`enable`, the `on*` event
//! flags, indexer search switches, import list defaults).

use crate::error::TranslationError;
use crate::fields::Category;
use crate::schema::{Attribute, Schema, Validator};
use crate::sdk::{ProviderResource, Protocol};
use crate::value::{Object, Value};

/// Monitoring modes an import list may apply to added series.
pub const MONITOR_MODES: &[&str] = &[
    "all",
    "future",
    "missing",
    "existing",
    "pilot",
    "firstSeason",
    "latestSeason",
    "none",
];

pub const SERIES_TYPES: &[&str] = &["standard", "anime", "daily"];

/// Category-specific envelope attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Enable,
    Priority,
    RemoveCompletedDownloads,
    RemoveFailedDownloads,
    EnableRss,
    EnableAutomaticSearch,
    EnableInteractiveSearch,
    DownloadClientId,
    OnGrab,
    OnDownload,
    OnUpgrade,
    OnRename,
    OnSeriesAdd,
    OnSeriesDelete,
    OnEpisodeFileDelete,
    OnEpisodeFileDeleteForUpgrade,
    OnHealthIssue,
    OnHealthRestored,
    OnApplicationUpdate,
    OnImportComplete,
    OnManualInteractionRequired,
    IncludeHealthWarnings,
    EnableAutomaticAdd,
    ShouldMonitor,
    RootFolderPath,
    QualityProfileId,
    LanguageProfileId,
    SeriesType,
    SeasonFolder,
}

const DOWNLOAD_CLIENT_TOGGLES: &[Toggle] = &[
    Toggle::Enable,
    Toggle::Priority,
    Toggle::RemoveCompletedDownloads,
    Toggle::RemoveFailedDownloads,
];

const INDEXER_TOGGLES: &[Toggle] = &[
    Toggle::EnableRss,
    Toggle::EnableAutomaticSearch,
    Toggle::EnableInteractiveSearch,
    Toggle::Priority,
    Toggle::DownloadClientId,
];

const NOTIFICATION_TOGGLES: &[Toggle] = &[
    Toggle::OnGrab,
    Toggle::OnDownload,
    Toggle::OnUpgrade,
    Toggle::OnRename,
    Toggle::OnSeriesAdd,
    Toggle::OnSeriesDelete,
    Toggle::OnEpisodeFileDelete,
    Toggle::OnEpisodeFileDeleteForUpgrade,
    Toggle::OnHealthIssue,
    Toggle::OnHealthRestored,
    Toggle::OnApplicationUpdate,
    Toggle::OnImportComplete,
    Toggle::OnManualInteractionRequired,
    Toggle::IncludeHealthWarnings,
];

const METADATA_TOGGLES: &[Toggle] = &[Toggle::Enable];

const IMPORT_LIST_TOGGLES: &[Toggle] = &[
    Toggle::EnableAutomaticAdd,
    Toggle::ShouldMonitor,
    Toggle::RootFolderPath,
    Toggle::QualityProfileId,
    Toggle::LanguageProfileId,
    Toggle::SeriesType,
    Toggle::SeasonFolder,
];

impl Category {
    pub fn toggles(&self) -> &'static [Toggle] {
        match self {
            Category::DownloadClient => DOWNLOAD_CLIENT_TOGGLES,
            Category::Indexer => INDEXER_TOGGLES,
            Category::Notification => NOTIFICATION_TOGGLES,
            Category::Metadata => METADATA_TOGGLES,
            Category::ImportList => IMPORT_LIST_TOGGLES,
        }
    }
}

impl Toggle {
    pub fn attribute(&self) -> &'static str {
        match self {
            Toggle::Enable => "enable",
            Toggle::Priority => "priority",
            Toggle::RemoveCompletedDownloads => "remove_completed_downloads",
            Toggle::RemoveFailedDownloads => "remove_failed_downloads",
            Toggle::EnableRss => "enable_rss",
            Toggle::EnableAutomaticSearch => "enable_automatic_search",
            Toggle::EnableInteractiveSearch => "enable_interactive_search",
            Toggle::DownloadClientId => "download_client_id",
            Toggle::OnGrab => "on_grab",
            Toggle::OnDownload => "on_download",
            Toggle::OnUpgrade => "on_upgrade",
            Toggle::OnRename => "on_rename",
            Toggle::OnSeriesAdd => "on_series_add",
            Toggle::OnSeriesDelete => "on_series_delete",
            Toggle::OnEpisodeFileDelete => "on_episode_file_delete",
            Toggle::OnEpisodeFileDeleteForUpgrade => "on_episode_file_delete_for_upgrade",
            Toggle::OnHealthIssue => "on_health_issue",
            Toggle::OnHealthRestored => "on_health_restored",
            Toggle::OnApplicationUpdate => "on_application_update",
            Toggle::OnImportComplete => "on_import_complete",
            Toggle::OnManualInteractionRequired => "on_manual_interaction_required",
            Toggle::IncludeHealthWarnings => "include_health_warnings",
            Toggle::EnableAutomaticAdd => "enable_automatic_add",
            Toggle::ShouldMonitor => "should_monitor",
            Toggle::RootFolderPath => "root_folder_path",
            Toggle::QualityProfileId => "quality_profile_id",
            Toggle::LanguageProfileId => "language_profile_id",
            Toggle::SeriesType => "series_type",
            Toggle::SeasonFolder => "season_folder",
        }
    }

    fn schema(&self) -> Attribute {
        let attribute = match self {
            Toggle::Priority => Attribute::int64().describe("Priority."),
            Toggle::DownloadClientId => {
                Attribute::int64().describe("Download client to use for releases of this indexer. `0` means any.")
            }
            Toggle::QualityProfileId => Attribute::int64().describe("Quality profile of added series."),
            Toggle::LanguageProfileId => Attribute::int64().describe("Language profile of added series."),
            Toggle::RootFolderPath => Attribute::string().describe("Root folder of added series."),
            Toggle::ShouldMonitor => Attribute::string()
                .validator(Validator::one_of_string(MONITOR_MODES))
                .describe("Monitoring mode of added series."),
            Toggle::SeriesType => Attribute::string()
                .validator(Validator::one_of_string(SERIES_TYPES))
                .describe("Series type of added series."),
            Toggle::Enable => Attribute::bool().describe("Enable flag."),
            Toggle::RemoveCompletedDownloads => {
                Attribute::bool().describe("Remove completed downloads from the client history.")
            }
            Toggle::RemoveFailedDownloads => {
                Attribute::bool().describe("Remove failed downloads from the client history.")
            }
            Toggle::EnableRss => Attribute::bool().describe("Enable RSS flag."),
            Toggle::EnableAutomaticSearch => Attribute::bool().describe("Enable automatic search flag."),
            Toggle::EnableInteractiveSearch => {
                Attribute::bool().describe("Enable interactive search flag.")
            }
            Toggle::EnableAutomaticAdd => Attribute::bool().describe("Enable automatic add flag."),
            Toggle::SeasonFolder => Attribute::bool().describe("Use season folders for added series."),
            Toggle::IncludeHealthWarnings => Attribute::bool().describe("Include health warnings."),
            event => Attribute::bool().describe(format!("`{}` event flag.", event.attribute())),
        };
        attribute.optional().computed()
    }

    fn read(&self, r: &ProviderResource) -> Option<Value> {
        let flag = |v: Option<bool>| v.map(Value::Bool);
        let int = |v: Option<i32>| v.map(|i| Value::Int(i64::from(i)));
        let text = |v: &Option<String>| v.clone().map(Value::String);

        match self {
            Toggle::Enable => flag(r.enable),
            Toggle::Priority => int(r.priority),
            Toggle::RemoveCompletedDownloads => flag(r.remove_completed_downloads),
            Toggle::RemoveFailedDownloads => flag(r.remove_failed_downloads),
            Toggle::EnableRss => flag(r.enable_rss),
            Toggle::EnableAutomaticSearch => flag(r.enable_automatic_search),
            Toggle::EnableInteractiveSearch => flag(r.enable_interactive_search),
            Toggle::DownloadClientId => int(r.download_client_id),
            Toggle::OnGrab => flag(r.on_grab),
            Toggle::OnDownload => flag(r.on_download),
            Toggle::OnUpgrade => flag(r.on_upgrade),
            Toggle::OnRename => flag(r.on_rename),
            Toggle::OnSeriesAdd => flag(r.on_series_add),
            Toggle::OnSeriesDelete => flag(r.on_series_delete),
            Toggle::OnEpisodeFileDelete => flag(r.on_episode_file_delete),
            Toggle::OnEpisodeFileDeleteForUpgrade => flag(r.on_episode_file_delete_for_upgrade),
            Toggle::OnHealthIssue => flag(r.on_health_issue),
            Toggle::OnHealthRestored => flag(r.on_health_restored),
            Toggle::OnApplicationUpdate => flag(r.on_application_update),
            Toggle::OnImportComplete => flag(r.on_import_complete),
            Toggle::OnManualInteractionRequired => flag(r.on_manual_interaction_required),
            Toggle::IncludeHealthWarnings => flag(r.include_health_warnings),
            Toggle::EnableAutomaticAdd => flag(r.enable_automatic_add),
            Toggle::ShouldMonitor => text(&r.should_monitor),
            Toggle::RootFolderPath => text(&r.root_folder_path),
            Toggle::QualityProfileId => int(r.quality_profile_id),
            Toggle::LanguageProfileId => int(r.language_profile_id),
            Toggle::SeriesType => text(&r.series_type),
            Toggle::SeasonFolder => flag(r.season_folder),
        }
    }

    fn write(&self, r: &mut ProviderResource, typed: &Object) -> Result<(), TranslationError> {
        let name = self.attribute();
        let flag = || typed.boolean(name).map(|a| a.into_known());
        let int = || optional_i32(typed, name);
        let text = || typed.string(name).map(|a| a.into_known());

        match self {
            Toggle::Enable => r.enable = flag()?,
            Toggle::Priority => r.priority = int()?,
            Toggle::RemoveCompletedDownloads => r.remove_completed_downloads = flag()?,
            Toggle::RemoveFailedDownloads => r.remove_failed_downloads = flag()?,
            Toggle::EnableRss => r.enable_rss = flag()?,
            Toggle::EnableAutomaticSearch => r.enable_automatic_search = flag()?,
            Toggle::EnableInteractiveSearch => r.enable_interactive_search = flag()?,
            Toggle::DownloadClientId => r.download_client_id = int()?,
            Toggle::OnGrab => r.on_grab = flag()?,
            Toggle::OnDownload => r.on_download = flag()?,
            Toggle::OnUpgrade => r.on_upgrade = flag()?,
            Toggle::OnRename => r.on_rename = flag()?,
            Toggle::OnSeriesAdd => r.on_series_add = flag()?,
            Toggle::OnSeriesDelete => r.on_series_delete = flag()?,
            Toggle::OnEpisodeFileDelete => r.on_episode_file_delete = flag()?,
            Toggle::OnEpisodeFileDeleteForUpgrade => {
                r.on_episode_file_delete_for_upgrade = flag()?
            }
            Toggle::OnHealthIssue => r.on_health_issue = flag()?,
            Toggle::OnHealthRestored => r.on_health_restored = flag()?,
            Toggle::OnApplicationUpdate => r.on_application_update = flag()?,
            Toggle::OnImportComplete => r.on_import_complete = flag()?,
            Toggle::OnManualInteractionRequired => r.on_manual_interaction_required = flag()?,
            Toggle::IncludeHealthWarnings => r.include_health_warnings = flag()?,
            Toggle::EnableAutomaticAdd => r.enable_automatic_add = flag()?,
            Toggle::ShouldMonitor => r.should_monitor = text()?,
            Toggle::RootFolderPath => r.root_folder_path = text()?,
            Toggle::QualityProfileId => r.quality_profile_id = int()?,
            Toggle::LanguageProfileId => r.language_profile_id = int()?,
            Toggle::SeriesType => r.series_type = text()?,
            Toggle::SeasonFolder => r.season_folder = flag()?,
        }
        Ok(())
    }
}

/// Read an int64 attribute as a 32-bit wire id.
pub fn optional_i32(typed: &Object, name: &str) -> Result<Option<i32>, TranslationError> {
    match typed.int(name)?.into_known() {
        Some(v) => i32::try_from(v)
            .map(Some)
            .map_err(|_| TranslationError::OutOfRange(name.to_string(), v)),
        None => Ok(None),
    }
}

/// Read an int64 set attribute as 32-bit wire ids.
pub fn i32_set(typed: &Object, name: &str) -> Result<Vec<i32>, TranslationError> {
    let values = typed.int_set(name)?.into_known().unwrap_or_default();
    values
        .into_iter()
        .map(|v| i32::try_from(v).map_err(|_| TranslationError::OutOfRange(name.to_string(), v)))
        .collect()
}

/// Set value of wire ids.
pub fn id_set(ids: &[i32]) -> Value {
    Value::set_of(ids.iter().map(|id| Value::Int(i64::from(*id))))
}

/// Write a tag list from the service, keeping a null tag set null when
/// the service answers with no tags.
pub fn decode_tags(typed: &mut Object, name: &str, tags: &[i32]) {
    if tags.is_empty() && typed.get(name).is_null() {
        return;
    }
    typed.set(name, id_set(tags));
}

/// Variant discriminators sent with every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub implementation: String,
    pub config_contract: String,
    pub protocol: Option<Protocol>,
}

/// `id`, `name`, `tags` and the category toggles.
pub fn envelope_schema(category: Category, description: impl Into<String>) -> Schema {
    let mut schema = Schema::new(description)
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe(format!("{} ID.", category.title())),
        )
        .attribute(
            "name",
            Attribute::string()
                .required()
                .describe(format!("{} name.", category.title())),
        )
        .attribute(
            "tags",
            Attribute::int_set()
                .optional()
                .computed()
                .describe("List of associated tags."),
        );

    for toggle in category.toggles() {
        schema.insert(toggle.attribute(), toggle.schema());
    }
    schema
}

/// Project typed envelope attributes onto a service object.
pub fn encode_envelope(
    category: Category,
    typed: &Object,
    identity: &Identity,
) -> Result<ProviderResource, TranslationError> {
    let mut resource = ProviderResource {
        id: optional_i32(typed, "id")?,
        name: typed.string("name")?.into_known().unwrap_or_default(),
        implementation: identity.implementation.clone(),
        config_contract: identity.config_contract.clone(),
        protocol: if category.has_protocol() {
            identity.protocol
        } else {
            None
        },
        tags: i32_set(typed, "tags")?,
        ..Default::default()
    };

    for toggle in category.toggles() {
        toggle.write(&mut resource, typed)?;
    }
    Ok(resource)
}

/// Write envelope values returned by the service into typed attributes.
pub fn decode_envelope(category: Category, resource: &ProviderResource, typed: &mut Object) {
    if let Some(id) = resource.id {
        typed.set("id", i64::from(id));
    }
    typed.set("name", resource.name.clone());
    decode_tags(typed, "tags", &resource.tags);

    for toggle in category.toggles() {
        if let Some(value) = toggle.read(resource) {
            typed.set(toggle.attribute(), value);
        }
    }
}
