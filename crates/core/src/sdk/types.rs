//! Wire types of the Sonarr v3 API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Transfer protocol of a download client or indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Usenet,
    Torrent,
    #[serde(other)]
    Unknown,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Usenet => "usenet",
            Protocol::Torrent => "torrent",
            Protocol::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "usenet" => Some(Protocol::Usenet),
            "torrent" => Some(Protocol::Torrent),
            _ => None,
        }
    }
}

/// One `{name, value}` entry of a provider's `fields` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: Option<Json>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Json) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

/// Polymorphic provider object shared by download clients, indexers,
/// notifications, metadata consumers and import lists.
///
/// Category-specific toggles are optional; absent ones are neither sent
/// nor expected back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub config_contract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_completed_downloads: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_failed_downloads: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_rss: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_automatic_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_interactive_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_client_id: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_grab: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_download: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_upgrade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_rename: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_series_add: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_series_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_episode_file_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_episode_file_delete_for_upgrade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_health_issue: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_health_restored: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_application_update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_import_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_manual_interaction_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_health_warnings: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_automatic_add: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_monitor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_profile_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_profile_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_folder: Option<bool>,
}

impl ProviderResource {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSeriesOptions {
    pub monitor: String,
    pub search_for_missing_episodes: bool,
    pub search_for_cutoff_unmet_episodes: bool,
}

/// A series. Lookup results carry seasons and images that must be sent
/// back unchanged on create; they ride in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub tvdb_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_profile_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_profile_id: Option<i32>,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub season_folder: bool,
    #[serde(default)]
    pub use_scene_numbering: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_options: Option<AddSeriesOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFolderResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_space: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayProfileResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub enable_usenet: bool,
    #[serde(default)]
    pub enable_torrent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_protocol: Option<Protocol>,
    #[serde(default)]
    pub usenet_delay: i32,
    #[serde(default)]
    pub torrent_delay: i32,
    #[serde(default)]
    pub bypass_if_highest_quality: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub tags: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePathMappingResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub host: String,
    pub remote_path: String,
    pub local_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

/// Entry of a quality profile: a single quality or a named group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityProfileItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(default)]
    pub items: Vec<QualityProfileItem>,
    #[serde(default)]
    pub allowed: bool,
}

impl QualityProfileItem {
    /// Quality id for single qualities, group id for groups.
    pub fn key(&self) -> Option<i32> {
        match &self.quality {
            Some(quality) => Some(quality.id),
            None => self.id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub upgrade_allowed: bool,
    #[serde(default)]
    pub cutoff: i32,
    #[serde(default)]
    pub items: Vec<QualityProfileItem>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfileItem {
    pub language: Language,
    #[serde(default)]
    pub allowed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfileResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub upgrade_allowed: bool,
    #[serde(default)]
    pub cutoff: Language,
    #[serde(default)]
    pub languages: Vec<LanguageProfileItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatusResource {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub build_time: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub os_name: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub authentication: String,
    #[serde(default)]
    pub url_base: String,
    #[serde(default)]
    pub runtime_name: String,
    #[serde(default)]
    pub runtime_version: String,
    #[serde(default)]
    pub startup_path: String,
    #[serde(default)]
    pub app_data: String,
    #[serde(default)]
    pub is_debug: bool,
    #[serde(default)]
    pub is_production: bool,
    #[serde(default)]
    pub is_docker: bool,
    #[serde(default)]
    pub is_linux: bool,
    #[serde(default)]
    pub is_osx: bool,
    #[serde(default)]
    pub is_windows: bool,
    #[serde(default)]
    pub migration_version: i64,
}
