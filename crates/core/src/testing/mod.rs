//! Testing utilities: an in-memory Sonarr and canned service objects.
//!
//! # Example
//!
//! ```rust,ignore
//! use sonarr_provider_core::testing::{fixtures, MockSonarr};
//! use sonarr_provider_core::SonarrProvider;
//!
//! let sonarr = MockSonarr::new();
//! sonarr.add_lookup(fixtures::series_lookup("Friends", 79168)).await;
//!
//! let provider = SonarrProvider::new();
//! provider.configure_with(Some(sonarr.client()))?;
//! ```

mod mock_sonarr;

pub use mock_sonarr::MockSonarr;

/// Test fixtures shaped like service responses.
pub mod fixtures {
    use serde_json::{json, Value as Json};

    use crate::sdk::Endpoint;

    /// `system/status` of a v3 instance.
    pub fn system_status() -> Json {
        json!({
            "appName": "Sonarr",
            "instanceName": "Sonarr",
            "version": "3.0.10.1567",
            "buildTime": "2023-01-01T00:00:00Z",
            "startTime": "2024-01-01T00:00:00Z",
            "osName": "ubuntu",
            "osVersion": "22.04",
            "branch": "main",
            "authentication": "none",
            "urlBase": "",
            "runtimeName": "mono",
            "runtimeVersion": "6.12.0.182",
            "startupPath": "/app/sonarr/bin",
            "appData": "/config",
            "isDebug": false,
            "isProduction": true,
            "isDocker": true,
            "isLinux": true,
            "isOsx": false,
            "isWindows": false,
            "migrationVersion": 187
        })
    }

    /// Default object of a configuration singleton.
    pub fn config(endpoint: Endpoint) -> Json {
        match endpoint {
            Endpoint::NamingConfig => json!({
                "id": 1,
                "renameEpisodes": false,
                "replaceIllegalCharacters": true,
                "multiEpisodeStyle": 0,
                "standardEpisodeFormat": "{Series Title} - S{season:00}E{episode:00} - {Episode Title} {Quality Full}",
                "dailyEpisodeFormat": "{Series Title} - {Air-Date} - {Episode Title} {Quality Full}",
                "animeEpisodeFormat": "{Series Title} - S{season:00}E{episode:00} - {Episode Title} {Quality Full}",
                "seriesFolderFormat": "{Series Title}",
                "seasonFolderFormat": "Season {season}",
                "specialsFolderFormat": "Specials"
            }),
            Endpoint::MediaManagementConfig => json!({
                "id": 1,
                "autoUnmonitorPreviouslyDownloadedEpisodes": false,
                "recycleBin": "",
                "recycleBinCleanupDays": 7,
                "downloadPropersAndRepacks": "preferAndUpgrade",
                "createEmptySeriesFolders": false,
                "deleteEmptyFolders": false,
                "fileDate": "none",
                "rescanAfterRefresh": "always",
                "setPermissionsLinux": false,
                "chmodFolder": "755",
                "chownGroup": "",
                "episodeTitleRequired": "always",
                "skipFreeSpaceCheckWhenImporting": false,
                "minimumFreeSpaceWhenImporting": 100,
                "copyUsingHardlinks": true,
                "importExtraFiles": false,
                "extraFileExtensions": "srt",
                "enableMediaInfo": true
            }),
            Endpoint::HostConfig => json!({
                "id": 1,
                "bindAddress": "*",
                "port": 8989,
                "sslPort": 9898,
                "enableSsl": false,
                "launchBrowser": true,
                "authenticationMethod": "none",
                "username": "",
                "password": "",
                "analyticsEnabled": true,
                "logLevel": "info",
                "consoleLogLevel": "",
                "branch": "main",
                "apiKey": "0123456789abcdef",
                "sslCertPath": "",
                "sslCertPassword": "",
                "urlBase": "",
                "instanceName": "Sonarr",
                "updateAutomatically": false,
                "updateMechanism": "docker",
                "updateScriptPath": "",
                "proxyEnabled": false,
                "proxyType": "http",
                "proxyHostname": "",
                "proxyPort": 8080,
                "proxyUsername": "",
                "proxyPassword": "",
                "proxyBypassFilter": "",
                "proxyBypassLocalAddresses": true,
                "certificateValidation": "enabled",
                "backupFolder": "Backups",
                "backupInterval": 7,
                "backupRetention": 28
            }),
            Endpoint::DownloadClientConfig => json!({
                "id": 1,
                "downloadClientWorkingFolders": "_UNPACK_|_FAILED_",
                "enableCompletedDownloadHandling": true,
                "autoRedownloadFailed": true
            }),
            Endpoint::IndexerConfig => json!({
                "id": 1,
                "minimumAge": 0,
                "retention": 0,
                "maximumSize": 0,
                "rssSyncInterval": 15
            }),
            _ => json!({ "id": 1 }),
        }
    }

    /// `qualityprofile/schema`: two single qualities and one group.
    pub fn quality_profile_template() -> Json {
        json!({
            "name": "",
            "upgradeAllowed": false,
            "cutoff": 0,
            "items": [
                {"quality": {"id": 1, "name": "SDTV", "source": "television", "resolution": 480}, "items": [], "allowed": false},
                {"quality": {"id": 4, "name": "HDTV-720p", "source": "television", "resolution": 720}, "items": [], "allowed": false},
                {"id": 1000, "name": "WEB 1080p", "items": [
                    {"quality": {"id": 3, "name": "WEBDL-1080p", "source": "web", "resolution": 1080}, "items": [], "allowed": false},
                    {"quality": {"id": 15, "name": "WEBRip-1080p", "source": "webRip", "resolution": 1080}, "items": [], "allowed": false}
                ], "allowed": false}
            ]
        })
    }

    /// `languageprofile/schema`.
    pub fn language_profile_template() -> Json {
        let language = |id: i64, name: &str| json!({"language": {"id": id, "name": name}, "allowed": false});
        json!({
            "name": "",
            "upgradeAllowed": false,
            "cutoff": {"id": 1, "name": "English"},
            "languages": [
                language(1, "English"),
                language(2, "French"),
                language(4, "German"),
                language(8, "Japanese")
            ]
        })
    }

    /// One `series/lookup` result.
    pub fn series_lookup(title: &str, tvdb_id: i64) -> Json {
        json!({
            "title": title,
            "tvdbId": tvdb_id,
            "year": 1994,
            "monitored": false,
            "seasonFolder": false,
            "useSceneNumbering": false,
            "seriesType": "standard",
            "tags": [],
            "seasons": [
                {"seasonNumber": 1, "monitored": false},
                {"seasonNumber": 2, "monitored": false}
            ],
            "images": [
                {"coverType": "poster", "url": "https://artworks.thetvdb.com/poster.jpg"}
            ]
        })
    }
}
