use super::{f, Check, VariantAttr, VariantSpec};
use crate::fields::Category;
use crate::sdk::Protocol;

const HOST: VariantAttr = f("host").doc("Host.");
const PORT: VariantAttr = f("port").doc("Port.");
const USE_SSL: VariantAttr = f("useSsl").doc("Use SSL flag.");
const URL_BASE: VariantAttr = f("urlBase").doc("Base URL.");
const USERNAME: VariantAttr = f("username").doc("Username.");
const PASSWORD: VariantAttr = f("password").doc("Password.");
const API_KEY: VariantAttr = f("apiKey").doc("API key.");
const TV_CATEGORY: VariantAttr = f("tvCategory").doc("TV category.");
const TV_IMPORTED_CATEGORY: VariantAttr = f("tvImportedCategory").doc("TV imported category.");
const TV_DIRECTORY: VariantAttr = f("tvDirectory").doc("TV directory.");
const ADD_PAUSED: VariantAttr = f("addPaused").doc("Add paused flag.");

const FIRST_LAST: &[i64] = &[0, 1];

const RECENT_PRIORITY: VariantAttr = f("recentTvPriority")
    .check(Check::OneOfInt(FIRST_LAST))
    .doc("Recent TV priority. `0` Last, `1` First.");
const OLDER_PRIORITY: VariantAttr = f("olderTvPriority")
    .check(Check::OneOfInt(FIRST_LAST))
    .doc("Older TV priority. `0` Last, `1` First.");

const SABNZBD_PRIORITIES: &[i64] = &[-100, -2, -1, 0, 1, 2];
const NZBGET_PRIORITIES: &[i64] = &[-100, -50, 0, 50, 100, 900];

const fn variant(
    kind: &'static str,
    title: &'static str,
    implementation: &'static str,
    config_contract: &'static str,
    protocol: Protocol,
    attributes: &'static [VariantAttr],
) -> VariantSpec {
    VariantSpec {
        category: Category::DownloadClient,
        kind,
        title,
        implementation,
        config_contract,
        protocol: Some(protocol),
        attributes,
    }
}

pub(super) static VARIANTS: &[VariantSpec] = &[
    variant(
        "deluge",
        "Deluge",
        "Deluge",
        "DelugeSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            PASSWORD,
            TV_CATEGORY,
            TV_IMPORTED_CATEGORY,
            RECENT_PRIORITY,
            OLDER_PRIORITY,
            ADD_PAUSED,
        ],
    ),
    variant(
        "flood",
        "Flood",
        "Flood",
        "FloodSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            f("destination").doc("Destination."),
            f("startOnAdd").doc("Start on add flag."),
            f("fieldTags").doc("Field tags."),
            f("postImTags").doc("Post import tags."),
            f("additionalTags").doc("Additional tags. `0` TitleSlug, `1` Quality, `2` Language, `3` ReleaseGroup, `4` Year, `5` Indexer, `6` Network."),
        ],
    ),
    variant(
        "hadouken",
        "Hadouken",
        "Hadouken",
        "HadoukenSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            f("category").doc("Category."),
        ],
    ),
    variant(
        "qbittorrent",
        "qBittorrent",
        "QBittorrent",
        "QBittorrentSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            TV_CATEGORY,
            TV_IMPORTED_CATEGORY,
            RECENT_PRIORITY,
            OLDER_PRIORITY,
            f("initialState")
                .check(Check::OneOfInt(&[0, 1, 2]))
                .doc("Initial state. `0` Start, `1` ForceStart, `2` Pause."),
            f("sequentialOrder").doc("Sequential order flag."),
            f("firstAndLast").doc("First and last flag."),
        ],
    ),
    variant(
        "rtorrent",
        "rTorrent",
        "RTorrent",
        "RTorrentSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            TV_CATEGORY,
            TV_IMPORTED_CATEGORY,
            TV_DIRECTORY,
            RECENT_PRIORITY,
            OLDER_PRIORITY,
            f("addStopped").doc("Add stopped flag."),
        ],
    ),
    variant(
        "sabnzbd",
        "Sabnzbd",
        "Sabnzbd",
        "SabnzbdSettings",
        Protocol::Usenet,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            API_KEY,
            USERNAME,
            PASSWORD,
            TV_CATEGORY,
            f("recentTvPriority")
                .check(Check::OneOfInt(SABNZBD_PRIORITIES))
                .doc("Recent TV priority. `-100` Default, `-2` Paused, `-1` Low, `0` Normal, `1` High, `2` Force."),
            f("olderTvPriority")
                .check(Check::OneOfInt(SABNZBD_PRIORITIES))
                .doc("Older TV priority. `-100` Default, `-2` Paused, `-1` Low, `0` Normal, `1` High, `2` Force."),
        ],
    ),
    variant(
        "transmission",
        "Transmission",
        "Transmission",
        "TransmissionSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            TV_CATEGORY,
            TV_DIRECTORY,
            RECENT_PRIORITY,
            OLDER_PRIORITY,
            ADD_PAUSED,
        ],
    ),
    variant(
        "torrent_blackhole",
        "Torrent Blackhole",
        "TorrentBlackhole",
        "TorrentBlackholeSettings",
        Protocol::Torrent,
        &[
            f("torrentFolder")
                .required()
                .check(Check::AbsolutePath)
                .doc("Torrent folder."),
            f("watchFolder")
                .required()
                .check(Check::AbsolutePath)
                .doc("Watch folder."),
            f("saveMagnetFiles").doc("Save magnet files flag."),
            f("magnetFileExtension").doc("Magnet file extension."),
            f("readOnly").doc("Read only flag."),
        ],
    ),
    variant(
        "usenet_blackhole",
        "Usenet Blackhole",
        "UsenetBlackhole",
        "UsenetBlackholeSettings",
        Protocol::Usenet,
        &[
            f("nzbFolder")
                .required()
                .check(Check::AbsolutePath)
                .doc("NZB folder."),
            f("watchFolder")
                .required()
                .check(Check::AbsolutePath)
                .doc("Watch folder."),
        ],
    ),
    variant(
        "torrent_download_station",
        "Torrent Download Station",
        "TorrentDownloadStation",
        "DownloadStationSettings",
        Protocol::Torrent,
        &[HOST, PORT, USE_SSL, USERNAME, PASSWORD, TV_CATEGORY, TV_DIRECTORY],
    ),
    variant(
        "usenet_download_station",
        "Usenet Download Station",
        "UsenetDownloadStation",
        "DownloadStationSettings",
        Protocol::Usenet,
        &[HOST, PORT, USE_SSL, USERNAME, PASSWORD, TV_CATEGORY, TV_DIRECTORY],
    ),
    variant(
        "freebox",
        "Freebox",
        "TorrentFreeboxDownload",
        "FreeboxDownloadSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            f("apiUrl").doc("API URL."),
            f("appId").required().doc("App ID."),
            f("appToken").required().doc("App token."),
            f("destinationDirectory").doc("Destination directory."),
            f("category").doc("Category."),
            RECENT_PRIORITY,
            OLDER_PRIORITY,
            ADD_PAUSED,
        ],
    ),
    variant(
        "nzbget",
        "Nzbget",
        "Nzbget",
        "NzbgetSettings",
        Protocol::Usenet,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            TV_CATEGORY,
            f("recentTvPriority")
                .check(Check::OneOfInt(NZBGET_PRIORITIES))
                .doc("Recent TV priority. `-100` VeryLow, `-50` Low, `0` Normal, `50` High, `100` VeryHigh, `900` Force."),
            f("olderTvPriority")
                .check(Check::OneOfInt(NZBGET_PRIORITIES))
                .doc("Older TV priority. `-100` VeryLow, `-50` Low, `0` Normal, `50` High, `100` VeryHigh, `900` Force."),
            ADD_PAUSED,
        ],
    ),
    variant(
        "nzbvortex",
        "Nzbvortex",
        "NzbVortex",
        "NzbVortexSettings",
        Protocol::Usenet,
        &[
            HOST,
            PORT,
            URL_BASE,
            API_KEY,
            TV_CATEGORY,
            f("recentTvPriority")
                .check(Check::OneOfInt(&[-1, 0, 1]))
                .doc("Recent TV priority. `-1` Low, `0` Normal, `1` High."),
            f("olderTvPriority")
                .check(Check::OneOfInt(&[-1, 0, 1]))
                .doc("Older TV priority. `-1` Low, `0` Normal, `1` High."),
        ],
    ),
    variant(
        "pneumatic",
        "Pneumatic",
        "Pneumatic",
        "PneumaticSettings",
        Protocol::Usenet,
        &[
            f("nzbFolder")
                .required()
                .check(Check::AbsolutePath)
                .doc("NZB folder."),
            f("strmFolder").check(Check::AbsolutePath).doc("STRM folder."),
        ],
    ),
    variant(
        "vuze",
        "Vuze",
        "Vuze",
        "TransmissionSettings",
        Protocol::Torrent,
        &[
            HOST,
            PORT,
            USE_SSL,
            URL_BASE,
            USERNAME,
            PASSWORD,
            TV_CATEGORY,
            TV_DIRECTORY,
            RECENT_PRIORITY,
            OLDER_PRIORITY,
            ADD_PAUSED,
        ],
    ),
];
