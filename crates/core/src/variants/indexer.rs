use super::{f, Check, VariantAttr, VariantSpec};
use crate::fields::Category;
use crate::sdk::Protocol;

const BASE_URL: VariantAttr = f("baseUrl").check(Check::HttpUrl).doc("Base URL.");
const API_KEY: VariantAttr = f("apiKey").doc("API key.");
const API_PATH: VariantAttr = f("apiPath").doc("API path.");
const USERNAME: VariantAttr = f("username").doc("Username.");
const CATEGORIES: VariantAttr = f("categories").doc("Series list.");
const ANIME_CATEGORIES: VariantAttr = f("animeCategories").doc("Anime list.");
const ANIME_STANDARD_FORMAT: VariantAttr =
    f("animeStandardFormatSearch").doc("Search anime in standard format.");
const ADDITIONAL_PARAMETERS: VariantAttr = f("additionalParameters").doc("Additional parameters.");
const MULTI_LANGUAGES: VariantAttr = f("multiLanguages").doc("Language ids of multi-language releases.");
const MINIMUM_SEEDERS: VariantAttr = f("minimumSeeders").doc("Minimum seeders.");
const SEED_RATIO: VariantAttr = f("seedRatio").doc("Seed ratio.");
const SEED_TIME: VariantAttr = f("seedTime").doc("Seed time.");
const SEASON_PACK_SEED_TIME: VariantAttr = f("seasonPackSeedTime").doc("Season seed time.");

const fn variant(
    kind: &'static str,
    title: &'static str,
    implementation: &'static str,
    config_contract: &'static str,
    protocol: Protocol,
    attributes: &'static [VariantAttr],
) -> VariantSpec {
    VariantSpec {
        category: Category::Indexer,
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
        "broadcasthenet",
        "BroadcastheNet",
        "BroadcastheNet",
        "BroadcastheNetSettings",
        Protocol::Torrent,
        &[
            BASE_URL,
            f("apiKey").required().doc("API key."),
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "fanzub",
        "Fanzub",
        "Fanzub",
        "FanzubSettings",
        Protocol::Usenet,
        &[BASE_URL, ANIME_STANDARD_FORMAT],
    ),
    variant(
        "filelist",
        "FileList",
        "FileList",
        "FileListSettings",
        Protocol::Torrent,
        &[
            BASE_URL,
            f("username").required().doc("Username."),
            f("passkey").required().doc("Passkey."),
            CATEGORIES,
            ANIME_CATEGORIES,
            ANIME_STANDARD_FORMAT,
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "hdbits",
        "HDBits",
        "HDBits",
        "HDBitsSettings",
        Protocol::Torrent,
        &[
            BASE_URL,
            f("username").required().doc("Username."),
            f("apiKey").required().doc("API key."),
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "iptorrents",
        "IPTorrents",
        "IPTorrents",
        "IPTorrentsSettings",
        Protocol::Torrent,
        &[
            f("baseUrl").required().check(Check::HttpUrl).doc("Feed URL."),
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "newznab",
        "Newznab",
        "Newznab",
        "NewznabSettings",
        Protocol::Usenet,
        &[
            f("baseUrl").required().check(Check::HttpUrl).doc("Base URL."),
            API_PATH,
            API_KEY,
            CATEGORIES,
            ANIME_CATEGORIES,
            ANIME_STANDARD_FORMAT,
            ADDITIONAL_PARAMETERS,
            MULTI_LANGUAGES,
        ],
    ),
    variant(
        "nyaa",
        "Nyaa",
        "Nyaa",
        "NyaaSettings",
        Protocol::Torrent,
        &[
            BASE_URL,
            ADDITIONAL_PARAMETERS,
            ANIME_STANDARD_FORMAT,
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "omgwtfnzbs",
        "Omgwtfnzbs",
        "Omgwtfnzbs",
        "OmgwtfnzbsSettings",
        Protocol::Usenet,
        &[
            f("username").required().doc("Username."),
            f("apiKey").required().doc("API key."),
            f("delay").doc("Delay before grabbing, in minutes."),
        ],
    ),
    variant(
        "rarbg",
        "Rarbg",
        "Rarbg",
        "RarbgSettings",
        Protocol::Torrent,
        &[
            BASE_URL,
            f("captchaToken").doc("Captcha token."),
            f("rankedOnly").doc("Ranked only flag."),
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "torrent_rss",
        "Torrent RSS",
        "TorrentRssIndexer",
        "TorrentRssIndexerSettings",
        Protocol::Torrent,
        &[
            f("baseUrl").required().check(Check::HttpUrl).doc("Full RSS feed URL."),
            f("cookie").doc("Cookie."),
            f("allowZeroSize").doc("Allow zero size files."),
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "torrentleech",
        "Torrentleech",
        "Torrentleech",
        "TorrentleechSettings",
        Protocol::Torrent,
        &[
            BASE_URL,
            f("apiKey").required().doc("API key."),
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "torznab",
        "Torznab",
        "Torznab",
        "TorznabSettings",
        Protocol::Torrent,
        &[
            f("baseUrl").required().check(Check::HttpUrl).doc("Base URL."),
            API_PATH,
            API_KEY,
            CATEGORIES,
            ANIME_CATEGORIES,
            ANIME_STANDARD_FORMAT,
            ADDITIONAL_PARAMETERS,
            MULTI_LANGUAGES,
            MINIMUM_SEEDERS,
            SEED_RATIO,
            SEED_TIME,
            SEASON_PACK_SEED_TIME,
        ],
    ),
    variant(
        "wombles",
        "Wombles",
        "Wombles",
        "NullConfig",
        Protocol::Usenet,
        &[],
    ),
];
