use super::{f, Check, VariantAttr, VariantSpec};
use crate::fields::Category;

const ACCESS_TOKEN: VariantAttr = f("accessToken").required().doc("Access token.");
const REFRESH_TOKEN: VariantAttr = f("refreshToken").doc("Refresh token.");
const EXPIRES: VariantAttr = f("expires").doc("Token expiration.");
const AUTH_USER: VariantAttr = f("authUser").required().doc("Auth user.");
const LIMIT: VariantAttr = f("limit").doc("Limit.");

const fn variant(
    kind: &'static str,
    title: &'static str,
    implementation: &'static str,
    config_contract: &'static str,
    attributes: &'static [VariantAttr],
) -> VariantSpec {
    VariantSpec {
        category: Category::ImportList,
        kind,
        title,
        implementation,
        config_contract,
        protocol: None,
        attributes,
    }
}

pub(super) static VARIANTS: &[VariantSpec] = &[
    variant(
        "custom",
        "Custom",
        "CustomImport",
        "CustomSettings",
        &[f("baseUrl").required().check(Check::HttpUrl).doc("Base URL.")],
    ),
    variant(
        "imdb",
        "IMDb",
        "ImdbListImport",
        "ImdbListSettings",
        &[f("listId").required().doc("List ID.")],
    ),
    variant(
        "plex",
        "Plex Watchlist",
        "PlexImport",
        "PlexListSettings",
        &[ACCESS_TOKEN],
    ),
    variant(
        "plex_rss",
        "Plex RSS",
        "PlexRssImport",
        "PlexRssImportSettings",
        &[f("url").required().check(Check::HttpUrl).doc("RSS URL.")],
    ),
    // The service documents overlapping labels for the list type; the
    // accepted values are the plain integers.
    variant(
        "simkl_user",
        "Simkl User",
        "SimklUserImport",
        "SimklUserSettings",
        &[
            f("baseUrl").check(Check::HttpUrl).doc("Base URL."),
            ACCESS_TOKEN,
            REFRESH_TOKEN,
            EXPIRES,
            AUTH_USER,
            f("listType")
                .check(Check::OneOfInt(&[0, 1, 2, 3, 4]))
                .doc("List type. `0` Watching, `1` PlanToWatch, `2` Hold, `1` Completed, `2` Dropped."),
        ],
    ),
    variant(
        "sonarr",
        "Sonarr",
        "SonarrImport",
        "SonarrSettings",
        &[
            f("baseUrl").required().check(Check::HttpUrl).doc("Base URL of the source instance."),
            f("apiKey").required().doc("API key of the source instance."),
            f("profileIds").doc("Source quality profile IDs."),
            f("languageProfileIds").doc("Source language profile IDs."),
            f("tagIds").doc("Source tag IDs."),
        ],
    ),
    variant(
        "trakt_list",
        "Trakt List",
        "TraktListImport",
        "TraktListSettings",
        &[
            AUTH_USER,
            ACCESS_TOKEN,
            REFRESH_TOKEN,
            EXPIRES,
            f("username").required().doc("Username of the list owner."),
            f("listname").required().doc("List name."),
            LIMIT,
        ],
    ),
    variant(
        "trakt_popular",
        "Trakt Popular",
        "TraktPopularImport",
        "TraktPopularSettings",
        &[
            AUTH_USER,
            ACCESS_TOKEN,
            REFRESH_TOKEN,
            EXPIRES,
            f("traktListType")
                .check(Check::OneOfInt(&[0, 1, 2, 3, 4, 5, 6, 7, 8]))
                .doc("Trakt list type. `0` Trending, `1` Popular, `2` Anticipated, `3` TopWatchedByWeek, `4` TopWatchedByMonth, `5` TopWatchedByYear, `6` TopWatchedByAllTime, `7` RecommendedByWeek, `8` RecommendedByMonth."),
            LIMIT,
        ],
    ),
    variant(
        "trakt_user",
        "Trakt User",
        "TraktUserImport",
        "TraktUserSettings",
        &[
            AUTH_USER,
            ACCESS_TOKEN,
            REFRESH_TOKEN,
            EXPIRES,
            f("traktListType")
                .check(Check::OneOfInt(&[0, 1, 2]))
                .doc("Trakt list type. `0` UserWatchList, `1` UserWatchedList, `2` UserCollectionList."),
            f("username").doc("Username."),
            LIMIT,
        ],
    ),
];
