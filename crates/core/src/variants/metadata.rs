use super::{f, VariantAttr, VariantSpec};
use crate::fields::Category;

const SERIES_METADATA: VariantAttr = f("seriesMetadata").doc("Series metadata flag.");
const SERIES_METADATA_URL: VariantAttr = f("seriesMetadataUrl").doc("Series metadata URL flag.");
const EPISODE_METADATA: VariantAttr = f("episodeMetadata").doc("Episode metadata flag.");
const SERIES_IMAGES: VariantAttr = f("seriesImages").doc("Series images flag.");
const SEASON_IMAGES: VariantAttr = f("seasonImages").doc("Season images flag.");
const EPISODE_IMAGES: VariantAttr = f("episodeImages").doc("Episode images flag.");

const fn variant(
    kind: &'static str,
    title: &'static str,
    implementation: &'static str,
    config_contract: &'static str,
    attributes: &'static [VariantAttr],
) -> VariantSpec {
    VariantSpec {
        category: Category::Metadata,
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
        "kodi",
        "Kodi",
        "XbmcMetadata",
        "XbmcMetadataSettings",
        &[
            SERIES_METADATA,
            SERIES_METADATA_URL,
            EPISODE_METADATA,
            SERIES_IMAGES,
            SEASON_IMAGES,
            EPISODE_IMAGES,
        ],
    ),
    variant(
        "roksbox",
        "Roksbox",
        "RoksboxMetadata",
        "RoksboxMetadataSettings",
        &[EPISODE_METADATA, SERIES_IMAGES, SEASON_IMAGES, EPISODE_IMAGES],
    ),
    variant(
        "wdtv",
        "WDTV",
        "WdtvMetadata",
        "WdtvMetadataSettings",
        &[EPISODE_METADATA, SERIES_IMAGES, SEASON_IMAGES, EPISODE_IMAGES],
    ),
];
