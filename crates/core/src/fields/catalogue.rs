use super::{Category, FieldBinding, FieldKind};

/// Closed set of field names recognised for one category.
#[derive(Debug, Clone, Copy)]
pub struct FieldCatalogue {
    pub booleans: &'static [&'static str],
    pub integers: &'static [&'static str],
    pub floats: &'static [&'static str],
    pub strings: &'static [&'static str],
    pub string_sets: &'static [&'static str],
    pub int_sets: &'static [&'static str],
    /// Fields the service redacts on read.
    pub sensitive: &'static [&'static str],
}

// `watchFolder` is a path on the blackhole clients, so it is catalogued as a
// string. `intialState` is misspelled by the service and kept as is.
static DOWNLOAD_CLIENT: FieldCatalogue = FieldCatalogue {
    booleans: &[
        "addPaused",
        "useSsl",
        "startOnAdd",
        "sequentialOrder",
        "firstAndLast",
        "addStopped",
        "saveMagnetFiles",
        "readOnly",
    ],
    integers: &[
        "port",
        "recentTvPriority",
        "olderTvPriority",
        "initialState",
        "intialState",
    ],
    floats: &[],
    strings: &[
        "host",
        "apiKey",
        "urlBase",
        "rpcPath",
        "secretToken",
        "password",
        "username",
        "tvCategory",
        "tvImportedCategory",
        "tvDirectory",
        "destination",
        "category",
        "nzbFolder",
        "strmFolder",
        "torrentFolder",
        "watchFolder",
        "magnetFileExtension",
        "apiUrl",
        "appId",
        "appToken",
        "destinationDirectory",
    ],
    string_sets: &["fieldTags", "postImTags"],
    int_sets: &["additionalTags"],
    sensitive: &["apiKey", "password", "secretToken", "appToken"],
};

static INDEXER: FieldCatalogue = FieldCatalogue {
    booleans: &["allowZeroSize", "rankedOnly", "animeStandardFormatSearch"],
    integers: &["delay", "minimumSeeders", "seasonPackSeedTime", "seedTime"],
    floats: &["seedRatio"],
    strings: &[
        "apiKey",
        "apiPath",
        "baseUrl",
        "captchaToken",
        "cookie",
        "passkey",
        "username",
        "additionalParameters",
    ],
    string_sets: &[],
    int_sets: &["categories", "animeCategories", "multiLanguages"],
    sensitive: &["apiKey", "passkey", "cookie", "captchaToken"],
};

static NOTIFICATION: FieldCatalogue = FieldCatalogue {
    booleans: &[
        "alwaysUpdate",
        "cleanLibrary",
        "directMessage",
        "notify",
        "requireEncryption",
        "sendSilently",
        "updateLibrary",
        "useEuEndpoint",
        "useSsl",
    ],
    integers: &[
        "method",
        "port",
        "priority",
        "retry",
        "expire",
        "displayTime",
        "notificationType",
    ],
    floats: &[],
    strings: &[
        "accessToken",
        "accessTokenSecret",
        "apiKey",
        "appToken",
        "arguments",
        "author",
        "authToken",
        "authUser",
        "avatar",
        "botToken",
        "channel",
        "chatId",
        "consumerKey",
        "consumerSecret",
        "deviceNames",
        "expires",
        "from",
        "host",
        "icon",
        "mention",
        "password",
        "path",
        "refreshToken",
        "senderDomain",
        "senderId",
        "server",
        "signIn",
        "sound",
        "token",
        "url",
        "userKey",
        "username",
        "webHookUrl",
        "serverUrl",
        "configurationKey",
        "statelessUrls",
        "authUsername",
        "authPassword",
        "senderNumber",
        "receiverId",
    ],
    string_sets: &[
        "channelTags",
        "deviceIds",
        "devices",
        "recipients",
        "to",
        "cc",
        "bcc",
        "topics",
        "fieldTags",
    ],
    int_sets: &["grabFields", "importFields"],
    sensitive: &[
        "apiKey",
        "token",
        "password",
        "appToken",
        "authToken",
        "botToken",
        "accessToken",
        "accessTokenSecret",
        "consumerKey",
        "consumerSecret",
        "refreshToken",
        "authPassword",
    ],
};

static METADATA: FieldCatalogue = FieldCatalogue {
    booleans: &[
        "seriesMetadata",
        "seriesMetadataUrl",
        "seriesImages",
        "seasonImages",
        "episodeImages",
        "episodeMetadata",
    ],
    integers: &[],
    floats: &[],
    strings: &[],
    string_sets: &[],
    int_sets: &[],
    sensitive: &[],
};

static IMPORT_LIST: FieldCatalogue = FieldCatalogue {
    booleans: &[],
    integers: &["listType", "limit", "traktListType"],
    floats: &[],
    strings: &[
        "baseUrl",
        "url",
        "accessToken",
        "refreshToken",
        "expires",
        "authUser",
        "username",
        "listname",
        "listId",
        "apiKey",
    ],
    string_sets: &[],
    int_sets: &["profileIds", "tagIds", "languageProfileIds"],
    sensitive: &["accessToken", "refreshToken", "apiKey"],
};

impl Category {
    pub fn catalogue(&self) -> &'static FieldCatalogue {
        match self {
            Category::DownloadClient => &DOWNLOAD_CLIENT,
            Category::Indexer => &INDEXER,
            Category::Notification => &NOTIFICATION,
            Category::Metadata => &METADATA,
            Category::ImportList => &IMPORT_LIST,
        }
    }
}

impl FieldCatalogue {
    fn groups(&self) -> [(FieldKind, &'static [&'static str]); 6] {
        [
            (FieldKind::Bool, self.booleans),
            (FieldKind::Int, self.integers),
            (FieldKind::Float, self.floats),
            (FieldKind::String, self.strings),
            (FieldKind::StringSet, self.string_sets),
            (FieldKind::IntSet, self.int_sets),
        ]
    }

    /// Kind of a recognised field, `None` for names outside the catalogue.
    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.groups()
            .into_iter()
            .find(|(_, names)| names.contains(&field))
            .map(|(kind, _)| kind)
    }

    pub fn is_sensitive(&self, field: &str) -> bool {
        self.sensitive.contains(&field)
    }

    /// Every field with its kind, in catalogue order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, FieldKind)> {
        self.groups()
            .into_iter()
            .flat_map(|(kind, names)| names.iter().map(move |name| (*name, kind)))
    }

    /// Bindings for every field, attributes named in snake_case.
    pub fn bindings(&self) -> Vec<FieldBinding> {
        self.entries()
            .map(|(field, kind)| {
                FieldBinding::new(super::camel_to_snake(field), field, kind)
                    .sensitive(self.is_sensitive(field))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_no_duplicate_names_within_a_category() {
        for category in Category::ALL {
            let mut seen = HashSet::new();
            for (field, _) in category.catalogue().entries() {
                assert!(
                    seen.insert(field),
                    "{} listed twice in {:?}",
                    field,
                    category
                );
            }
        }
    }

    #[test]
    fn test_sensitive_fields_are_catalogued() {
        for category in Category::ALL {
            let catalogue = category.catalogue();
            for field in catalogue.sensitive {
                assert!(catalogue.kind_of(field).is_some(), "{} not catalogued", field);
            }
        }
    }

    #[test]
    fn test_same_name_typed_per_category() {
        assert_eq!(
            Category::DownloadClient.catalogue().kind_of("port"),
            Some(FieldKind::Int)
        );
        assert_eq!(
            Category::Notification.catalogue().kind_of("fieldTags"),
            Some(FieldKind::StringSet)
        );
        assert_eq!(Category::Metadata.catalogue().kind_of("port"), None);
        assert!(Category::Notification.catalogue().is_sensitive("token"));
        assert!(!Category::DownloadClient.catalogue().is_sensitive("username"));
    }

    #[test]
    fn test_misspelled_initial_state_kept() {
        let catalogue = Category::DownloadClient.catalogue();
        assert_eq!(catalogue.kind_of("intialState"), Some(FieldKind::Int));
        assert_eq!(catalogue.kind_of("initialState"), Some(FieldKind::Int));
    }

    #[test]
    fn test_bindings_use_snake_case() {
        let bindings = Category::Indexer.catalogue().bindings();
        let seed_ratio = bindings.iter().find(|b| b.field == "seedRatio").unwrap();
        assert_eq!(seed_ratio.attribute, "seed_ratio");
        assert_eq!(seed_ratio.kind, FieldKind::Float);

        let api_key = bindings.iter().find(|b| b.field == "apiKey").unwrap();
        assert!(api_key.sensitive);
    }
}
