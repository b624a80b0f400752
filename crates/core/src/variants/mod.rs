//! Concrete provider variants.
//!
//! A variant is a category member with fixed `implementation`,
//! `configContract` and `protocol` values and a narrow set of fields. The
//! tables in the submodules list those fields; kinds and sensitivity come
//! from the category [`FieldCatalogue`](crate::fields::FieldCatalogue).

mod download_client;
mod import_list;
mod indexer;
mod metadata;
mod notification;

use crate::envelope::{decode_envelope, encode_envelope, envelope_schema, Identity};
use crate::error::TranslationError;
use crate::fields::{camel_to_snake, decode_fields, encode_fields, Category, FieldBinding};
use crate::schema::{Schema, Validator, ABSOLUTE_PATH, HTTP_URL};
use crate::sdk::{ProviderResource, Protocol};
use crate::value::Object;

/// Extra value constraint on a variant attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    None,
    OneOfInt(&'static [i64]),
    OneOfString(&'static [&'static str]),
    AbsolutePath,
    HttpUrl,
}

impl Check {
    pub(crate) fn validator(&self) -> Option<Validator> {
        match self {
            Check::None => None,
            Check::OneOfInt(values) => Some(Validator::one_of_int(values)),
            Check::OneOfString(values) => Some(Validator::one_of_string(values)),
            Check::AbsolutePath => Some(Validator::matches(&ABSOLUTE_PATH, "an absolute path")),
            Check::HttpUrl => Some(Validator::matches(&HTTP_URL, "an http(s) URL")),
        }
    }
}

/// One field a variant exposes as a typed attribute.
#[derive(Debug, Clone, Copy)]
pub struct VariantAttr {
    pub field: &'static str,
    pub required: bool,
    pub check: Check,
    pub doc: &'static str,
}

impl VariantAttr {
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            required: false,
            check: Check::None,
            doc: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn check(mut self, check: Check) -> Self {
        self.check = check;
        self
    }

    pub const fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }

    /// Attribute name: the field name in snake_case.
    pub fn attribute_name(&self) -> String {
        camel_to_snake(self.field)
    }

    fn description(&self) -> String {
        if !self.doc.is_empty() {
            return self.doc.to_string();
        }
        let words = camel_to_snake(self.field).replace('_', " ");
        let mut chars = words.chars();
        match chars.next() {
            Some(first) => format!("{}{}.", first.to_ascii_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

const fn f(field: &'static str) -> VariantAttr {
    VariantAttr::new(field)
}

/// A concrete variant of a provider category.
#[derive(Debug)]
pub struct VariantSpec {
    pub category: Category,
    /// Suffix of the resource kind, e.g. `qbittorrent`.
    pub kind: &'static str,
    pub title: &'static str,
    pub implementation: &'static str,
    pub config_contract: &'static str,
    pub protocol: Option<Protocol>,
    pub attributes: &'static [VariantAttr],
}

impl VariantSpec {
    /// Full kind, e.g. `download_client_qbittorrent`.
    pub fn resource_kind(&self) -> String {
        format!("{}_{}", self.category.kind(), self.kind)
    }

    pub fn identity(&self) -> Identity {
        Identity {
            implementation: self.implementation.to_string(),
            config_contract: self.config_contract.to_string(),
            protocol: self.protocol,
        }
    }

    /// Field bindings; attributes outside the catalogue are skipped.
    pub fn bindings(&self) -> Vec<FieldBinding> {
        let catalogue = self.category.catalogue();
        self.attributes
            .iter()
            .filter_map(|attr| {
                let kind = catalogue.kind_of(attr.field)?;
                Some(
                    FieldBinding::new(attr.attribute_name(), attr.field, kind)
                        .sensitive(catalogue.is_sensitive(attr.field)),
                )
            })
            .collect()
    }

    pub fn schema(&self) -> Schema {
        let catalogue = self.category.catalogue();
        let mut schema = envelope_schema(
            self.category,
            format!(
                "{} {}.\nFor more information refer to [{} {}](https://wiki.servarr.com/sonarr/settings).",
                self.category.title(),
                self.title,
                self.title,
                self.category.title().to_lowercase(),
            ),
        );

        for attr in self.attributes {
            let Some(kind) = catalogue.kind_of(attr.field) else {
                continue;
            };
            let sensitive = catalogue.is_sensitive(attr.field);

            let mut attribute = kind.attribute();
            attribute = if attr.required {
                attribute.required()
            } else if sensitive {
                attribute.optional()
            } else {
                attribute.optional().computed()
            };
            if sensitive {
                attribute = attribute.sensitive();
            }
            if let Some(validator) = attr.check.validator() {
                attribute = attribute.validator(validator);
            }
            schema.insert(attr.attribute_name(), attribute.describe(attr.description()));
        }
        schema
    }

    /// Typed attributes to a service object.
    pub fn to_resource(&self, typed: &Object) -> Result<ProviderResource, TranslationError> {
        let mut resource = encode_envelope(self.category, typed, &self.identity())?;
        resource.fields = encode_fields(&self.bindings(), typed)?;
        Ok(resource)
    }

    /// Service object into typed attributes.
    pub fn from_resource(
        &self,
        resource: &ProviderResource,
        typed: &mut Object,
    ) -> Result<(), TranslationError> {
        decode_envelope(self.category, resource, typed);
        decode_fields(&self.bindings(), &resource.fields, typed)
    }
}

/// Every variant of every category.
pub fn all() -> impl Iterator<Item = &'static VariantSpec> {
    download_client::VARIANTS
        .iter()
        .chain(indexer::VARIANTS)
        .chain(notification::VARIANTS)
        .chain(metadata::VARIANTS)
        .chain(import_list::VARIANTS)
}

/// Variant by full resource kind.
pub fn find(resource_kind: &str) -> Option<&'static VariantSpec> {
    all().find(|v| v.resource_kind() == resource_kind)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::sdk::Field;
    use crate::value::Value;

    #[test]
    fn test_every_variant_field_is_catalogued() {
        for variant in all() {
            let catalogue = variant.category.catalogue();
            for attr in variant.attributes {
                assert!(
                    catalogue.kind_of(attr.field).is_some(),
                    "{}: {} missing from the {} catalogue",
                    variant.resource_kind(),
                    attr.field,
                    variant.category.kind()
                );
            }
        }
    }

    #[test]
    fn test_resource_kinds_are_unique() {
        let mut seen = HashSet::new();
        for variant in all() {
            assert!(seen.insert(variant.resource_kind()), "{}", variant.resource_kind());
        }
    }

    #[test]
    fn test_protocol_matches_category() {
        for variant in all() {
            assert_eq!(
                variant.protocol.is_some(),
                variant.category.has_protocol(),
                "{}",
                variant.resource_kind()
            );
        }
    }

    #[test]
    fn test_attribute_names_do_not_clash_with_envelope() {
        for variant in all() {
            let envelope = envelope_schema(variant.category, "");
            for attr in variant.attributes {
                assert!(
                    envelope.get(&attr.attribute_name()).is_none(),
                    "{}: {}",
                    variant.resource_kind(),
                    attr.attribute_name()
                );
            }
        }
    }

    #[test]
    fn test_variant_schema_only_has_own_fields() {
        let qbittorrent = find("download_client_qbittorrent").unwrap();
        let schema = qbittorrent.schema();
        assert!(schema.get("first_and_last").is_some());
        assert!(schema.get("nzb_folder").is_none());
        assert!(schema.get("password").unwrap().sensitive);
        assert!(schema.get("id").unwrap().is_computed_only());
    }

    #[test]
    fn test_torrent_blackhole_payload() {
        let variant = find("download_client_torrent_blackhole").unwrap();
        let typed = Object::new()
            .with("name", "resourceTorrentBlackholeTest")
            .with("enable", false)
            .with("priority", 1_i64)
            .with("magnet_file_extension", ".torrent")
            .with("watch_folder", "/config/")
            .with("torrent_folder", "/config/");

        let resource = variant.to_resource(&typed).unwrap();
        assert_eq!(resource.implementation, "TorrentBlackhole");
        assert_eq!(resource.config_contract, "TorrentBlackholeSettings");
        assert_eq!(resource.protocol, Some(Protocol::Torrent));
        assert_eq!(resource.field("watchFolder"), Some(&Field::new("watchFolder", json!("/config/"))));
        assert_eq!(resource.field("torrentFolder"), Some(&Field::new("torrentFolder", json!("/config/"))));
        assert_eq!(
            resource.field("magnetFileExtension"),
            Some(&Field::new("magnetFileExtension", json!(".torrent")))
        );
    }

    #[test]
    fn test_kodi_metadata_identity() {
        let kodi = find("metadata_kodi").unwrap();
        assert_eq!(kodi.implementation, "XbmcMetadata");
        assert_eq!(kodi.config_contract, "XbmcMetadataSettings");
        assert_eq!(kodi.protocol, None);
    }

    #[test]
    fn test_from_resource_round_trip() {
        let newznab = find("indexer_newznab").unwrap();
        let typed = Object::new()
            .with("name", "newzabResourceTest")
            .with("base_url", "https://lolo.sickbeard.com")
            .with("api_path", "/api")
            .with("categories", Value::set_of([Value::Int(5030), Value::Int(5040)]))
            .with("enable_automatic_search", false)
            .with("api_key", "secret");

        let mut resource = newznab.to_resource(&typed).unwrap();
        resource.id = Some(1);
        assert_eq!(resource.field("categories").unwrap().value, Some(json!([5030, 5040])));

        let mut decoded = Object::new();
        newznab.from_resource(&resource, &mut decoded).unwrap();
        assert_eq!(decoded.get("id"), &Value::Int(1));
        assert_eq!(decoded.get("base_url"), typed.get("base_url"));
        assert_eq!(decoded.get("categories"), typed.get("categories"));
        assert_eq!(decoded.get("enable_automatic_search"), &Value::Bool(false));
        assert!(decoded.get("api_key").is_null());
    }

    #[test]
    fn test_validators_attached() {
        let webhook = find("notification_webhook").unwrap();
        let config = Object::new()
            .with("name", "hook")
            .with("url", "https://example.com/hook")
            .with("method", 3_i64);
        let diagnostics = webhook.schema().validate(&config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("method"));
    }
}
