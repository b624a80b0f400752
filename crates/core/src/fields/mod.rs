//! The `fields` array of polymorphic provider objects.
//!
//! Every provider category (download clients, indexers, notifications,
//! metadata consumers, import lists) carries its variant settings as
//! loosely typed `{name, value}` entries. The catalogue fixes which names
//! exist per category and how they are typed; the codec moves values
//! between those entries and typed attributes.

mod catalogue;
mod codec;

pub use catalogue::FieldCatalogue;
pub use codec::{camel_to_snake, decode_fields, encode_fields};

use crate::schema::Attribute;
use crate::sdk::Endpoint;

/// Provider categories sharing the polymorphic object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DownloadClient,
    Indexer,
    Notification,
    Metadata,
    ImportList,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::DownloadClient,
        Category::Indexer,
        Category::Notification,
        Category::Metadata,
        Category::ImportList,
    ];

    /// Prefix of resource kinds in this category, e.g. `download_client`.
    pub fn kind(&self) -> &'static str {
        match self {
            Category::DownloadClient => "download_client",
            Category::Indexer => "indexer",
            Category::Notification => "notification",
            Category::Metadata => "metadata",
            Category::ImportList => "import_list",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::DownloadClient => "Download Client",
            Category::Indexer => "Indexer",
            Category::Notification => "Notification",
            Category::Metadata => "Metadata",
            Category::ImportList => "Import List",
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Category::DownloadClient => Endpoint::DownloadClient,
            Category::Indexer => Endpoint::Indexer,
            Category::Notification => Endpoint::Notification,
            Category::Metadata => Endpoint::Metadata,
            Category::ImportList => Endpoint::ImportList,
        }
    }

    /// Whether objects of this category carry a `protocol` discriminator.
    pub fn has_protocol(&self) -> bool {
        matches!(self, Category::DownloadClient | Category::Indexer)
    }

    /// Category owning a REST collection path, if any.
    pub fn from_path(path: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.endpoint().path() == path)
    }
}

/// Dynamic type of a field entry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    String,
    StringSet,
    IntSet,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "int64",
            FieldKind::Float => "float64",
            FieldKind::String => "string",
            FieldKind::StringSet => "set of string",
            FieldKind::IntSet => "set of int64",
        }
    }

    /// Schema attribute of this kind, without flags.
    pub fn attribute(&self) -> Attribute {
        match self {
            FieldKind::Bool => Attribute::bool(),
            FieldKind::Int => Attribute::int64(),
            FieldKind::Float => Attribute::float64(),
            FieldKind::String => Attribute::string(),
            FieldKind::StringSet => Attribute::string_set(),
            FieldKind::IntSet => Attribute::int_set(),
        }
    }
}

/// Ties a typed attribute to a field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub attribute: String,
    pub field: &'static str,
    pub kind: FieldKind,
    pub sensitive: bool,
}

impl FieldBinding {
    pub fn new(attribute: impl Into<String>, field: &'static str, kind: FieldKind) -> Self {
        Self {
            attribute: attribute.into(),
            field,
            kind,
            sensitive: false,
        }
    }

    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_only_on_download_clients_and_indexers() {
        assert!(Category::DownloadClient.has_protocol());
        assert!(Category::Indexer.has_protocol());
        assert!(!Category::Notification.has_protocol());
        assert!(!Category::Metadata.has_protocol());
        assert!(!Category::ImportList.has_protocol());
    }

    #[test]
    fn test_category_from_path() {
        assert_eq!(
            Category::from_path("/api/v3/notification"),
            Some(Category::Notification)
        );
        assert_eq!(Category::from_path("/api/v3/tag"), None);
    }
}
