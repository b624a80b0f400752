//! Lookups of a single service object by a natural key.

use async_trait::async_trait;
use tracing::debug;

use super::{computed_schema, single, DataSource};
use crate::error::{ProviderError, TranslationError};
use crate::fields::Category;
use crate::resources::{
    client_error, finalize, ClientSlot, GenericCodec, ProviderCodec, ProviderData,
    QualityProfileResourceKind, Resource, RootFolderResourceKind, SeriesResourceKind,
};
use crate::schema::Schema;
use crate::sdk::{
    Endpoint, ProviderResource, QualityProfileResource, RequestContext, RootFolderResource,
    SeriesResource,
};
use crate::value::Object;

fn lookup_key(config: &Object, key: &'static str) -> Result<String, ProviderError> {
    Ok(config
        .string(key)?
        .into_known()
        .ok_or(TranslationError::MissingField(key))?)
}

/// Series by title.
#[derive(Debug, Default)]
pub struct SeriesDataSource {
    resource: SeriesResourceKind,
    client: ClientSlot,
}

impl SeriesDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for SeriesDataSource {
    fn kind(&self) -> String {
        "series".to_string()
    }

    fn schema(&self) -> Schema {
        computed_schema(
            &self.resource.schema(),
            "title",
            "Single Series, looked up by title.",
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, config: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get("series")?;
        let title = lookup_key(config, "title")?;

        let all: Vec<SeriesResource> = client
            .list(ctx, Endpoint::Series)
            .await
            .map_err(client_error("series", "read"))?;
        let series = single(all, "series", "title", &title, |s| s.title == title)?;

        debug!("series {:?} resolved to {:?}", title, series.id);
        let state = self.resource.decode(&series, &Object::new())?;
        Ok(self.schema().conform(&state))
    }
}

/// Root folder by path.
#[derive(Debug, Default)]
pub struct RootFolderDataSource {
    resource: RootFolderResourceKind,
    client: ClientSlot,
}

impl RootFolderDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for RootFolderDataSource {
    fn kind(&self) -> String {
        "root_folder".to_string()
    }

    fn schema(&self) -> Schema {
        computed_schema(
            &self.resource.schema(),
            "path",
            "Single Root Folder, looked up by path.",
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, config: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get("root_folder")?;
        let path = lookup_key(config, "path")?;

        let folders: Vec<RootFolderResource> = client
            .list(ctx, Endpoint::RootFolder)
            .await
            .map_err(client_error("root_folder", "read"))?;
        let folder = single(folders, "root folder", "path", &path, |f| f.path == path)?;

        let state = self.resource.decode(&folder)?;
        Ok(self.schema().conform(&state))
    }
}

/// Quality profile by name.
#[derive(Debug, Default)]
pub struct QualityProfileDataSource {
    resource: QualityProfileResourceKind,
    client: ClientSlot,
}

impl QualityProfileDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for QualityProfileDataSource {
    fn kind(&self) -> String {
        "quality_profile".to_string()
    }

    fn schema(&self) -> Schema {
        computed_schema(
            &self.resource.schema(),
            "name",
            "Single Quality Profile, looked up by name.",
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, config: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get("quality_profile")?;
        let name = lookup_key(config, "name")?;

        let profiles: Vec<QualityProfileResource> = client
            .list(ctx, Endpoint::QualityProfile)
            .await
            .map_err(client_error("quality_profile", "read"))?;
        let profile = single(profiles, "quality profile", "name", &name, |p| p.name == name)?;

        let state = self.resource.decode(&profile)?;
        Ok(self.schema().conform(&state))
    }
}

/// Member of a provider category by name, with every catalogue field the
/// service echoes. Sensitive fields stay null.
#[derive(Debug)]
pub struct ProviderByNameDataSource {
    codec: GenericCodec,
    client: ClientSlot,
}

impl ProviderByNameDataSource {
    pub fn new(category: Category) -> Self {
        Self {
            codec: GenericCodec::new(category),
            client: ClientSlot::new(),
        }
    }
}

#[async_trait]
impl DataSource for ProviderByNameDataSource {
    fn kind(&self) -> String {
        self.codec.kind()
    }

    fn schema(&self) -> Schema {
        computed_schema(
            &self.codec.schema(),
            "name",
            format!(
                "Single {}, looked up by name.",
                self.codec.category().title()
            ),
        )
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, config: &Object) -> Result<Object, ProviderError> {
        let kind = self.kind();
        let client = self.client.get(&kind)?;
        let name = lookup_key(config, "name")?;

        let category = self.codec.category();
        let members: Vec<ProviderResource> = client
            .list(ctx, category.endpoint())
            .await
            .map_err(client_error(&kind, "read"))?;
        let member = single(members, category.title(), "name", &name, |m| m.name == name)?;

        debug!("{} {:?} resolved to {:?}", kind, name, member.id);
        let mut typed = Object::new();
        self.codec.from_resource(&member, &mut typed)?;
        Ok(finalize(&self.schema(), typed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_lookup_schema() {
        let source = ProviderByNameDataSource::new(Category::DownloadClient);
        assert_eq!(source.kind(), "download_client");

        let schema = source.schema();
        assert!(schema.get("name").unwrap().required);
        assert!(schema.get("implementation").unwrap().is_computed_only());
        assert!(schema.get("password").unwrap().sensitive);
    }

    #[test]
    fn test_lookup_key_required() {
        let err = lookup_key(&Object::new(), "title").unwrap_err();
        assert_eq!(err.summary(), "Translation Error");
        assert_eq!(
            lookup_key(&Object::new().with("title", "Friends"), "title").unwrap(),
            "Friends"
        );
    }
}
