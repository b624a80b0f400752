//! Configuration singletons.
//!
//! Each singleton is one flat JSON object on the service. Create and update
//! both read the current object, overlay configured values and write it
//! back; delete only forgets the state.

use async_trait::async_trait;
use serde_json::{Map, Value as Json};
use tracing::{debug, info};

use super::{client_error, finalize, ClientSlot, ProviderData, Resource, SensitiveSnapshot};
use crate::error::{ProviderError, TranslationError};
use crate::fields::{camel_to_snake, decode_fields, encode_fields, FieldBinding, FieldKind};
use crate::schema::{Attribute, Schema};
use crate::sdk::{Endpoint, Field, RequestContext};
use crate::value::Object;
use crate::variants::Check;

/// One key of a singleton object.
#[derive(Debug, Clone, Copy)]
pub struct SingletonAttr {
    pub field: &'static str,
    pub kind: FieldKind,
    pub sensitive: bool,
    pub check: Check,
    pub doc: &'static str,
}

impl SingletonAttr {
    const fn new(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            kind,
            sensitive: false,
            check: Check::None,
            doc: "",
        }
    }

    const fn secret(mut self) -> Self {
        self.sensitive = true;
        self
    }

    const fn check(mut self, check: Check) -> Self {
        self.check = check;
        self
    }

    const fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }
}

const fn b(field: &'static str) -> SingletonAttr {
    SingletonAttr::new(field, FieldKind::Bool)
}

const fn i(field: &'static str) -> SingletonAttr {
    SingletonAttr::new(field, FieldKind::Int)
}

const fn s(field: &'static str) -> SingletonAttr {
    SingletonAttr::new(field, FieldKind::String)
}

/// A configuration singleton.
#[derive(Debug)]
pub struct SingletonSpec {
    pub kind: &'static str,
    pub title: &'static str,
    pub endpoint: Endpoint,
    pub anchor: &'static str,
    pub attributes: &'static [SingletonAttr],
}

pub static NAMING: SingletonSpec = SingletonSpec {
    kind: "naming",
    title: "Naming",
    endpoint: Endpoint::NamingConfig,
    anchor: "episode-naming",
    attributes: &[
        b("renameEpisodes").doc("Sonarr will use the existing file name if false."),
        b("replaceIllegalCharacters").doc("Replace illegal characters. They will be removed if false."),
        i("multiEpisodeStyle")
            .check(Check::OneOfInt(&[0, 1, 2, 3, 4, 5]))
            .doc("Multi episode style. `0` Extend, `1` Duplicate, `2` Repeat, `3` Scene, `4` Range, `5` Prefixed Range."),
        s("standardEpisodeFormat").doc("Standard episode format."),
        s("dailyEpisodeFormat").doc("Daily episode format."),
        s("animeEpisodeFormat").doc("Anime episode format."),
        s("seriesFolderFormat").doc("Series folder format."),
        s("seasonFolderFormat").doc("Season folder format."),
        s("specialsFolderFormat").doc("Specials folder format."),
    ],
};

pub static MEDIA_MANAGEMENT: SingletonSpec = SingletonSpec {
    kind: "media_management",
    title: "Media Management",
    endpoint: Endpoint::MediaManagementConfig,
    anchor: "media-management",
    attributes: &[
        b("autoUnmonitorPreviouslyDownloadedEpisodes").doc("Unmonitor deleted files."),
        s("recycleBin").doc("Recycle bin absolute path."),
        i("recycleBinCleanupDays").doc("Recycle bin days of retention."),
        s("downloadPropersAndRepacks")
            .check(Check::OneOfString(&["preferAndUpgrade", "doNotUpgrade", "doNotPrefer"]))
            .doc("Download propers and repacks."),
        b("createEmptySeriesFolders").doc("Create empty series directories."),
        b("deleteEmptyFolders").doc("Delete empty series directories."),
        s("fileDate")
            .check(Check::OneOfString(&["none", "localAirDate", "utcAirDate"]))
            .doc("Change file date."),
        s("rescanAfterRefresh")
            .check(Check::OneOfString(&["always", "afterManual", "never"]))
            .doc("Rescan after refresh."),
        b("setPermissionsLinux").doc("Set permission."),
        s("chmodFolder").doc("Permission in linux format."),
        s("chownGroup").doc("Group used for permission."),
        s("episodeTitleRequired")
            .check(Check::OneOfString(&["always", "bulkSeasonReleases", "never"]))
            .doc("Episode title required."),
        b("skipFreeSpaceCheckWhenImporting").doc("Skip free space check before importing."),
        i("minimumFreeSpaceWhenImporting").doc("Minimum free space in MB to allow import."),
        b("copyUsingHardlinks").doc("Use hardlinks instead of copy."),
        b("importExtraFiles").doc("Import extra files."),
        s("extraFileExtensions").doc("Comma separated list of extra files to import."),
        b("enableMediaInfo").doc("Scan files details."),
    ],
};

pub static HOST: SingletonSpec = SingletonSpec {
    kind: "host",
    title: "Host",
    endpoint: Endpoint::HostConfig,
    anchor: "host",
    attributes: &[
        s("bindAddress").doc("Bind address."),
        i("port").doc("Port."),
        i("sslPort").doc("SSL port."),
        b("enableSsl").doc("Enable SSL."),
        b("launchBrowser").doc("Launch browser flag."),
        s("authenticationMethod")
            .check(Check::OneOfString(&["none", "basic", "forms", "external"]))
            .doc("Authentication method."),
        s("username").doc("Authentication username."),
        s("password").secret().doc("Authentication password."),
        b("analyticsEnabled").doc("Analytics enabled flag."),
        s("logLevel")
            .check(Check::OneOfString(&["info", "debug", "trace"]))
            .doc("Log level."),
        s("consoleLogLevel").doc("Console log level."),
        s("branch").doc("Update branch."),
        s("sslCertPath").doc("SSL certificate path."),
        s("sslCertPassword").secret().doc("SSL certificate password."),
        s("urlBase").doc("URL base."),
        s("instanceName").doc("Instance name."),
        b("updateAutomatically").doc("Update automatically flag."),
        s("updateMechanism")
            .check(Check::OneOfString(&["builtIn", "script", "external", "apt", "docker"]))
            .doc("Update mechanism."),
        s("updateScriptPath").doc("Update script path."),
        b("proxyEnabled").doc("Proxy enabled flag."),
        s("proxyType")
            .check(Check::OneOfString(&["http", "socks4", "socks5"]))
            .doc("Proxy type."),
        s("proxyHostname").doc("Proxy hostname."),
        i("proxyPort").doc("Proxy port."),
        s("proxyUsername").doc("Proxy username."),
        s("proxyPassword").secret().doc("Proxy password."),
        s("proxyBypassFilter").doc("Proxy bypass filter."),
        b("proxyBypassLocalAddresses").doc("Bypass proxy for local addresses."),
        s("certificateValidation")
            .check(Check::OneOfString(&["enabled", "disabledForLocalAddresses", "disabled"]))
            .doc("Certificate validation."),
        s("backupFolder").doc("Backup folder."),
        i("backupInterval").doc("Backup interval in days."),
        i("backupRetention").doc("Backup retention in days."),
    ],
};

pub static DOWNLOAD_CLIENT_CONFIG: SingletonSpec = SingletonSpec {
    kind: "download_client_config",
    title: "Download Client Config",
    endpoint: Endpoint::DownloadClientConfig,
    anchor: "completed-download-handling",
    attributes: &[
        s("downloadClientWorkingFolders").doc("Download client working folders."),
        b("enableCompletedDownloadHandling").doc("Enable Completed Download Handling flag."),
        b("autoRedownloadFailed").doc("Auto Redownload Failed flag."),
    ],
};

pub static INDEXER_CONFIG: SingletonSpec = SingletonSpec {
    kind: "indexer_config",
    title: "Indexer Config",
    endpoint: Endpoint::IndexerConfig,
    anchor: "options",
    attributes: &[
        i("minimumAge").doc("Minimum Age (minutes)."),
        i("retention").doc("Retention (days)."),
        i("maximumSize").doc("Maximum size (MB)."),
        i("rssSyncInterval").doc("RSS sync interval (minutes)."),
    ],
};

pub static SINGLETONS: &[&SingletonSpec] = &[
    &NAMING,
    &MEDIA_MANAGEMENT,
    &HOST,
    &DOWNLOAD_CLIENT_CONFIG,
    &INDEXER_CONFIG,
];

impl SingletonSpec {
    pub fn bindings(&self) -> Vec<FieldBinding> {
        self.attributes
            .iter()
            .map(|attr| {
                FieldBinding::new(camel_to_snake(attr.field), attr.field, attr.kind)
                    .sensitive(attr.sensitive)
            })
            .collect()
    }

    pub fn schema(&self) -> Schema {
        let mut schema = Schema::new(format!(
            "{} resource.\nFor more information refer to [{}](https://wiki.servarr.com/sonarr/settings#{}).",
            self.title, self.title, self.anchor,
        ))
        .attribute(
            "id",
            Attribute::int64()
                .computed()
                .use_state_for_unknown()
                .describe(format!("{} ID.", self.title)),
        );

        for attr in self.attributes {
            let mut attribute = attr.kind.attribute().optional();
            attribute = if attr.sensitive {
                attribute.sensitive()
            } else {
                attribute.computed()
            };
            if let Some(validator) = attr.check.validator() {
                attribute = attribute.validator(validator);
            }
            schema.insert(camel_to_snake(attr.field), attribute.describe(attr.doc));
        }
        schema
    }

    /// Overlay configured values on the current object.
    pub fn overlay(
        &self,
        typed: &Object,
        current: &mut Map<String, Json>,
    ) -> Result<(), TranslationError> {
        for field in encode_fields(&self.bindings(), typed)? {
            if let Some(value) = field.value {
                current.insert(field.name, value);
            }
        }
        Ok(())
    }

    /// Write the service object into typed attributes.
    pub fn decode(
        &self,
        object: &Map<String, Json>,
        typed: &mut Object,
    ) -> Result<(), TranslationError> {
        let fields: Vec<Field> = self
            .attributes
            .iter()
            .filter_map(|attr| {
                object
                    .get(attr.field)
                    .map(|value| Field::new(attr.field, value.clone()))
            })
            .collect();
        decode_fields(&self.bindings(), &fields, typed)?;

        if let Some(id) = object.get("id").and_then(Json::as_i64) {
            typed.set("id", id);
        }
        Ok(())
    }
}

/// Reconciler for one singleton.
pub struct SingletonResource {
    spec: &'static SingletonSpec,
    schema: Schema,
    client: ClientSlot,
}

impl SingletonResource {
    pub fn new(spec: &'static SingletonSpec) -> Self {
        Self {
            spec,
            schema: spec.schema(),
            client: ClientSlot::new(),
        }
    }

    fn finish(&self, object: &Map<String, Json>, base: &Object) -> Result<Object, ProviderError> {
        let snapshot = SensitiveSnapshot::capture(&self.schema, base);
        let mut typed = base.clone();
        self.spec.decode(object, &mut typed)?;
        snapshot.restore(&mut typed);
        Ok(finalize(&self.schema, typed))
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        plan: &Object,
        operation: &'static str,
    ) -> Result<Object, ProviderError> {
        let client = self.client.get(self.spec.kind)?;

        let mut current: Map<String, Json> = client
            .get_config(ctx, self.spec.endpoint)
            .await
            .map_err(client_error(self.spec.kind, operation))?;
        let id = current
            .get("id")
            .and_then(Json::as_i64)
            .ok_or(TranslationError::MissingField("id"))?;

        self.spec.overlay(plan, &mut current)?;
        let updated: Map<String, Json> = client
            .put_config(ctx, self.spec.endpoint, id, &current)
            .await
            .map_err(client_error(self.spec.kind, operation))?;

        info!("{} {} config id={}", operation, self.spec.kind, id);
        self.finish(&updated, plan)
    }
}

#[async_trait]
impl Resource for SingletonResource {
    fn kind(&self) -> String {
        self.spec.kind.to_string()
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn create(&self, ctx: &RequestContext, plan: &Object) -> Result<Object, ProviderError> {
        self.write(ctx, plan, "create").await
    }

    async fn read(
        &self,
        ctx: &RequestContext,
        state: &Object,
    ) -> Result<Option<Object>, ProviderError> {
        let client = self.client.get(self.spec.kind)?;
        let current: Map<String, Json> = client
            .get_config(ctx, self.spec.endpoint)
            .await
            .map_err(client_error(self.spec.kind, "read"))?;
        self.finish(&current, state).map(Some)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        plan: &Object,
        _prior: &Object,
    ) -> Result<Object, ProviderError> {
        self.write(ctx, plan, "update").await
    }

    async fn delete(&self, _ctx: &RequestContext, _state: &Object) -> Result<(), ProviderError> {
        debug!("{} cannot be deleted, removing from state only", self.spec.kind);
        Ok(())
    }
}
