use async_trait::async_trait;

use super::DataSource;
use crate::error::ProviderError;
use crate::resources::{client_error, ClientSlot, ProviderData};
use crate::schema::{Attribute, Schema};
use crate::sdk::{RequestContext, SystemStatusResource};
use crate::value::Object;

const KIND: &str = "system_status";

const STRINGS: &[(&str, &str)] = &[
    ("app_name", "Application name."),
    ("instance_name", "Instance name."),
    ("version", "Version."),
    ("build_time", "Build time."),
    ("start_time", "Start time."),
    ("os_name", "OS name."),
    ("os_version", "OS version."),
    ("branch", "Branch."),
    ("authentication", "Authentication method."),
    ("url_base", "Base URL."),
    ("runtime_name", "Runtime name."),
    ("runtime_version", "Runtime version."),
    ("startup_path", "Startup path."),
    ("app_data", "AppData folder."),
];

const FLAGS: &[(&str, &str)] = &[
    ("is_debug", "Debug flag."),
    ("is_production", "Production flag."),
    ("is_docker", "Docker flag."),
    ("is_linux", "Linux flag."),
    ("is_osx", "OSX flag."),
    ("is_windows", "Windows flag."),
];

/// Status of the managed instance.
#[derive(Debug, Default)]
pub struct SystemStatusDataSource {
    client: ClientSlot,
}

impl SystemStatusDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode(status: SystemStatusResource) -> Object {
        Object::new()
            .with("app_name", status.app_name)
            .with("instance_name", status.instance_name)
            .with("version", status.version)
            .with("build_time", status.build_time)
            .with("start_time", status.start_time)
            .with("os_name", status.os_name)
            .with("os_version", status.os_version)
            .with("branch", status.branch)
            .with("authentication", status.authentication)
            .with("url_base", status.url_base)
            .with("runtime_name", status.runtime_name)
            .with("runtime_version", status.runtime_version)
            .with("startup_path", status.startup_path)
            .with("app_data", status.app_data)
            .with("is_debug", status.is_debug)
            .with("is_production", status.is_production)
            .with("is_docker", status.is_docker)
            .with("is_linux", status.is_linux)
            .with("is_osx", status.is_osx)
            .with("is_windows", status.is_windows)
            .with("migration_version", status.migration_version)
    }
}

#[async_trait]
impl DataSource for SystemStatusDataSource {
    fn kind(&self) -> String {
        KIND.to_string()
    }

    fn schema(&self) -> Schema {
        let mut schema = Schema::new(
            "System Status.\nFor more information refer to [Status](https://wiki.servarr.com/sonarr/system#status).",
        );
        for (name, doc) in STRINGS {
            schema.insert(*name, Attribute::string().computed().describe(*doc));
        }
        for (name, doc) in FLAGS {
            schema.insert(*name, Attribute::bool().computed().describe(*doc));
        }
        schema.insert(
            "migration_version",
            Attribute::int64().computed().describe("Migration version."),
        );
        schema
    }

    fn configure(&self, data: Option<&ProviderData>) -> Result<(), ProviderError> {
        self.client.configure(data)
    }

    async fn read(&self, ctx: &RequestContext, _config: &Object) -> Result<Object, ProviderError> {
        let client = self.client.get(KIND)?;
        let status = client
            .system_status(ctx)
            .await
            .map_err(client_error(KIND, "read"))?;
        Ok(Self::decode(status))
    }
}
