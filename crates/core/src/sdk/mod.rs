//! HTTP client for the Sonarr v3 management API.
//!
//! [`SonarrClient`] is the single shared object of the provider: it is
//! immutable after construction and safe for concurrent use. Requests go
//! through a [`Transport`], so tests can swap the network for an in-memory
//! service.

mod client;
mod context;
mod transport;
mod types;

pub use client::{ClientConfig, SonarrClient};
pub use context::RequestContext;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401, .. })
    }
}

/// REST collections and singletons the provider manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DownloadClient,
    Indexer,
    ImportList,
    Notification,
    Metadata,
    Series,
    Tag,
    RootFolder,
    QualityProfile,
    LanguageProfile,
    DelayProfile,
    RemotePathMapping,
    NamingConfig,
    MediaManagementConfig,
    HostConfig,
    DownloadClientConfig,
    IndexerConfig,
    SystemStatus,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::DownloadClient => "/api/v3/downloadclient",
            Endpoint::Indexer => "/api/v3/indexer",
            Endpoint::ImportList => "/api/v3/importlist",
            Endpoint::Notification => "/api/v3/notification",
            Endpoint::Metadata => "/api/v3/metadata",
            Endpoint::Series => "/api/v3/series",
            Endpoint::Tag => "/api/v3/tag",
            Endpoint::RootFolder => "/api/v3/rootfolder",
            Endpoint::QualityProfile => "/api/v3/qualityprofile",
            Endpoint::LanguageProfile => "/api/v3/languageprofile",
            Endpoint::DelayProfile => "/api/v3/delayprofile",
            Endpoint::RemotePathMapping => "/api/v3/remotepathmapping",
            Endpoint::NamingConfig => "/api/v3/config/naming",
            Endpoint::MediaManagementConfig => "/api/v3/config/mediamanagement",
            Endpoint::HostConfig => "/api/v3/config/host",
            Endpoint::DownloadClientConfig => "/api/v3/config/downloadclient",
            Endpoint::IndexerConfig => "/api/v3/config/indexer",
            Endpoint::SystemStatus => "/api/v3/system/status",
        }
    }

    /// Path of a single item.
    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path(), id)
    }

    /// Provider categories are saved without the service testing them.
    pub fn force_save(&self) -> bool {
        matches!(
            self,
            Endpoint::DownloadClient
                | Endpoint::Indexer
                | Endpoint::ImportList
                | Endpoint::Notification
                | Endpoint::Metadata
        )
    }
}
