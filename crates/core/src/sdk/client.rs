//! Typed helpers over a [`Transport`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::RequestContext;
use super::transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
use super::types::{SeriesResource, SystemStatusResource};
use super::{ClientError, Endpoint};

/// Connection settings for a [`SonarrClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://localhost:8989`.
    pub url: String,
    pub api_key: String,
    /// Headers sent with every request, in addition to `X-Api-Key`.
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
    /// Retries for GET requests on transport errors.
    #[serde(default)]
    pub get_retries: u32,
}

/// Sonarr API client.
///
/// Immutable once built; cloning shares the underlying transport.
#[derive(Clone)]
pub struct SonarrClient {
    transport: Arc<dyn Transport>,
    get_retries: u32,
}

impl std::fmt::Debug for SonarrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SonarrClient")
            .field("transport", &self.transport.name())
            .field("get_retries", &self.get_retries)
            .finish()
    }
}

impl SonarrClient {
    /// Client talking to a live service over HTTP.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self {
            transport: Arc::new(transport),
            get_retries: config.get_retries,
        })
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            get_retries: 0,
        }
    }

    pub fn with_get_retries(mut self, retries: u32) -> Self {
        self.get_retries = retries;
        self
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Send a request, mapping non-2xx responses to [`ClientError::Status`].
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<ApiResponse, ClientError> {
        let mut attempt = 0;
        loop {
            debug!("{} {}", request.method, request.path);
            let result = ctx.run(self.transport.send(request.clone())).await;

            match result {
                Err(ClientError::Connection(reason))
                    if request.method == Method::Get && attempt < self.get_retries =>
                {
                    attempt += 1;
                    warn!(
                        "GET {} failed ({}), retry {}/{}",
                        request.path, reason, attempt, self.get_retries
                    );
                }
                Err(e) => return Err(e),
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => {
                    return Err(ClientError::Status {
                        status: response.status,
                        message: error_message(&response),
                    })
                }
            }
        }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.execute(ctx, request).await?;
        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
    ) -> Result<Vec<T>, ClientError> {
        self.execute_json(ctx, ApiRequest::get(endpoint.path())).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
        id: i64,
    ) -> Result<T, ClientError> {
        self.execute_json(ctx, ApiRequest::get(endpoint.item_path(id)))
            .await
    }

    pub async fn create<T, B>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::post(endpoint.path(), encode(body)?);
        if endpoint.force_save() {
            request = request.with_query("forceSave", "true");
        }
        self.execute_json(ctx, request).await
    }

    pub async fn update<T, B>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
        id: i64,
        body: &B,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::put(endpoint.item_path(id), encode(body)?);
        if endpoint.force_save() {
            request = request.with_query("forceSave", "true");
        }
        self.execute_json(ctx, request).await
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
        id: i64,
    ) -> Result<(), ClientError> {
        self.execute(ctx, ApiRequest::delete(endpoint.item_path(id)))
            .await
            .map(|_| ())
    }

    /// DELETE with extra query parameters (e.g. `deleteFiles`).
    pub async fn delete_with(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
        id: i64,
        query: &[(&str, &str)],
    ) -> Result<(), ClientError> {
        let request = query
            .iter()
            .fold(ApiRequest::delete(endpoint.item_path(id)), |r, (k, v)| {
                r.with_query(*k, *v)
            });
        self.execute(ctx, request).await.map(|_| ())
    }

    /// Read a configuration singleton.
    pub async fn get_config<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
    ) -> Result<T, ClientError> {
        self.execute_json(ctx, ApiRequest::get(endpoint.path())).await
    }

    /// Write a configuration singleton.
    pub async fn put_config<T, B>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
        id: i64,
        body: &B,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_json(ctx, ApiRequest::put(endpoint.item_path(id), encode(body)?))
            .await
    }

    /// Template object used to build a new item (quality and language
    /// profiles).
    pub async fn schema_template<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: Endpoint,
    ) -> Result<T, ClientError> {
        let path = format!("{}/schema", endpoint.path());
        self.execute_json(ctx, ApiRequest::get(path)).await
    }

    /// Search the metadata source, e.g. `tvdb:81189`.
    pub async fn lookup_series(
        &self,
        ctx: &RequestContext,
        term: &str,
    ) -> Result<Vec<SeriesResource>, ClientError> {
        let path = format!("{}/lookup", Endpoint::Series.path());
        self.execute_json(ctx, ApiRequest::get(path).with_query("term", term))
            .await
    }

    pub async fn system_status(
        &self,
        ctx: &RequestContext,
    ) -> Result<SystemStatusResource, ClientError> {
        self.get_config(ctx, Endpoint::SystemStatus).await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationFailure {
    #[serde(default)]
    property_name: Option<String>,
    error_message: String,
}

/// Human-readable message from an error body.
///
/// The service answers either `{"message": ..}` or a list of validation
/// failures.
fn error_message(response: &ApiResponse) -> String {
    let body = response.body.trim();
    if body.is_empty() {
        return format!("status {}", response.status);
    }

    if let Ok(failures) = serde_json::from_str::<Vec<ValidationFailure>>(body) {
        if !failures.is_empty() {
            return failures
                .iter()
                .map(|f| match &f.property_name {
                    Some(property) if !property.is_empty() => {
                        format!("{}: {}", property, f.error_message)
                    }
                    _ => f.error_message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ");
        }
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        if let Some(serde_json::Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }

    body.chars().take(512).collect()
}
