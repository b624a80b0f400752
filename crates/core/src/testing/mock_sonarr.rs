//! In-memory Sonarr for testing.

use async_trait::async_trait;
use serde_json::{json, Map, Value as Json};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fields::Category;
use crate::resources::{REDACTED, SINGLETONS};
use crate::sdk::{ApiRequest, ApiResponse, ClientError, Endpoint, Method, SonarrClient, Transport};

const API_PREFIX: &str = "/api/v3/";

/// Failure injected into the next request.
#[derive(Debug, Clone)]
enum Injected {
    Status(u16, String),
    Transport(ClientError),
}

#[derive(Debug, Default)]
struct MockState {
    /// Stored objects by collection path, then id.
    collections: HashMap<String, BTreeMap<i64, Json>>,
    /// Singleton objects by path.
    configs: HashMap<String, Json>,
    /// Templates served under `<collection>/schema`.
    templates: HashMap<String, Json>,
    /// Results of `series/lookup`.
    lookup: Vec<Json>,
    status: Json,
    next_id: i64,
    /// Drop sensitive values from responses instead of masking them.
    omit_secrets: bool,
}

/// Mock implementation of the Sonarr management API.
///
/// Behaves like the service where the provider relies on it:
/// - Assigns ids on create and answers 404 for missing ids
/// - Redacts sensitive values on every response and keeps the stored value
///   when a write sends the redaction mask back
/// - Serves schema templates, series lookup and configuration singletons
/// - Records every request for assertions
///
/// # Example
///
/// ```rust,ignore
/// let sonarr = MockSonarr::new();
/// let client = sonarr.client();
///
/// let tag: TagResource = client
///     .create(&RequestContext::new(), Endpoint::Tag, &TagResource { id: None, label: "hd".into() })
///     .await?;
/// assert_eq!(tag.id, Some(1));
///
/// // Simulate an expired key
/// sonarr.set_unauthorized(true).await;
/// ```
#[derive(Debug, Clone)]
pub struct MockSonarr {
    state: Arc<RwLock<MockState>>,
    requests: Arc<RwLock<Vec<ApiRequest>>>,
    next_failure: Arc<RwLock<Option<Injected>>>,
    unauthorized: Arc<RwLock<bool>>,
}

impl Default for MockSonarr {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSonarr {
    /// Create a mock service with default singletons and status.
    pub fn new() -> Self {
        let mut state = MockState {
            status: super::fixtures::system_status(),
            next_id: 1,
            ..Default::default()
        };
        for spec in SINGLETONS {
            state.configs.insert(
                spec.endpoint.path().to_string(),
                super::fixtures::config(spec.endpoint),
            );
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_failure: Arc::new(RwLock::new(None)),
            unauthorized: Arc::new(RwLock::new(false)),
        }
    }

    /// Client whose transport is this mock.
    pub fn client(&self) -> SonarrClient {
        SonarrClient::with_transport(Arc::new(self.clone()))
    }

    /// Store an object directly, bypassing the API. Keeps an `id` already
    /// present in the object. Returns the id.
    pub async fn insert(&self, endpoint: Endpoint, mut object: Json) -> i64 {
        let mut state = self.state.write().await;
        let id = object["id"].as_i64().unwrap_or(state.next_id);
        state.next_id = state.next_id.max(id + 1);
        object["id"] = json!(id);
        state
            .collections
            .entry(endpoint.path().to_string())
            .or_default()
            .insert(id, object);
        id
    }

    /// Stored object, unredacted.
    pub async fn object(&self, endpoint: Endpoint, id: i64) -> Option<Json> {
        let state = self.state.read().await;
        state
            .collections
            .get(endpoint.path())
            .and_then(|items| items.get(&id))
            .cloned()
    }

    /// Number of stored objects in a collection.
    pub async fn count(&self, endpoint: Endpoint) -> usize {
        let state = self.state.read().await;
        state
            .collections
            .get(endpoint.path())
            .map_or(0, BTreeMap::len)
    }

    /// Delete an object out of band.
    pub async fn remove(&self, endpoint: Endpoint, id: i64) -> Option<Json> {
        let mut state = self.state.write().await;
        state
            .collections
            .get_mut(endpoint.path())
            .and_then(|items| items.remove(&id))
    }

    /// Stored singleton object, unredacted.
    pub async fn config(&self, endpoint: Endpoint) -> Option<Json> {
        self.state.read().await.configs.get(endpoint.path()).cloned()
    }

    pub async fn set_config(&self, endpoint: Endpoint, config: Json) {
        let mut state = self.state.write().await;
        state.configs.insert(endpoint.path().to_string(), config);
    }

    pub async fn set_template(&self, endpoint: Endpoint, template: Json) {
        let mut state = self.state.write().await;
        state.templates.insert(endpoint.path().to_string(), template);
    }

    /// Add a result to the series lookup.
    pub async fn add_lookup(&self, series: Json) {
        self.state.write().await.lookup.push(series);
    }

    pub async fn set_status(&self, status: Json) {
        self.state.write().await.status = status;
    }

    /// Leave sensitive values out of responses entirely, as some service
    /// versions do, instead of masking them.
    pub async fn set_omit_secrets(&self, omit: bool) {
        self.state.write().await.omit_secrets = omit;
    }

    /// Answer every request with 401 while set.
    pub async fn set_unauthorized(&self, unauthorized: bool) {
        *self.unauthorized.write().await = unauthorized;
    }

    /// Make the next request fail with an HTTP status.
    pub async fn fail_next(&self, status: u16, message: impl Into<String>) {
        *self.next_failure.write().await = Some(Injected::Status(status, message.into()));
    }

    /// Make the next request fail before reaching the service.
    pub async fn fail_next_with(&self, error: ClientError) {
        *self.next_failure.write().await = Some(Injected::Transport(error));
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.read().await.clone()
    }

    /// Requests with the given method.
    pub async fn requests_with(&self, method: Method) -> Vec<ApiRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }

    async fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let path = request.path.trim_end_matches('/');

        if path == Endpoint::SystemStatus.path() && request.method == Method::Get {
            return ok(&self.state.read().await.status);
        }
        if path == format!("{}/lookup", Endpoint::Series.path()) {
            return self.lookup(request).await;
        }
        if let Some(collection) = path.strip_suffix("/schema") {
            return match self.state.read().await.templates.get(collection) {
                Some(template) => ok(template),
                None => not_found(),
            };
        }
        if let Some(spec) = SINGLETONS
            .iter()
            .find(|s| path.starts_with(s.endpoint.path()))
        {
            return self.singleton(spec.endpoint.path(), request).await;
        }

        let (collection, id) = split_item(path);
        match (request.method, id) {
            (Method::Get, None) => self.list(collection).await,
            (Method::Get, Some(id)) => self.get(collection, id).await,
            (Method::Post, None) => self.create(collection, request).await,
            (Method::Put, Some(id)) => self.update(collection, id, request).await,
            (Method::Delete, Some(id)) => self.delete(collection, id).await,
            _ => ApiResponse::new(405, r#"{"message":"MethodNotAllowed"}"#),
        }
    }

    async fn lookup(&self, request: &ApiRequest) -> ApiResponse {
        let term = request.query_param("term").unwrap_or_default();
        let state = self.state.read().await;
        let results: Vec<&Json> = match term.strip_prefix("tvdb:") {
            Some(id) => {
                let id: i64 = id.parse().unwrap_or(-1);
                state
                    .lookup
                    .iter()
                    .filter(|s| s["tvdbId"].as_i64() == Some(id))
                    .collect()
            }
            None => {
                let term = term.to_lowercase();
                state
                    .lookup
                    .iter()
                    .filter(|s| {
                        s["title"]
                            .as_str()
                            .is_some_and(|t| t.to_lowercase().contains(&term))
                    })
                    .collect()
            }
        };
        ok(&json!(results))
    }

    async fn singleton(&self, base: &str, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.write().await;
        let omit = state.omit_secrets;
        let Some(current) = state.configs.get_mut(base) else {
            return not_found();
        };
        match request.method {
            Method::Get => ok(&redact(base, current.clone(), omit)),
            Method::Put => {
                let mut body = request.body.clone().unwrap_or(Json::Null);
                keep_redacted(base, current, &mut body);
                body["id"] = current["id"].clone();
                *current = body;
                ok_status(202, &redact(base, current.clone(), omit))
            }
            _ => ApiResponse::new(405, r#"{"message":"MethodNotAllowed"}"#),
        }
    }

    async fn list(&self, collection: &str) -> ApiResponse {
        let state = self.state.read().await;
        let items: Vec<Json> = state
            .collections
            .get(collection)
            .map(|items| {
                items
                    .values()
                    .map(|v| redact(collection, v.clone(), state.omit_secrets))
                    .collect()
            })
            .unwrap_or_default();
        ok(&json!(items))
    }

    async fn get(&self, collection: &str, id: i64) -> ApiResponse {
        let state = self.state.read().await;
        match state.collections.get(collection).and_then(|c| c.get(&id)) {
            Some(item) => ok(&redact(collection, item.clone(), state.omit_secrets)),
            None => not_found(),
        }
    }

    async fn create(&self, collection: &str, request: &ApiRequest) -> ApiResponse {
        let mut body = request.body.clone().unwrap_or_else(|| json!({}));
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        body["id"] = json!(id);
        enrich(collection, &mut body);
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, body.clone());
        ok_status(201, &redact(collection, body, state.omit_secrets))
    }

    async fn update(&self, collection: &str, id: i64, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.write().await;
        let omit = state.omit_secrets;
        let Some(current) = state
            .collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(&id))
        else {
            return not_found();
        };

        let mut body = request.body.clone().unwrap_or_else(|| json!({}));
        keep_redacted(collection, current, &mut body);
        body["id"] = json!(id);
        enrich(collection, &mut body);
        *current = body.clone();
        ok_status(202, &redact(collection, body, omit))
    }

    async fn delete(&self, collection: &str, id: i64) -> ApiResponse {
        let mut state = self.state.write().await;
        match state
            .collections
            .get_mut(collection)
            .and_then(|c| c.remove(&id))
        {
            Some(_) => ApiResponse::new(200, ""),
            None => not_found(),
        }
    }
}

#[async_trait]
impl Transport for MockSonarr {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.write().await.push(request.clone());

        if *self.unauthorized.read().await {
            return Ok(ApiResponse::new(401, r#"{"message":"Unauthorized"}"#));
        }
        if let Some(failure) = self.next_failure.write().await.take() {
            return match failure {
                Injected::Status(status, message) => Ok(ApiResponse::new(
                    status,
                    json!({ "message": message }).to_string(),
                )),
                Injected::Transport(error) => Err(error),
            };
        }
        if !request.path.starts_with(API_PREFIX) {
            return Ok(not_found());
        }

        Ok(self.handle(&request).await)
    }
}

fn ok(body: &Json) -> ApiResponse {
    ok_status(200, body)
}

fn ok_status(status: u16, body: &Json) -> ApiResponse {
    ApiResponse::new(status, body.to_string())
}

fn not_found() -> ApiResponse {
    ApiResponse::new(404, r#"{"message":"NotFound"}"#)
}

/// `/api/v3/tag/4` -> (`/api/v3/tag`, Some(4)).
fn split_item(path: &str) -> (&str, Option<i64>) {
    match path.rsplit_once('/') {
        Some((collection, last)) => match last.parse() {
            Ok(id) => (collection, Some(id)),
            Err(_) => (path, None),
        },
        None => (path, None),
    }
}

/// Keys the service never echoes for a path: provider `fields` entries
/// marked sensitive, or secret singleton keys.
fn sensitive_keys(path: &str) -> Vec<&'static str> {
    if let Some(spec) = SINGLETONS.iter().find(|s| s.endpoint.path() == path) {
        return spec
            .attributes
            .iter()
            .filter(|a| a.sensitive)
            .map(|a| a.field)
            .collect();
    }
    match Category::from_path(path) {
        Some(category) => category
            .catalogue()
            .entries()
            .map(|(name, _)| name)
            .filter(|name| category.catalogue().is_sensitive(name))
            .collect(),
        None => Vec::new(),
    }
}

fn is_mask(value: &Json) -> bool {
    value.as_str() == Some(REDACTED)
}

fn redact(path: &str, mut object: Json, omit: bool) -> Json {
    let keys = sensitive_keys(path);
    if keys.is_empty() {
        return object;
    }
    let is_secret = |value: &Json| !value.is_null();

    if Category::from_path(path).is_some() {
        if let Some(fields) = object.get_mut("fields").and_then(Json::as_array_mut) {
            if omit {
                fields.retain(|field| {
                    !field["name"]
                        .as_str()
                        .is_some_and(|n| keys.iter().any(|k| *k == n))
                });
            }
            for field in fields {
                let sensitive = field["name"]
                    .as_str()
                    .is_some_and(|n| keys.iter().any(|k| *k == n));
                if sensitive && is_secret(&field["value"]) {
                    field["value"] = json!(REDACTED);
                }
            }
        }
    } else if let Some(map) = object.as_object_mut() {
        for key in keys {
            if omit {
                map.remove(key);
            } else if map.get(key).is_some_and(is_secret) {
                map.insert(key.to_string(), json!(REDACTED));
            }
        }
    }
    object
}

/// Replace masked values in an incoming write with the stored ones.
fn keep_redacted(path: &str, stored: &Json, incoming: &mut Json) {
    if Category::from_path(path).is_some() {
        let stored_fields: Map<String, Json> = stored["fields"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|f| Some((f["name"].as_str()?.to_string(), f["value"].clone())))
                    .collect()
            })
            .unwrap_or_default();
        if let Some(fields) = incoming.get_mut("fields").and_then(Json::as_array_mut) {
            for field in fields {
                if is_mask(&field["value"]) {
                    let name = field["name"].as_str().unwrap_or_default();
                    field["value"] = stored_fields.get(name).cloned().unwrap_or(Json::Null);
                }
            }
        }
    } else if let Some(map) = incoming.as_object_mut() {
        for (key, value) in map.iter_mut() {
            if is_mask(value) {
                *value = stored[key.as_str()].clone();
            }
        }
    }
}

/// Server-computed values some collections add on write.
fn enrich(collection: &str, object: &mut Json) {
    if collection == Endpoint::RootFolder.path() {
        object["accessible"] = json!(true);
        object["freeSpace"] = json!(1_000_000_000_i64);
    } else if collection == Endpoint::Series.path() {
        if object["titleSlug"].is_null() {
            let slug = object["title"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-");
            object["titleSlug"] = json!(slug);
        }
        if object["rootFolderPath"].is_null() {
            if let Some((root, _)) = object["path"].as_str().and_then(|p| p.rsplit_once('/')) {
                object["rootFolderPath"] = json!(root);
            }
        }
        if let Some(map) = object.as_object_mut() {
            map.remove("addOptions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{ProviderResource, RequestContext, TagResource};

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let sonarr = MockSonarr::new();
        let client = sonarr.client();
        let ctx = RequestContext::new();

        let first: TagResource = client
            .create(&ctx, Endpoint::Tag, &json!({"label": "a"}))
            .await
            .unwrap();
        let second: TagResource = client
            .create(&ctx, Endpoint::Tag, &json!({"label": "b"}))
            .await
            .unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(sonarr.count(Endpoint::Tag).await, 2);
    }

    #[tokio::test]
    async fn test_missing_item_is_404() {
        let client = MockSonarr::new().client();
        let err = client
            .get::<TagResource>(&RequestContext::new(), Endpoint::Tag, 9)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_sensitive_fields_redacted_and_kept() {
        let sonarr = MockSonarr::new();
        let id = sonarr
            .insert(
                Endpoint::Notification,
                json!({"name": "pb", "fields": [
                    {"name": "apiKey", "value": "secret"},
                    {"name": "channelTags", "value": []}
                ]}),
            )
            .await;
        let client = sonarr.client();
        let ctx = RequestContext::new();

        let read: ProviderResource = client.get(&ctx, Endpoint::Notification, id).await.unwrap();
        assert_eq!(read.field("apiKey").unwrap().value, Some(json!(REDACTED)));

        let _: ProviderResource = client
            .update(&ctx, Endpoint::Notification, id, &read)
            .await
            .unwrap();
        let stored = sonarr.object(Endpoint::Notification, id).await.unwrap();
        assert_eq!(stored["fields"][0]["value"], "secret");
    }

    #[tokio::test]
    async fn test_unauthorized_and_injected_failures() {
        let sonarr = MockSonarr::new();
        let client = sonarr.client();
        let ctx = RequestContext::new();

        sonarr.fail_next(500, "boom").await;
        let err = client.list::<Json>(&ctx, Endpoint::Tag).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert!(client.list::<Json>(&ctx, Endpoint::Tag).await.is_ok());

        sonarr.set_unauthorized(true).await;
        let err = client.list::<Json>(&ctx, Endpoint::Tag).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(sonarr.requests().await.len(), 3);
    }

    #[test]
    fn test_split_item() {
        assert_eq!(split_item("/api/v3/tag/4"), ("/api/v3/tag", Some(4)));
        assert_eq!(split_item("/api/v3/tag"), ("/api/v3/tag", None));
    }
}
