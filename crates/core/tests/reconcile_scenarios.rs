//! End-to-end reconcile scenarios for the polymorphic categories.
//!
//! Each test drives a resource through plan -> create -> read -> update
//! against the in-memory service and checks both the state handed back to
//! the host and the payloads the service received.

use std::sync::Arc;

use serde_json::{json, Value as Json};

use sonarr_provider_core::{
    sdk::{Endpoint, Method},
    testing::MockSonarr,
    Object, RequestContext, Resource, SonarrProvider, Value,
};

/// Provider wired to a mock service.
struct TestHarness {
    sonarr: MockSonarr,
    provider: SonarrProvider,
    ctx: RequestContext,
}

impl TestHarness {
    fn new() -> Self {
        let sonarr = MockSonarr::new();
        let provider = SonarrProvider::new();
        provider
            .configure_with(Some(sonarr.client()))
            .expect("configure provider");
        Self {
            sonarr,
            provider,
            ctx: RequestContext::new(),
        }
    }

    fn resource(&self, kind: &str) -> Arc<dyn Resource> {
        self.provider
            .resource(&format!("sonarr_{}", kind))
            .unwrap_or_else(|| panic!("no resource {}", kind))
    }

    async fn create(&self, kind: &str, config: Object) -> Object {
        let resource = self.resource(kind);
        let schema = resource.schema();
        let diagnostics = schema.validate(&config);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);

        let plan = schema.plan(&config, None);
        resource
            .create(&self.ctx, &plan.state)
            .await
            .expect("create")
    }

    async fn update(&self, kind: &str, config: Object, prior: &Object) -> Object {
        let resource = self.resource(kind);
        let plan = resource.schema().plan(&config, Some(prior));
        resource
            .update(&self.ctx, &plan.state, prior)
            .await
            .expect("update")
    }

    async fn read(&self, kind: &str, state: &Object) -> Object {
        self.resource(kind)
            .read(&self.ctx, state)
            .await
            .expect("read")
            .expect("object exists")
    }

    /// Body of the last write with `method`.
    async fn last_body(&self, method: Method) -> Json {
        self.sonarr
            .requests_with(method)
            .await
            .pop()
            .and_then(|r| r.body)
            .expect("a request body")
    }
}

fn field<'a>(body: &'a Json, name: &str) -> Option<&'a Json> {
    body["fields"]
        .as_array()?
        .iter()
        .find(|f| f["name"] == name)
        .map(|f| &f["value"])
}

fn ints(values: &[i64]) -> Value {
    Value::set_of(values.iter().map(|v| Value::Int(*v)))
}

#[tokio::test]
async fn test_torrent_blackhole_create() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("name", "resourceTorrentBlackholeTest")
        .with("enable", false)
        .with("priority", 1_i64)
        .with("magnet_file_extension", ".torrent")
        .with("watch_folder", "/config/")
        .with("torrent_folder", "/config/");

    let state = h.create("download_client_torrent_blackhole", config).await;

    let body = h.last_body(Method::Post).await;
    assert_eq!(body["implementation"], "TorrentBlackhole");
    assert_eq!(body["configContract"], "TorrentBlackholeSettings");
    assert_eq!(body["protocol"], "torrent");
    assert_eq!(field(&body, "watchFolder"), Some(&json!("/config/")));
    assert_eq!(field(&body, "torrentFolder"), Some(&json!("/config/")));
    assert_eq!(field(&body, "magnetFileExtension"), Some(&json!(".torrent")));

    let post = &h.sonarr.requests_with(Method::Post).await[0];
    assert_eq!(post.query_param("forceSave"), Some("true"));

    let id = state.int("id").unwrap().into_known().unwrap();
    assert!(id >= 1);
    let read = h.read("download_client_torrent_blackhole", &state).await;
    assert_eq!(read, state);
    assert!(state.unknown_names().is_empty());
}

#[tokio::test]
async fn test_qbittorrent_update_keeps_other_attributes() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("name", "qbittorrent")
        .with("host", "qbittorrent")
        .with("url_base", "/qbittorrent/")
        .with("port", 9091_i64)
        .with("tv_category", "tv-sonarr")
        .with("first_and_last", true);

    let created = h.create("download_client_qbittorrent", config.clone()).await;
    let updated = h
        .update(
            "download_client_qbittorrent",
            config.with("host", "qbittorrent-host"),
            &created,
        )
        .await;

    let read = h.read("download_client_qbittorrent", &updated).await;
    assert_eq!(read.string("host").unwrap().into_known().unwrap(), "qbittorrent-host");
    assert_eq!(read.get("url_base"), &Value::from("/qbittorrent/"));
    assert_eq!(read.get("port"), &Value::Int(9091));
    assert_eq!(read.get("tv_category"), &Value::from("tv-sonarr"));
    assert_eq!(read.get("first_and_last"), &Value::Bool(true));
    assert_eq!(read.get("id"), created.get("id"));
}

#[tokio::test]
async fn test_newznab_categories_and_toggle_update() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("name", "newzabResourceTest")
        .with("base_url", "https://lolo.sickbeard.com")
        .with("api_path", "/api")
        .with("categories", ints(&[5030, 5040]))
        .with("enable_automatic_search", false);

    let created = h.create("indexer_newznab", config.clone()).await;
    let body = h.last_body(Method::Post).await;
    assert_eq!(field(&body, "categories"), Some(&json!([5030, 5040])));
    assert_eq!(body["protocol"], "usenet");

    let updated = h
        .update(
            "indexer_newznab",
            config.with("enable_automatic_search", true),
            &created,
        )
        .await;
    let read = h.read("indexer_newznab", &updated).await;
    assert_eq!(read.get("enable_automatic_search"), &Value::Bool(true));
    assert_eq!(read.get("base_url"), &Value::from("https://lolo.sickbeard.com"));
    assert_eq!(read.get("api_path"), &Value::from("/api"));
    assert_eq!(read.get("categories"), &ints(&[5040, 5030]));
}

#[tokio::test]
async fn test_pushbullet_api_key_preserved() {
    let h = TestHarness::new();
    h.sonarr.set_omit_secrets(true).await;
    let config = Object::new()
        .with("name", "pushbullet")
        .with("api_key", "key1")
        .with("on_grab", true);

    let created = h.create("notification_pushbullet", config.clone()).await;
    assert_eq!(created.get("api_key"), &Value::from("key1"));

    let id = created.int("id").unwrap().into_known().unwrap();
    let raw = h
        .sonarr
        .client()
        .get::<Json>(&h.ctx, Endpoint::Notification, id)
        .await
        .unwrap();
    assert!(field(&raw, "apiKey").is_none());

    let read = h.read("notification_pushbullet", &created).await;
    assert_eq!(read.get("api_key"), &Value::from("key1"));

    let updated = h
        .update(
            "notification_pushbullet",
            config.with("api_key", "key2"),
            &read,
        )
        .await;
    let read = h.read("notification_pushbullet", &updated).await;
    assert_eq!(read.get("api_key"), &Value::from("key2"));

    let stored = h.sonarr.object(Endpoint::Notification, id).await.unwrap();
    assert_eq!(field(&stored, "apiKey"), Some(&json!("key2")));
}

#[tokio::test]
async fn test_masked_secret_preserved() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("name", "transmission")
        .with("host", "transmission")
        .with("port", 9091_i64)
        .with("username", "admin")
        .with("password", "hunter2");

    let created = h.create("download_client_transmission", config).await;
    let read = h.read("download_client_transmission", &created).await;
    assert_eq!(read.get("password"), &Value::from("hunter2"));
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_kodi_metadata_flags_preserved() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("name", "kodiResourceTest")
        .with("enable", false)
        .with("series_metadata", false)
        .with("series_images", true)
        .with("episode_images", true)
        .with("series_metadata_url", false)
        .with("season_images", true)
        .with("episode_metadata", false);

    let created = h.create("metadata_kodi", config.clone()).await;
    let body = h.last_body(Method::Post).await;
    assert_eq!(body["implementation"], "XbmcMetadata");
    assert_eq!(body["configContract"], "XbmcMetadataSettings");
    assert!(body.get("protocol").is_none());

    let updated = h
        .update("metadata_kodi", config.with("series_metadata", true), &created)
        .await;
    let read = h.read("metadata_kodi", &updated).await;
    assert_eq!(read.get("series_metadata"), &Value::Bool(true));
    for flag in ["series_images", "episode_images", "season_images"] {
        assert_eq!(read.get(flag), &Value::Bool(true), "{}", flag);
    }
    for flag in ["series_metadata_url", "episode_metadata", "enable"] {
        assert_eq!(read.get(flag), &Value::Bool(false), "{}", flag);
    }
}

#[tokio::test]
async fn test_tag_set_round_trips() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("name", "discord")
        .with("web_hook_url", "https://discord.com/api/webhooks/1")
        .with("tags", ints(&[3, 1, 2]));

    let created = h.create("notification_discord", config).await;
    assert_eq!(created.get("tags"), &ints(&[1, 2, 3]));

    let read = h.read("notification_discord", &created).await;
    assert_eq!(read.get("tags"), &ints(&[1, 2, 3]));
}

#[tokio::test]
async fn test_import_by_integer() {
    let h = TestHarness::new();
    h.sonarr
        .insert(
            Endpoint::Tag,
            json!({"id": 42, "label": "imported"}),
        )
        .await;
    let tag = h.resource("tag");

    let imported = tag.import_state(&h.ctx, "42").await.unwrap();
    assert_eq!(imported.get("id"), &Value::Int(42));
    assert!(imported.get("label").is_null());

    let read = h.read("tag", &imported).await;
    let existing = h
        .read("tag", &Object::new().with("id", 42_i64).with("label", "x"))
        .await;
    assert_eq!(read, existing);
    assert_eq!(read.get("label"), &Value::from("imported"));

    let err = tag.import_state(&h.ctx, "not-a-number").await.unwrap_err();
    assert_eq!(err.summary(), "Unexpected Import Identifier");
}

#[tokio::test]
async fn test_import_generic_member() {
    let h = TestHarness::new();
    let id = h
        .sonarr
        .insert(
            Endpoint::Indexer,
            json!({
                "name": "rarbg",
                "implementation": "Rarbg",
                "configContract": "RarbgSettings",
                "protocol": "torrent",
                "enableRss": true,
                "tags": [],
                "fields": [
                    {"name": "baseUrl", "value": "https://torrentapi.org"},
                    {"name": "rankedOnly", "value": false}
                ]
            }),
        )
        .await;

    let resource = h.resource("indexer");
    let imported = resource.import_state(&h.ctx, &id.to_string()).await.unwrap();
    let read = h.read("indexer", &imported).await;
    assert_eq!(read.get("implementation"), &Value::from("Rarbg"));
    assert_eq!(read.get("protocol"), &Value::from("torrent"));
    assert_eq!(read.get("base_url"), &Value::from("https://torrentapi.org"));
    assert_eq!(read.get("ranked_only"), &Value::Bool(false));
}

#[tokio::test]
async fn test_validators_reject_out_of_range() {
    let h = TestHarness::new();

    let webhook = h.resource("notification_webhook").schema();
    let diagnostics = webhook.validate(
        &Object::new()
            .with("name", "hook")
            .with("url", "https://example.com")
            .with("method", 3_i64),
    );
    assert_eq!(diagnostics.len(), 1);

    let series = h.resource("series").schema();
    let diagnostics = series.validate(
        &Object::new()
            .with("title", "Friends")
            .with("tvdb_id", 79168_i64)
            .with("quality_profile_id", 1_i64)
            .with("path", "/tv/Friends")
            .with("series_type", "weekly"),
    );
    assert!(diagnostics
        .iter()
        .any(|d| d.attribute.as_deref() == Some("series_type")));

    let import_list = h.resource("import_list_imdb").schema();
    let diagnostics = import_list.validate(
        &Object::new()
            .with("name", "imdb")
            .with("list_id", "ls000")
            .with("should_monitor", "sometimes"),
    );
    assert!(diagnostics
        .iter()
        .any(|d| d.attribute.as_deref() == Some("should_monitor")));
}

#[tokio::test]
async fn test_unauthorized_create_and_read() {
    let h = TestHarness::new();
    let created = h
        .create("tag", Object::new().with("label", "before"))
        .await;

    h.sonarr.set_unauthorized(true).await;
    let tag = h.resource("tag");

    let err = tag
        .create(&h.ctx, &Object::new().with("label", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.summary(), "Client Error");
    assert!(err.to_string().contains("401"));

    let err = tag.read(&h.ctx, &created).await.unwrap_err();
    assert_eq!(err.summary(), "Client Error");
}

#[tokio::test]
async fn test_delete_of_missing_resource_succeeds() {
    let h = TestHarness::new();
    let state = Object::new()
        .with("id", 99_i64)
        .with("name", "gone");

    for kind in ["download_client_transmission", "tag", "series", "notification"] {
        h.resource(kind)
            .delete(&h.ctx, &state)
            .await
            .unwrap_or_else(|e| panic!("{}: {}", kind, e));
    }
}

#[tokio::test]
async fn test_read_after_remote_removal_drops_state() {
    let h = TestHarness::new();
    let created = h
        .create("tag", Object::new().with("label", "ephemeral"))
        .await;
    let id = created.int("id").unwrap().into_known().unwrap();
    h.sonarr.remove(Endpoint::Tag, id).await;

    let read = h.resource("tag").read(&h.ctx, &created).await.unwrap();
    assert!(read.is_none());
}
