//! Lifecycle tests for the hand-written kinds, the configuration
//! singletons and the data sources.

use std::sync::Arc;

use serde_json::json;

use sonarr_provider_core::{
    sdk::{Endpoint, Method},
    testing::{fixtures, MockSonarr},
    DataSource, Object, RequestContext, Resource, SonarrProvider, Value,
};

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

    fn data_source(&self, kind: &str) -> Arc<dyn DataSource> {
        self.provider
            .data_source(&format!("sonarr_{}", kind))
            .unwrap_or_else(|| panic!("no data source {}", kind))
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

    async fn read(&self, kind: &str, state: &Object) -> Option<Object> {
        self.resource(kind)
            .read(&self.ctx, state)
            .await
            .expect("read")
    }
}

fn ints(values: &[i64]) -> Value {
    Value::set_of(values.iter().map(|v| Value::Int(*v)))
}

fn strings(values: &[&str]) -> Value {
    Value::set_of(values.iter().map(|v| Value::from(*v)))
}

// =============================================================================
// Tags
// =============================================================================

#[tokio::test]
async fn test_tag_lifecycle() {
    let h = TestHarness::new();

    let created = h.create("tag", Object::new().with("label", "hd")).await;
    let id = created.int("id").unwrap().into_known().unwrap();
    assert_eq!(h.sonarr.count(Endpoint::Tag).await, 1);

    let updated = h
        .update("tag", Object::new().with("label", "uhd"), &created)
        .await;
    assert_eq!(updated.get("id"), &Value::Int(id));
    assert_eq!(updated.get("label"), &Value::from("uhd"));

    h.resource("tag").delete(&h.ctx, &updated).await.unwrap();
    assert_eq!(h.sonarr.count(Endpoint::Tag).await, 0);
    assert!(h.read("tag", &updated).await.is_none());
}

#[tokio::test]
async fn test_unchanged_config_plans_prior_state() {
    let h = TestHarness::new();
    let config = Object::new().with("label", "stable");
    let created = h.create("tag", config.clone()).await;

    let plan = h.resource("tag").schema().plan(&config, Some(&created));
    assert_eq!(plan.state, created);
    assert!(!plan.has_changes(Some(&created)));
}

// =============================================================================
// Series
// =============================================================================

#[tokio::test]
async fn test_series_created_from_lookup() {
    let h = TestHarness::new();
    h.sonarr
        .add_lookup(fixtures::series_lookup("Friends", 79168))
        .await;

    let config = Object::new()
        .with("title", "Friends")
        .with("tvdb_id", 79168_i64)
        .with("quality_profile_id", 1_i64)
        .with("monitored", true)
        .with("path", "/tv/Friends")
        .with("tags", ints(&[1]));
    let created = h.create("series", config.clone()).await;

    assert_eq!(created.get("title_slug"), &Value::from("friends"));
    assert_eq!(created.get("root_folder_path"), &Value::from("/tv"));
    assert_eq!(created.get("monitored"), &Value::Bool(true));
    assert!(created.unknown_names().is_empty());

    let lookup = &h.sonarr.requests_with(Method::Get).await[0];
    assert_eq!(lookup.query_param("term"), Some("tvdb:79168"));

    let post = h.sonarr.requests_with(Method::Post).await.remove(0);
    let body = post.body.unwrap();
    assert_eq!(body["addOptions"]["monitor"], "all");
    assert_eq!(body["seasons"].as_array().map(Vec::len), Some(2));

    let id = created.int("id").unwrap().into_known().unwrap();
    let stored = h.sonarr.object(Endpoint::Series, id).await.unwrap();
    assert!(stored.get("addOptions").is_none());

    let updated = h
        .update("series", config.with("monitored", false), &created)
        .await;
    assert_eq!(updated.get("monitored"), &Value::Bool(false));
    assert_eq!(updated.get("path"), &Value::from("/tv/Friends"));
}

#[tokio::test]
async fn test_series_missing_from_lookup() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("title", "Nowhere")
        .with("tvdb_id", 1_i64)
        .with("quality_profile_id", 1_i64)
        .with("path", "/tv/Nowhere");
    let resource = h.resource("series");
    let plan = resource.schema().plan(&config, None);

    let err = resource.create(&h.ctx, &plan.state).await.unwrap_err();
    assert_eq!(err.summary(), "Not Found");
    assert_eq!(h.sonarr.count(Endpoint::Series).await, 0);
}

// =============================================================================
// Profiles and plain kinds
// =============================================================================

#[tokio::test]
async fn test_quality_profile_from_template() {
    let h = TestHarness::new();
    h.sonarr
        .set_template(Endpoint::QualityProfile, fixtures::quality_profile_template())
        .await;

    let config = Object::new()
        .with("name", "HD")
        .with("upgrade_allowed", true)
        .with("cutoff", 1000_i64)
        .with("allowed_qualities", ints(&[4, 1000]));
    let created = h.create("quality_profile", config.clone()).await;
    assert_eq!(created.get("allowed_qualities"), &ints(&[4, 1000]));
    assert_eq!(created.get("cutoff"), &Value::Int(1000));

    let id = created.int("id").unwrap().into_known().unwrap();
    let stored = h.sonarr.object(Endpoint::QualityProfile, id).await.unwrap();
    let allowed: Vec<bool> = stored["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["allowed"].as_bool().unwrap())
        .collect();
    assert_eq!(allowed, vec![false, true, true]);

    let updated = h
        .update(
            "quality_profile",
            config.with("allowed_qualities", ints(&[1, 4, 1000])),
            &created,
        )
        .await;
    assert_eq!(updated.get("allowed_qualities"), &ints(&[1, 4, 1000]));
}

#[tokio::test]
async fn test_language_profile_from_template() {
    let h = TestHarness::new();
    h.sonarr
        .set_template(Endpoint::LanguageProfile, fixtures::language_profile_template())
        .await;

    let created = h
        .create(
            "language_profile",
            Object::new()
                .with("name", "Euro")
                .with("cutoff", "French")
                .with("languages", strings(&["French", "German"])),
        )
        .await;
    assert_eq!(created.get("languages"), &strings(&["German", "French"]));
    assert_eq!(created.get("cutoff"), &Value::from("French"));

    let read = h.read("language_profile", &created).await.unwrap();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_root_folder_computes_accessible() {
    let h = TestHarness::new();
    let created = h
        .create("root_folder", Object::new().with("path", "/tv"))
        .await;
    assert_eq!(created.get("accessible"), &Value::Bool(true));

    let source = h.data_source("root_folder");
    let read = source
        .read(&h.ctx, &Object::new().with("path", "/tv"))
        .await
        .unwrap();
    assert_eq!(read.get("id"), created.get("id"));
}

#[tokio::test]
async fn test_delay_profile_and_remote_path_mapping() {
    let h = TestHarness::new();
    let profile = h
        .create(
            "delay_profile",
            Object::new()
                .with("tags", ints(&[1]))
                .with("preferred_protocol", "torrent")
                .with("torrent_delay", 60_i64),
        )
        .await;
    assert_eq!(profile.get("torrent_delay"), &Value::Int(60));
    assert_eq!(profile.get("tags"), &ints(&[1]));

    let mapping = h
        .create(
            "remote_path_mapping",
            Object::new()
                .with("host", "transmission")
                .with("remote_path", "/downloads/")
                .with("local_path", "/data/downloads/"),
        )
        .await;
    let read = h.read("remote_path_mapping", &mapping).await.unwrap();
    assert_eq!(read, mapping);
}

// =============================================================================
// Configuration singletons
// =============================================================================

#[tokio::test]
async fn test_host_keeps_password_and_untouched_settings() {
    let h = TestHarness::new();
    let config = Object::new()
        .with("port", 9000_i64)
        .with("authentication_method", "basic")
        .with("username", "admin")
        .with("password", "secret");

    let created = h.create("host", config).await;
    assert_eq!(created.get("password"), &Value::from("secret"));
    assert_eq!(created.get("bind_address"), &Value::from("*"));

    let stored = h.sonarr.config(Endpoint::HostConfig).await.unwrap();
    assert_eq!(stored["port"], 9000);
    assert_eq!(stored["password"], "secret");
    assert_eq!(stored["apiKey"], "0123456789abcdef");
    assert_eq!(stored["backupRetention"], 28);

    let read = h.read("host", &created).await.unwrap();
    assert_eq!(read.get("password"), &Value::from("secret"));
    assert_eq!(read.get("port"), &Value::Int(9000));
}

#[tokio::test]
async fn test_singleton_delete_leaves_service_untouched() {
    let h = TestHarness::new();
    let created = h
        .create("naming", Object::new().with("rename_episodes", true))
        .await;
    h.sonarr.clear_requests().await;

    h.resource("naming").delete(&h.ctx, &created).await.unwrap();
    assert!(h.sonarr.requests().await.is_empty());
    let stored = h.sonarr.config(Endpoint::NamingConfig).await.unwrap();
    assert_eq!(stored["renameEpisodes"], true);
}

// =============================================================================
// Data sources
// =============================================================================

#[tokio::test]
async fn test_tag_data_sources() {
    let h = TestHarness::new();
    h.sonarr.insert(Endpoint::Tag, json!({"label": "hd"})).await;
    h.sonarr.insert(Endpoint::Tag, json!({"label": "4k"})).await;

    let tag = h
        .data_source("tag")
        .read(&h.ctx, &Object::new().with("label", "4k"))
        .await
        .unwrap();
    assert_eq!(tag.get("id"), &Value::Int(2));

    let tags = h
        .data_source("tags")
        .read(&h.ctx, &Object::new())
        .await
        .unwrap();
    let by_label = tags.get("tags");
    assert!(matches!(by_label, Value::Map(m) if m.len() == 2));

    let err = h
        .data_source("tag")
        .read(&h.ctx, &Object::new().with("label", "sd"))
        .await
        .unwrap_err();
    assert_eq!(err.summary(), "Not Found");
}

#[tokio::test]
async fn test_system_status_data_source() {
    let h = TestHarness::new();
    let status = h
        .data_source("system_status")
        .read(&h.ctx, &Object::new())
        .await
        .unwrap();
    assert_eq!(status.get("version"), &Value::from("3.0.10.1567"));
    assert_eq!(status.get("is_docker"), &Value::Bool(true));
    assert_eq!(status.get("migration_version"), &Value::Int(187));
}

#[tokio::test]
async fn test_download_client_data_source_by_name() {
    let h = TestHarness::new();
    h.create(
        "download_client_transmission",
        Object::new()
            .with("name", "tx")
            .with("host", "transmission")
            .with("port", 9091_i64),
    )
    .await;

    let found = h
        .data_source("download_client")
        .read(&h.ctx, &Object::new().with("name", "tx"))
        .await
        .unwrap();
    assert_eq!(found.get("implementation"), &Value::from("Transmission"));
    assert_eq!(found.get("host"), &Value::from("transmission"));
    assert_eq!(found.get("port"), &Value::Int(9091));
}

// =============================================================================
// Error paths
// =============================================================================

#[tokio::test]
async fn test_server_error_surfaces_as_client_error() {
    let h = TestHarness::new();
    h.sonarr.fail_next(500, "database is locked").await;

    let err = h
        .resource("tag")
        .create(&h.ctx, &Object::new().with("label", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.summary(), "Client Error");
    assert_eq!(h.sonarr.count(Endpoint::Tag).await, 0);
}

#[tokio::test]
async fn test_cancelled_request_is_not_sent() {
    let h = TestHarness::new();
    let ctx = RequestContext::new();
    ctx.cancellation().cancel();

    let err = h
        .resource("tag")
        .create(&ctx, &Object::new().with("label", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.summary(), "Client Error");
    assert_eq!(h.sonarr.count(Endpoint::Tag).await, 0);
}
