//! API統合テスト
//!
//! Router 経由で HTTP エンドポイントの振る舞いを検証する。
//! Open-Meteo は wiremock、ストアは MemoryStore / 失敗スタブで置き換える。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use snowcheck::config::{Location, StoreSettings};
use snowcheck::errors::{StoreError, StoreResult};
use snowcheck::{DocumentStore, MemoryStore, OpenMeteoClient};
use snowcheck_api::{
  api::{AppState, create_router},
  config::{Config, StoreKind},
  service::SnowcheckApiService,
};

/// 常に書き込み・読み込みに失敗するストア
struct BrokenStore;

#[async_trait]
impl DocumentStore for BrokenStore {
  async fn create(&self, _partition_key: &str, _document: Value) -> StoreResult<()> {
    Err(StoreError::other("(503) store unavailable"))
  }

  async fn read(&self, _id: &str, _partition_key: &str) -> StoreResult<Value> {
    Err(StoreError::other("(503) store unavailable"))
  }
}

/// テスト用の Router を構築する
fn test_app(weather: OpenMeteoClient, store: Arc<dyn DocumentStore>) -> Router {
  let config = Config {
    bind_addr: "127.0.0.1:0".to_string(),
    store_kind: StoreKind::Memory,
    weather_base_url: "http://127.0.0.1:0".to_string(),
    store: StoreSettings::default(),
  };

  let service = SnowcheckApiService::new(Arc::new(weather), store, Location::bukovel());
  create_router(AppState::new(config, Arc::new(service)))
}

fn weather_for(server: &MockServer) -> OpenMeteoClient {
  OpenMeteoClient::with_base_url(server.uri(), Location::bukovel()).expect("client should build")
}

async fn mount_current(server: &MockServer, code: i64) {
  Mock::given(method("GET"))
    .and(path("/v1/forecast"))
    .and(query_param("current_weather", "true"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "latitude": 48.36,
      "longitude": 24.39,
      "current_weather": { "temperature": -5.0, "weathercode": code, "time": "2026-01-10T09:00" }
    })))
    .mount(server)
    .await;
}

async fn mount_daily(server: &MockServer, codes: Value) {
  Mock::given(method("GET"))
    .and(path("/v1/forecast"))
    .and(query_param("daily", "weathercode"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "daily": {
        "time": ["2026-01-10", "2026-01-11", "2026-01-12", "2026-01-13"],
        "weathercode": codes
      }
    })))
    .mount(server)
    .await;
}

/// リクエストを送り、ステータスと JSON ボディを返す
async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
  let response = app.oneshot(request).await.expect("request should succeed");
  let status = response.status();
  let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read body");
  let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
  (status, json)
}

fn post(uri: &str) -> Request<Body> {
  Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(payload.to_string()))
    .unwrap()
}

// ============================================================================
// /refresh
// ============================================================================

#[tokio::test]
async fn refresh_snow_code_is_stored_and_echoed() {
  let server = MockServer::start().await;
  mount_current(&server, 75).await;
  let store = Arc::new(MemoryStore::new());

  let (status, json) = send(test_app(weather_for(&server), store.clone()), post("/refresh")).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["is_snowing"], true);
  assert_eq!(json["weathercode"], 75);
  assert_eq!(json["time"], "2026-01-10T09:00");
  assert_eq!(json["pk"], "bukovel");

  let id = json["id"].as_str().expect("id should be a string");
  let stored = store.read(id, "bukovel").await.expect("record should be stored");
  assert_eq!(stored["result"]["is_snowing"], true);
  assert_eq!(stored["result"]["weathercode"], 75);
  assert_eq!(stored["type"], "weather_check");
  assert_eq!(stored["raw"]["current_weather"]["weathercode"], 75);
}

#[tokio::test]
async fn refresh_accepts_integral_float_code() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/forecast"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "current_weather": { "weathercode": 75.0, "time": "2026-01-10T09:00" }
    })))
    .mount(&server)
    .await;

  let app = test_app(weather_for(&server), Arc::new(MemoryStore::new()));
  let (status, json) = send(app, post("/refresh")).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["is_snowing"], true);
  assert_eq!(json["weathercode"], 75);
}

#[tokio::test]
async fn refresh_non_snow_code() {
  let server = MockServer::start().await;
  mount_current(&server, 3).await;

  let (status, json) = send(
    test_app(weather_for(&server), Arc::new(MemoryStore::new())),
    post("/refresh"),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["is_snowing"], false);
}

#[tokio::test]
async fn refresh_upstream_500_returns_502_without_write() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/forecast"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;
  let store = Arc::new(MemoryStore::new());

  let (status, json) = send(test_app(weather_for(&server), store.clone()), post("/refresh")).await;

  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert_eq!(json["error"]["code"], "weather_api_error");
  assert!(json["error"]["message"].as_str().unwrap().starts_with("Weather API error"));
  assert!(store.is_empty());
}

#[tokio::test]
async fn refresh_upstream_timeout_returns_502_without_write() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/forecast"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "current_weather": { "weathercode": 75 } }))
        .set_delay(Duration::from_millis(500)),
    )
    .mount(&server)
    .await;
  let weather =
    OpenMeteoClient::with_timeout(server.uri(), Location::bukovel(), Duration::from_millis(50))
      .unwrap();
  let store = Arc::new(MemoryStore::new());

  let (status, _) = send(test_app(weather, store.clone()), post("/refresh")).await;

  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert!(store.is_empty());
}

#[tokio::test]
async fn refresh_store_failure_returns_500() {
  let server = MockServer::start().await;
  mount_current(&server, 75).await;

  let (status, json) =
    send(test_app(weather_for(&server), Arc::new(BrokenStore)), post("/refresh")).await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json["error"]["code"], "internal_error");
  assert_eq!(json["error"]["message"], "DB write error: (503) store unavailable");
}

// ============================================================================
// /forecast
// ============================================================================

#[tokio::test]
async fn forecast_returns_first_snow_date() {
  let server = MockServer::start().await;
  mount_daily(&server, json!([1, 2, 71, 3])).await;
  let store = Arc::new(MemoryStore::new());

  let (status, json) = send(test_app(weather_for(&server), store.clone()), get("/forecast")).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "first_snow_date": "2026-01-12" }));

  let docs = store.documents_in("bukovel");
  assert_eq!(docs.len(), 1);
  assert_eq!(docs[0]["type"], "forecast_check");
  assert_eq!(docs[0]["result"]["first_snow_date"], "2026-01-12");
}

#[tokio::test]
async fn forecast_without_snow_returns_null() {
  let server = MockServer::start().await;
  mount_daily(&server, json!([0, 1, 2, 3])).await;

  let (status, json) = send(
    test_app(weather_for(&server), Arc::new(MemoryStore::new())),
    get("/forecast"),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "first_snow_date": null }));
}

#[tokio::test]
async fn forecast_store_failure_still_returns_200() {
  let server = MockServer::start().await;
  mount_daily(&server, json!([1, 2, 71, 3])).await;

  let (status, json) =
    send(test_app(weather_for(&server), Arc::new(BrokenStore)), get("/forecast")).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "first_snow_date": "2026-01-12" }));
}

#[tokio::test]
async fn forecast_upstream_failure_returns_502() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/v1/forecast"))
    .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
    .mount(&server)
    .await;

  let (status, json) = send(
    test_app(weather_for(&server), Arc::new(MemoryStore::new())),
    get("/forecast"),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert_eq!(json["error"]["code"], "weather_api_error");
}

// ============================================================================
// /docs
// ============================================================================

#[tokio::test]
async fn docs_duplicate_id_returns_409() {
  let server = MockServer::start().await;
  let app = test_app(weather_for(&server), Arc::new(MemoryStore::new()));
  let payload = json!({ "id": "note-1", "pk": "notes", "text": "first lift at 9" });

  let (status, json) = send(app.clone(), post_json("/docs", &payload)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "id": "note-1", "pk": "notes" }));

  let (status, json) = send(app, post_json("/docs", &payload)).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(json["error"]["code"], "conflict");
}

#[tokio::test]
async fn docs_defaults_id_and_pk() {
  let server = MockServer::start().await;
  let store = Arc::new(MemoryStore::new());
  let app = test_app(weather_for(&server), store.clone());

  let (status, json) = send(app, post_json("/docs", &json!({ "text": "hello" }))).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["pk"], "default");
  let id = json["id"].as_str().unwrap();
  let stored = store.read(id, "default").await.unwrap();
  assert_eq!(stored["data"], json!({ "text": "hello" }));
}

#[tokio::test]
async fn docs_non_object_returns_400() {
  let server = MockServer::start().await;
  let app = test_app(weather_for(&server), Arc::new(MemoryStore::new()));

  let (status, json) = send(app, post_json("/docs", &json!([1, 2, 3]))).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn docs_without_content_type_returns_json_error() {
  let server = MockServer::start().await;
  let app = test_app(weather_for(&server), Arc::new(MemoryStore::new()));
  let request = Request::builder()
    .method("POST")
    .uri("/docs")
    .body(Body::from(r#"{"text":"hello"}"#))
    .unwrap();

  let (status, json) = send(app, request).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json["error"]["code"], "invalid_input");
  assert!(json["error"]["message"].as_str().unwrap().contains("Content-Type"));
}

#[tokio::test]
async fn docs_malformed_json_returns_json_error() {
  let server = MockServer::start().await;
  let store = Arc::new(MemoryStore::new());
  let app = test_app(weather_for(&server), store.clone());
  let request = Request::builder()
    .method("POST")
    .uri("/docs")
    .header("content-type", "application/json")
    .body(Body::from("{bad"))
    .unwrap();

  let (status, json) = send(app, request).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json["error"]["code"], "invalid_input");
  assert!(store.is_empty());
}

#[tokio::test]
async fn docs_store_failure_returns_500() {
  let server = MockServer::start().await;
  let app = test_app(weather_for(&server), Arc::new(BrokenStore));

  let (status, json) = send(app, post_json("/docs", &json!({ "id": "x" }))).await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(json["error"]["message"].as_str().unwrap().contains("store unavailable"));
}

#[tokio::test]
async fn get_doc_returns_exact_stored_document() {
  let server = MockServer::start().await;
  let store = Arc::new(MemoryStore::new());
  let app = test_app(weather_for(&server), store.clone());

  let payload = json!({ "id": "note-1", "pk": "notes", "nested": { "a": [1, 2] } });
  let (status, _) = send(app.clone(), post_json("/docs", &payload)).await;
  assert_eq!(status, StatusCode::OK);

  let (status, json) = send(app, get("/docs/note-1?pk=notes")).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, store.read("note-1", "notes").await.unwrap());
  assert_eq!(json["data"], payload);
}

#[tokio::test]
async fn get_doc_missing_returns_404() {
  let server = MockServer::start().await;
  let store = Arc::new(MemoryStore::new());
  let app = test_app(weather_for(&server), store.clone());

  store.create("notes", json!({ "id": "note-1" })).await.unwrap();

  // 同じ id でもパーティションが違えば見つからない
  let (status, json) = send(app.clone(), get("/docs/note-1?pk=other")).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json["error"]["code"], "not_found");

  let (status, _) = send(app, get("/docs/nope")).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// /ping, /health, /
// ============================================================================

#[tokio::test]
async fn ping_ignores_dependencies() {
  // 到達不能な上流 + 壊れたストア
  let weather = OpenMeteoClient::with_base_url("http://127.0.0.1:1", Location::bukovel()).unwrap();
  let app = test_app(weather, Arc::new(BrokenStore));

  let (status, json) = send(app, get("/ping")).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn health_check_returns_ok() {
  let server = MockServer::start().await;
  let app = test_app(weather_for(&server), Arc::new(MemoryStore::new()));

  let response = app.oneshot(get("/health")).await.expect("request should succeed");
  assert_eq!(response.status(), StatusCode::OK);

  let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read body");
  assert_eq!(body_bytes.as_ref(), b"OK");
}

#[tokio::test]
async fn index_serves_page_and_script() {
  let server = MockServer::start().await;
  let app = test_app(weather_for(&server), Arc::new(MemoryStore::new()));

  let response = app.clone().oneshot(get("/")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
  assert!(content_type.starts_with("text/html"));
  let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  assert!(String::from_utf8_lossy(&body).contains("btnRefresh"));

  let response = app.oneshot(get("/static/app.js")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
  assert!(content_type.starts_with("application/javascript"));
}
