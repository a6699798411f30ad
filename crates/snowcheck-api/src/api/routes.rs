//! ルーター定義

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;

use snowcheck::config::Location;
use snowcheck::{CosmosStore, DocumentStore, MemoryStore, OpenMeteoClient, WeatherSource};

use super::handlers::{
  app_js, get_doc, get_forecast, health_check, index, ping, post_doc, post_refresh,
};
use super::state::AppState;
use crate::config::{Config, StoreKind};
use crate::errors::ApiError;
use crate::service::SnowcheckApiService;

/// APIルーターを作成する
///
/// # Arguments
/// * `state` - アプリケーション状態
///
/// # Returns
/// 設定済みの Router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/static/app.js", get(app_js))
    .route("/refresh", post(post_refresh))
    .route("/forecast", get(get_forecast))
    .route("/docs", post(post_doc))
    .route("/docs/{id}", get(get_doc))
    .route("/ping", get(ping))
    .route("/health", get(health_check))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// 設定から本番用のアプリケーション状態を構築する
///
/// 気象クライアントとストアクライアントはここで一度だけ作成され、
/// 全リクエストで共有される。
///
/// # Errors
/// HTTP クライアントの構築に失敗した場合にエラーを返す
pub fn build_state(config: Config) -> crate::errors::Result<AppState> {
  let client = OpenMeteoClient::with_base_url(&config.weather_base_url, Location::bukovel())
    .map_err(|e| ApiError::config(format!("気象クライアントの作成に失敗しました: {}", e)))?;
  let location = client.location().clone();
  tracing::info!(
    latitude = location.latitude,
    longitude = location.longitude,
    timezone = %location.timezone,
    "観測地点"
  );
  let weather: Arc<dyn WeatherSource> = Arc::new(client);

  let store: Arc<dyn DocumentStore> = match config.store_kind {
    StoreKind::Cosmos => {
      let cosmos = CosmosStore::new(config.store.clone())
        .map_err(|e| ApiError::config(format!("ストアの作成に失敗しました: {}", e)))?;
      let settings = cosmos.settings();
      tracing::info!(
        endpoint = settings.endpoint.as_deref().unwrap_or("<unset>"),
        database = %settings.database,
        container = %settings.container,
        "Cosmos DB ストアを使用します"
      );
      Arc::new(cosmos)
    }
    StoreKind::Memory => {
      tracing::warn!("メモリストアを使用します。再起動で内容は失われます");
      Arc::new(MemoryStore::new())
    }
  };

  let service = Arc::new(SnowcheckApiService::new(weather, store, location));
  Ok(AppState::new(config, service))
}

/// サーバーを起動する
///
/// # Arguments
/// * `state` - アプリケーション状態
///
/// # Errors
/// サーバーの起動に失敗した場合にエラーを返す
pub async fn run_server(state: AppState) -> crate::errors::Result<()> {
  let addr = &state.config.bind_addr;
  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .map_err(|e| ApiError::config(format!("バインドに失敗しました: {}", e)))?;

  tracing::info!("サーバーを起動します: http://{}", addr);

  let router = create_router(state);

  axum::serve(listener, router)
    .await
    .map_err(|e| ApiError::internal(format!("サーバーエラー: {}", e)))?;

  Ok(())
}
