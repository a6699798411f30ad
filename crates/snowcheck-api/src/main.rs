//! snowcheck-api サーバーエントリーポイント

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use snowcheck_api::ApiError;
use snowcheck_api::api::{build_state, run_server};
use snowcheck_api::config::Config;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // ロギングの初期化（RUST_LOG 未設定時は info）
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(tracing_subscriber::fmt::layer())
    .init();

  // 設定の読み込み
  let config = Config::from_env()?;
  tracing::info!(store = ?config.store_kind, bind = %config.bind_addr, "設定を読み込みました");

  // クライアントの初期化とアプリケーション状態の作成
  let state = build_state(config)?;
  tracing::info!("気象クライアントとストアを初期化しました");

  // サーバー起動
  run_server(state).await
}
