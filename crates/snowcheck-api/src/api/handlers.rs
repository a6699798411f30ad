//! HTTPハンドラー定義

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::header,
  response::{Html, IntoResponse},
};
use serde_json::Value;
use tracing::debug;

use crate::errors::ApiError;
use crate::models::{CreatedDocument, DocQuery, ForecastResponse, PingResponse, RefreshResponse};

use super::state::AppState;

/// トップページ（ボタン＋結果表示）
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// トップページ用スクリプト
const APP_JS: &str = include_str!("../../static/app.js");

/// GET / エンドポイント
///
/// 「更新」ボタンだけのページを返す。処理は `/static/app.js` が行う。
pub async fn index() -> Html<&'static str> {
  Html(INDEX_HTML)
}

/// GET /static/app.js エンドポイント
pub async fn app_js() -> impl IntoResponse {
  (
    [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
    APP_JS,
  )
}

/// POST /refresh エンドポイント
///
/// 現在の天気を取得し、雪判定結果を保存して返す。
///
/// # Response
/// - 200 OK: `{id, pk, is_snowing, weathercode, time}`
/// - 502 Bad Gateway: 気象 API エラー（保存は行わない）
/// - 500 Internal Server Error: 保存失敗
pub async fn post_refresh(
  State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
  debug!("天気チェックリクエストを受信");
  let response = state.service.refresh().await?;
  Ok(Json(response))
}

/// GET /forecast エンドポイント
///
/// 14日間の予報から最初の降雪日を返す。
/// 予報チェックの保存はベストエフォートで、失敗してもレスポンスは変わらない。
///
/// # Response
/// - 200 OK: `{first_snow_date}`
/// - 502 Bad Gateway: 気象 API エラー
pub async fn get_forecast(
  State(state): State<AppState>,
) -> Result<Json<ForecastResponse>, ApiError> {
  debug!("予報チェックリクエストを受信");
  let outcome = state.service.forecast().await?;
  Ok(Json(outcome.response))
}

/// POST /docs エンドポイント
///
/// 任意の JSON オブジェクトを `data` フィールドに入れて保存する。
///
/// # Response
/// - 200 OK: `{id, pk}`
/// - 400 Bad Request: JSON として読めない、オブジェクトでない、`id`/`pk` が不正
/// - 409 Conflict: 同じパーティションに同じ id が存在する
/// - 500 Internal Server Error: その他の保存失敗
pub async fn post_doc(
  State(state): State<AppState>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedDocument>, ApiError> {
  debug!("ドキュメント作成リクエストを受信");
  // axum の既定のテキスト応答ではなく共通のエラー形式で返す
  let Json(body) = body.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
  let created = state.service.create_document(body).await?;
  Ok(Json(created))
}

/// GET /docs/{id}?pk=... エンドポイント
///
/// # Response
/// - 200 OK: 保存されたドキュメントそのもの
/// - 404 Not Found: 存在しない
pub async fn get_doc(
  State(state): State<AppState>,
  Path(id): Path<String>,
  Query(query): Query<DocQuery>,
) -> Result<Json<Value>, ApiError> {
  debug!(id = %id, pk = ?query.pk, "ドキュメント取得リクエストを受信");
  let doc = state.service.get_document(&id, query.pk.as_deref()).await?;
  Ok(Json(doc))
}

/// GET /ping エンドポイント
///
/// ストアや気象 API の状態に関係なく常に `{"status": "ok"}` を返す。
pub async fn ping() -> Json<PingResponse> {
  Json(PingResponse::ok())
}

/// ヘルスチェックエンドポイント
///
/// サーバーが稼働しているかを確認する。
pub async fn health_check() -> &'static str {
  "OK"
}
