//! APIエラー定義

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// snowcheck クレートのエラー型をインポート
use snowcheck::errors::{StoreError, WeatherError};

/// エラーの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// 上流の気象 API エラー
  UpstreamWeather,
  /// ドキュメントが既に存在する
  Conflict,
  /// ドキュメントが見つからない
  NotFound,
  /// 入力値が無効
  InvalidInput,
  /// 内部エラー
  Internal,
  /// 設定エラー
  Config,
}

impl ApiErrorKind {
  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::UpstreamWeather => "weather_api_error",
      Self::Conflict => "conflict",
      Self::NotFound => "not_found",
      Self::InvalidInput => "invalid_input",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::UpstreamWeather => StatusCode::BAD_GATEWAY,
      Self::Conflict => StatusCode::CONFLICT,
      Self::NotFound => StatusCode::NOT_FOUND,
      Self::InvalidInput => StatusCode::BAD_REQUEST,
      Self::Internal | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// APIエラー
#[derive(Debug, Error)]
pub enum ApiError {
  /// 上流の気象 API エラー
  #[error("Weather API error: {0}")]
  UpstreamWeather(String),

  /// ドキュメントが既に存在する
  #[error("Document already exists: {0}")]
  Conflict(String),

  /// ドキュメントが見つからない
  #[error("Document not found: {0}")]
  NotFound(String),

  /// 入力値が無効
  #[error("Invalid input: {0}")]
  InvalidInput(String),

  /// 内部エラー
  #[error("{0}")]
  Internal(String),

  /// 設定エラー
  #[error("Config error: {0}")]
  Config(String),
}

impl ApiError {
  /// エラーの種類を取得
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::UpstreamWeather(_) => ApiErrorKind::UpstreamWeather,
      Self::Conflict(_) => ApiErrorKind::Conflict,
      Self::NotFound(_) => ApiErrorKind::NotFound,
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// 無効な入力エラーを作成
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// 内部エラーを作成
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// 設定エラーを作成
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }

  /// ストア書き込み失敗を作成（`/refresh` 用）
  ///
  /// 元のメッセージはそのまま呼び出し元に返る。
  #[must_use]
  pub fn db_write(err: &StoreError) -> Self {
    Self::Internal(format!("DB write error: {err}"))
  }
}

/// エラーレスポンスのJSON構造
#[derive(Serialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
  code: &'static str,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorResponse {
      error: ErrorBody {
        code: self.code(),
        message: self.to_string(),
      },
    };

    (status, Json(body)).into_response()
  }
}

/// WeatherError から ApiError への変換
impl From<WeatherError> for ApiError {
  fn from(err: WeatherError) -> Self {
    ApiError::UpstreamWeather(err.to_string())
  }
}

/// StoreError から ApiError への変換
///
/// 「既に存在する」「見つからない」だけを区別し、それ以外は内部エラーとして
/// メッセージをそのまま返す。
impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::AlreadyExists { .. } => ApiError::Conflict(err.to_string()),
      StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
      StoreError::InvalidDocument(_) => ApiError::invalid_input(err.to_string()),
      // #[non_exhaustive] な enum のため、将来追加されるバリアントも内部エラー扱い
      _ => ApiError::internal(format!("DB error: {err}")),
    }
  }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;
