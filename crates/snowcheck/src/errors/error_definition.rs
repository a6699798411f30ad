//! エラー定義

use thiserror::Error;

/// 気象 API (Open-Meteo) 関連のエラー
///
/// 通信エラー・非 2xx ステータス・不正な JSON はすべてこの1種類にまとめる。
/// 呼び出し側はメッセージをそのまま利用する。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WeatherError {
  /// 上流 API の呼び出しに失敗
  #[error("{message}")]
  Api {
    /// 失敗内容
    message: String,
  },
}

impl WeatherError {
  /// 上流 API エラーを作成
  #[must_use]
  pub fn api(message: impl Into<String>) -> Self {
    Self::Api {
      message: message.into(),
    }
  }
}

impl From<reqwest::Error> for WeatherError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      return Self::api(format!("request timed out: {err}"));
    }
    Self::api(err.to_string())
  }
}

impl From<serde_json::Error> for WeatherError {
  fn from(err: serde_json::Error) -> Self {
    Self::api(format!("malformed response: {err}"))
  }
}

/// ドキュメントストア関連のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
  /// 同じパーティションに同じ id のドキュメントが既に存在する
  #[error("document already exists: id={id}, pk={partition_key}")]
  AlreadyExists {
    /// ドキュメントID
    id: String,
    /// パーティションキー
    partition_key: String,
  },

  /// ドキュメントが見つからない
  #[error("document not found: id={id}, pk={partition_key}")]
  NotFound {
    /// ドキュメントID
    id: String,
    /// パーティションキー
    partition_key: String,
  },

  /// 接続設定が不足している（エンドポイント・キー未設定等）
  #[error("store is not configured: {0}")]
  Misconfigured(String),

  /// ドキュメントが JSON オブジェクトでない、または `id` を持たない
  #[error("invalid document: {0}")]
  InvalidDocument(String),

  /// その他のエラー（通信エラー、想定外のステータス等）
  #[error("{0}")]
  Other(String),
}

impl StoreError {
  /// その他エラーを作成
  #[must_use]
  pub fn other(message: impl Into<String>) -> Self {
    Self::Other(message.into())
  }
}

impl From<reqwest::Error> for StoreError {
  fn from(err: reqwest::Error) -> Self {
    Self::Other(err.to_string())
  }
}

/// 気象 API の Result 型エイリアス
pub type WeatherResult<T> = std::result::Result<T, WeatherError>;

/// ストアの Result 型エイリアス
pub type StoreResult<T> = std::result::Result<T, StoreError>;
