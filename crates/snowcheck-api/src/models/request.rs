//! リクエストモデル定義

use serde::Deserialize;

/// `GET /docs/{id}` のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct DocQuery {
  /// パーティションキー（省略時は `"default"`）
  pub pk: Option<String>,
}
