//! snowcheck: is it snowing in Bukovel?
//!
//! Polls Open-Meteo for a fixed location, classifies the WMO weather code
//! against the snow set and persists each check as a JSON document.

/// 設定モジュール - Location, 雪コード集合, パーティションキー等の定数
pub mod config;

/// エラーモジュール - WeatherError, StoreError を定義
pub mod errors;

/// データモデルモジュール - WeatherCheckRecord, Open-Meteo レスポンス等
pub mod models;

/// ドキュメントストアモジュール - DocumentStore トレイトと Cosmos DB / メモリ実装
pub mod store;

/// 気象モジュール - Open-Meteo クライアントと雪判定
pub mod weather;

/// 再エクスポート
pub use config::{Location, SNOW_CODES};
pub use errors::{StoreError, StoreResult, WeatherError, WeatherResult};
pub use models::{CheckResult, RecordType, WeatherCheckRecord};
pub use store::{CosmosStore, DocumentStore, MemoryStore};
pub use weather::{OpenMeteoClient, WeatherSource, first_snow_date, is_snow_code};
