//! API設定の定数定義

/// デフォルトのバインドアドレス
///
/// 開発環境での利用を想定した localhost の標準ポート。
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// バインドアドレスの環境変数名
pub const ENV_BIND_ADDR: &str = "SNOWCHECK_BIND_ADDR";

/// ストア種別の環境変数名（`cosmos` | `memory`）
pub const ENV_STORE: &str = "SNOWCHECK_STORE";

/// Open-Meteo ベース URL の環境変数名
pub const ENV_WEATHER_BASE_URL: &str = "OPEN_METEO_BASE_URL";

/// Cosmos DB エンドポイントの環境変数名（必須）
pub const ENV_COSMOS_ENDPOINT: &str = "COSMOS_ENDPOINT";

/// Cosmos DB マスターキーの環境変数名（必須）
pub const ENV_COSMOS_KEY: &str = "COSMOS_KEY";

/// Cosmos DB データベース名の環境変数名
pub const ENV_COSMOS_DATABASE: &str = "COSMOS_DATABASE";

/// Cosmos DB コンテナ名の環境変数名
pub const ENV_COSMOS_CONTAINER: &str = "COSMOS_CONTAINER";
