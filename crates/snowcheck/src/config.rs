// crates/snowcheck/src/config.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// WMO weather codes that count as snowfall.
///
/// 71/73/75: snow fall (slight, moderate, heavy), 77: snow grains,
/// 85/86: snow showers (slight, heavy).
pub const SNOW_CODES: [i64; 6] = [71, 73, 75, 77, 85, 86];

/// Timeout applied to every Open-Meteo request.
pub const WEATHER_API_TIMEOUT: Duration = Duration::from_secs(15);

/// Number of days requested for the daily forecast scan.
pub const FORECAST_DAYS: u8 = 14;

/// Default Open-Meteo base URL (`/v1/forecast` is appended).
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com";

/// Partition key used by the weather check records.
pub const WEATHER_PARTITION_KEY: &str = "bukovel";

/// Partition key used by `/docs` when the caller does not provide one.
pub const DEFAULT_DOC_PARTITION_KEY: &str = "default";

/// Default Cosmos DB database id.
pub const DEFAULT_DATABASE: &str = "appdb";

/// Default Cosmos DB container id. Its partition key path is `/pk`.
pub const DEFAULT_CONTAINER: &str = "jsonfiles";

/// A fixed point on the map the weather is checked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
  /// Latitude in degrees
  pub latitude: f64,
  /// Longitude in degrees
  pub longitude: f64,
  /// IANA timezone name; Open-Meteo reports local times in it
  pub timezone: String,
}

impl Location {
  /// Bukovel ski resort, Ivano-Frankivsk oblast.
  #[must_use]
  pub fn bukovel() -> Self {
    Self {
      latitude: 48.360278,
      longitude: 24.392222,
      timezone: "Europe/Kyiv".to_string(),
    }
  }

  /// Coordinates as they are embedded in persisted records.
  #[must_use]
  pub fn coordinates(&self) -> Coordinates {
    Coordinates {
      lat: self.latitude,
      lon: self.longitude,
    }
  }
}

impl Default for Location {
  fn default() -> Self {
    Self::bukovel()
  }
}

/// `{lat, lon}` pair stored alongside each weather record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  /// Latitude
  pub lat: f64,
  /// Longitude
  pub lon: f64,
}

/// Connection settings for the Cosmos DB store.
///
/// `endpoint` and `key` are optional here on purpose: a missing value is
/// reported by the first store operation, not at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
  /// Account endpoint, e.g. `https://myaccount.documents.azure.com:443/`
  pub endpoint: Option<String>,
  /// Base64 encoded master key
  pub key: Option<String>,
  /// Database id
  pub database: String,
  /// Container id
  pub container: String,
}

impl Default for StoreSettings {
  fn default() -> Self {
    Self {
      endpoint: None,
      key: None,
      database: DEFAULT_DATABASE.to_string(),
      container: DEFAULT_CONTAINER.to_string(),
    }
  }
}
