// crates/snowcheck/src/models/model_definition.rs

//! Persisted document shapes.
//!
//! Every check is written once as a JSON document and never updated.
//! Field names match what is stored in the container (`pk` is the
//! partition key path).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::{Coordinates, Location, WEATHER_PARTITION_KEY};
use crate::models::open_meteo::{CurrentObservation, DailyForecast};
use crate::weather::{first_snow_date, is_snow_code};

/// Kind of record, stored in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
  /// Point-in-time current weather check
  WeatherCheck,
  /// 14-day forecast scan
  ForecastCheck,
  /// Generic document posted to `/docs`
  Document,
}

impl RecordType {
  /// Value written to the `type` field.
  pub fn as_str(&self) -> &'static str {
    match self {
      RecordType::WeatherCheck => "weather_check",
      RecordType::ForecastCheck => "forecast_check",
      RecordType::Document => "document",
    }
  }
}

impl std::fmt::Display for RecordType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckResult {
  /// Current weather classification
  Current {
    /// Whether `weathercode` is in the snow set
    is_snowing: bool,
    /// WMO code reported by the API, if any
    weathercode: Option<i64>,
    /// Observation time in the location's local timezone
    time: Option<String>,
  },
  /// Forecast scan
  Forecast {
    /// First forecast date with a snow code
    first_snow_date: Option<String>,
  },
}

/// A weather check as stored in the container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCheckRecord {
  /// Unique id (UUID v4)
  pub id: String,
  /// Partition key, always [`WEATHER_PARTITION_KEY`]
  pub pk: String,
  /// Record kind
  #[serde(rename = "type")]
  pub record_type: RecordType,
  /// Write time
  pub created_at_utc: DateTime<Utc>,
  /// Checked location
  #[serde(rename = "bukovel")]
  pub location: Coordinates,
  /// Classification result
  pub result: CheckResult,
  /// Upstream response, verbatim
  pub raw: Value,
}

impl WeatherCheckRecord {
  /// Builds a `weather_check` record from a current observation.
  #[must_use]
  pub fn current(location: &Location, observation: CurrentObservation) -> Self {
    let result = CheckResult::Current {
      is_snowing: is_snow_code(observation.weathercode),
      weathercode: observation.weathercode,
      time: observation.time,
    };
    Self::new(RecordType::WeatherCheck, location, result, observation.raw)
  }

  /// Builds a `forecast_check` record from a daily forecast.
  #[must_use]
  pub fn forecast(location: &Location, forecast: DailyForecast) -> Self {
    let result = CheckResult::Forecast {
      first_snow_date: first_snow_date(&forecast.dates, &forecast.codes),
    };
    Self::new(RecordType::ForecastCheck, location, result, forecast.raw)
  }

  fn new(record_type: RecordType, location: &Location, result: CheckResult, raw: Value) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      pk: WEATHER_PARTITION_KEY.to_string(),
      record_type,
      created_at_utc: Utc::now(),
      location: location.coordinates(),
      result,
      raw,
    }
  }
}

/// A caller-supplied document stored under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericDocument {
  /// Caller-supplied or generated id
  pub id: String,
  /// Caller-supplied or default partition key
  pub pk: String,
  /// Always [`RecordType::Document`]
  #[serde(rename = "type")]
  pub record_type: RecordType,
  /// Write time
  pub created_at_utc: DateTime<Utc>,
  /// The whole request body, unvalidated
  pub data: Value,
}

impl GenericDocument {
  /// Wraps `data` into a new document.
  #[must_use]
  pub fn new(id: impl Into<String>, pk: impl Into<String>, data: Value) -> Self {
    Self {
      id: id.into(),
      pk: pk.into(),
      record_type: RecordType::Document,
      created_at_utc: Utc::now(),
      data,
    }
  }
}
