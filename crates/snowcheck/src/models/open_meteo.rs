//! Open-Meteo response views.
//!
//! Only the fields the checks need are modelled; the full body is kept as
//! `raw` so it can be stored verbatim.

use serde::{Deserialize, Deserializer, de};
use serde_json::{Number, Value};

use crate::errors::WeatherResult;

/// `GET /v1/forecast?current_weather=true` body (relevant part).
#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
  #[serde(default)]
  current_weather: Option<CurrentWeatherBlock>,
}

/// WMO code on the wire. Any JSON number with an integral value is accepted
/// (`75` and `75.0` are the same code).
#[derive(Debug, Clone, Copy)]
struct WireCode(i64);

impl<'de> Deserialize<'de> for WireCode {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let number = Number::deserialize(deserializer)?;
    number
      .as_i64()
      .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
      .map(WireCode)
      .ok_or_else(|| de::Error::custom(format!("weathercode is not an integer: {number}")))
  }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
  #[serde(default)]
  weathercode: Option<WireCode>,
  #[serde(default)]
  time: Option<String>,
}

/// `GET /v1/forecast?daily=weathercode` body (relevant part).
#[derive(Debug, Deserialize)]
struct DailyForecastBody {
  #[serde(default)]
  daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
  #[serde(default)]
  time: Vec<String>,
  #[serde(default)]
  weathercode: Vec<Option<WireCode>>,
}

/// Current weather as reported upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentObservation {
  /// WMO weather code; `None` when the API omits it
  pub weathercode: Option<i64>,
  /// Local observation time (`YYYY-MM-DDTHH:MM`)
  pub time: Option<String>,
  /// Full upstream body
  pub raw: Value,
}

impl CurrentObservation {
  /// Extracts the observation from a parsed response body.
  ///
  /// A body without `current_weather` yields an observation with no code.
  ///
  /// # Errors
  /// Returns an error if a known field has an unexpected JSON type.
  pub fn from_payload(raw: Value) -> WeatherResult<Self> {
    let body: CurrentWeatherBody = serde_json::from_value(raw.clone())?;
    let (weathercode, time) = match body.current_weather {
      Some(block) => (block.weathercode.map(|c| c.0), block.time),
      None => (None, None),
    };
    Ok(Self {
      weathercode,
      time,
      raw,
    })
  }
}

/// Daily forecast series as reported upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
  /// Dates (`YYYY-MM-DD`), in the order returned
  pub dates: Vec<String>,
  /// Weather code per date, positionally aligned with `dates`
  pub codes: Vec<Option<i64>>,
  /// Full upstream body
  pub raw: Value,
}

impl DailyForecast {
  /// Extracts the daily series from a parsed response body.
  ///
  /// # Errors
  /// Returns an error if a known field has an unexpected JSON type.
  pub fn from_payload(raw: Value) -> WeatherResult<Self> {
    let body: DailyForecastBody = serde_json::from_value(raw.clone())?;
    let (dates, codes) = match body.daily {
      Some(daily) => (daily.time, daily.weathercode.into_iter().map(|c| c.map(|c| c.0)).collect()),
      None => (Vec::new(), Vec::new()),
    };
    Ok(Self { dates, codes, raw })
  }
}
