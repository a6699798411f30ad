//! Weather source: Open-Meteo client and snow classification.

mod classification;
mod open_meteo_client;

use async_trait::async_trait;

pub use classification::{first_snow_date, is_snow_code};
pub use open_meteo_client::OpenMeteoClient;

use crate::errors::WeatherResult;
use crate::models::{CurrentObservation, DailyForecast};

/// Source of weather observations for the configured location.
///
/// Production uses [`OpenMeteoClient`]; tests point it at a mock server or
/// substitute their own implementation.
#[async_trait]
pub trait WeatherSource: Send + Sync {
  /// Fetches the current weather.
  ///
  /// # Errors
  /// Any transport, status or decoding failure.
  async fn current(&self) -> WeatherResult<CurrentObservation>;

  /// Fetches the daily forecast for the given number of days.
  ///
  /// # Errors
  /// Any transport, status or decoding failure.
  async fn daily_forecast(&self, days: u8) -> WeatherResult<DailyForecast>;
}
