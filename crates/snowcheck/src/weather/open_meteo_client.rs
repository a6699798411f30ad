//! Open-Meteo forecast API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::WeatherSource;
use crate::config::{DEFAULT_WEATHER_BASE_URL, Location, WEATHER_API_TIMEOUT};
use crate::errors::{WeatherError, WeatherResult};
use crate::models::{CurrentObservation, DailyForecast};

/// Maximum number of body characters echoed into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for `{base_url}/v1/forecast` bound to one location.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
  http: Client,
  base_url: String,
  location: Location,
}

impl OpenMeteoClient {
  /// Creates a client against the public Open-Meteo API.
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built.
  pub fn new(location: Location) -> WeatherResult<Self> {
    Self::with_base_url(DEFAULT_WEATHER_BASE_URL, location)
  }

  /// Creates a client against a custom base URL (mirrors, mock servers).
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built.
  pub fn with_base_url(base_url: impl Into<String>, location: Location) -> WeatherResult<Self> {
    Self::with_timeout(base_url, location, WEATHER_API_TIMEOUT)
  }

  /// Same as [`OpenMeteoClient::with_base_url`] with an explicit request timeout.
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built.
  pub fn with_timeout(
    base_url: impl Into<String>,
    location: Location,
    timeout: Duration,
  ) -> WeatherResult<Self> {
    let http = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      http,
      base_url: base_url.into().trim_end_matches('/').to_string(),
      location,
    })
  }

  /// Location this client reports on.
  pub fn location(&self) -> &Location {
    &self.location
  }

  async fn fetch(&self, extra: &[(&str, String)]) -> WeatherResult<Value> {
    let url = format!("{}/v1/forecast", self.base_url);

    let mut query = vec![
      ("latitude", self.location.latitude.to_string()),
      ("longitude", self.location.longitude.to_string()),
    ];
    query.extend(extra.iter().map(|(k, v)| (*k, v.clone())));
    query.push(("timezone", self.location.timezone.clone()));

    debug!(url = %url, "Open-Meteo リクエスト");

    let res = self.http.get(&url).query(&query).send().await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
      return Err(WeatherError::api(format!(
        "HTTP status {}: {}",
        status,
        truncate_body(&body)
      )));
    }

    Ok(serde_json::from_str(&body)?)
  }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
  async fn current(&self) -> WeatherResult<CurrentObservation> {
    let raw = self.fetch(&[("current_weather", "true".to_string())]).await?;
    CurrentObservation::from_payload(raw)
  }

  async fn daily_forecast(&self, days: u8) -> WeatherResult<DailyForecast> {
    let raw = self
      .fetch(&[
        ("daily", "weathercode".to_string()),
        ("forecast_days", days.to_string()),
      ])
      .await?;
    DailyForecast::from_payload(raw)
  }
}

fn truncate_body(body: &str) -> String {
  if body.chars().count() <= MAX_ERROR_BODY_CHARS {
    return body.to_string();
  }
  let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
  format!("{head}...")
}
