//! Response Model Definition

use serde::Serialize;

use snowcheck::{CheckResult, WeatherCheckRecord};

/// `POST /refresh` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshResponse {
  /// Id of the stored record
  pub id: String,
  /// Partition key of the stored record
  pub pk: String,
  /// Whether it is snowing now
  pub is_snowing: bool,
  /// WMO weather code, if reported
  pub weathercode: Option<i64>,
  /// Local observation time, if reported
  pub time: Option<String>,
}

impl RefreshResponse {
  /// Builds the response from a stored `weather_check` record.
  ///
  /// Returns `None` for records that hold a forecast result.
  #[must_use]
  pub fn from_record(record: &WeatherCheckRecord) -> Option<Self> {
    match &record.result {
      CheckResult::Current {
        is_snowing,
        weathercode,
        time,
      } => Some(Self {
        id: record.id.clone(),
        pk: record.pk.clone(),
        is_snowing: *is_snowing,
        weathercode: *weathercode,
        time: time.clone(),
      }),
      CheckResult::Forecast { .. } => None,
    }
  }
}

/// `GET /forecast` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResponse {
  /// First forecast date with snow (`YYYY-MM-DD`), or `null`
  pub first_snow_date: Option<String>,
}

/// `POST /docs` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedDocument {
  /// Document id
  pub id: String,
  /// Partition key
  pub pk: String,
}

/// `GET /ping` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingResponse {
  /// Always `"ok"`
  pub status: &'static str,
}

impl PingResponse {
  /// The only ping response.
  #[must_use]
  pub fn ok() -> Self {
    Self { status: "ok" }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use snowcheck::config::Location;
  use snowcheck::models::{CurrentObservation, DailyForecast};

  use super::*;

  #[test]
  fn refresh_response_from_current_record() {
    let record = WeatherCheckRecord::current(
      &Location::bukovel(),
      CurrentObservation {
        weathercode: Some(77),
        time: Some("2026-01-10T09:00".to_string()),
        raw: json!({}),
      },
    );

    let response = RefreshResponse::from_record(&record).unwrap();
    assert_eq!(response.id, record.id);
    assert_eq!(response.pk, "bukovel");
    assert!(response.is_snowing);
    assert_eq!(response.weathercode, Some(77));
  }

  #[test]
  fn refresh_response_rejects_forecast_record() {
    let record = WeatherCheckRecord::forecast(
      &Location::bukovel(),
      DailyForecast {
        dates: vec![],
        codes: vec![],
        raw: json!({}),
      },
    );
    assert!(RefreshResponse::from_record(&record).is_none());
  }

  #[test]
  fn refresh_response_serialization() {
    let response = RefreshResponse {
      id: "a1".to_string(),
      pk: "bukovel".to_string(),
      is_snowing: false,
      weathercode: None,
      time: None,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
      json,
      json!({ "id": "a1", "pk": "bukovel", "is_snowing": false, "weathercode": null, "time": null })
    );
  }

  #[test]
  fn forecast_response_null_date() {
    let json = serde_json::to_string(&ForecastResponse {
      first_snow_date: None,
    })
    .unwrap();
    assert_eq!(json, r#"{"first_snow_date":null}"#);
  }

  #[test]
  fn ping_response() {
    assert_eq!(serde_json::to_value(PingResponse::ok()).unwrap(), json!({ "status": "ok" }));
  }
}
