//! Snow check service
//!
//! Glue between the HTTP handlers, the weather source and the document store.
//! Each call is independent: fetch, classify, write, respond.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use snowcheck::config::{DEFAULT_DOC_PARTITION_KEY, FORECAST_DAYS, Location};
use snowcheck::models::GenericDocument;
use snowcheck::{CheckResult, DocumentStore, StoreError, WeatherCheckRecord, WeatherSource};

use crate::errors::{ApiError, Result};
use crate::models::{CreatedDocument, ForecastResponse, RefreshResponse};

/// Outcome of a write whose failure must not fail the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideWrite {
  /// The document was stored
  Stored,
  /// The write failed and was dropped
  Skipped(StoreError),
}

impl SideWrite {
  /// `true` if the document was stored.
  #[must_use]
  pub fn is_stored(&self) -> bool {
    matches!(self, SideWrite::Stored)
  }
}

/// Result of a forecast scan together with its audit write.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
  /// Body returned to the caller
  pub response: ForecastResponse,
  /// What happened to the `forecast_check` record
  pub audit: SideWrite,
}

/// Writes `document` and never fails: errors are logged and returned as
/// [`SideWrite::Skipped`].
pub async fn best_effort_write(
  store: &dyn DocumentStore,
  partition_key: &str,
  document: Value,
) -> SideWrite {
  match store.create(partition_key, document).await {
    Ok(()) => SideWrite::Stored,
    Err(e) => {
      warn!(error = %e, pk = %partition_key, "ベストエフォート書き込みに失敗しました（無視します）");
      SideWrite::Skipped(e)
    }
  }
}

/// Snow check service
///
/// - Production: `OpenMeteoClient` + `CosmosStore`
/// - Test: wiremock-backed `OpenMeteoClient` / stub sources + `MemoryStore`
#[derive(Clone)]
pub struct SnowcheckApiService {
  weather: Arc<dyn WeatherSource>,
  store: Arc<dyn DocumentStore>,
  location: Location,
}

impl SnowcheckApiService {
  /// Creates the service from already constructed clients.
  #[must_use]
  pub fn new(
    weather: Arc<dyn WeatherSource>,
    store: Arc<dyn DocumentStore>,
    location: Location,
  ) -> Self {
    Self {
      weather,
      store,
      location,
    }
  }

  /// Checks the current weather and stores a `weather_check` record.
  ///
  /// # Errors
  /// - Upstream failure: [`ApiError::UpstreamWeather`], nothing is written
  /// - Store failure: [`ApiError::Internal`]
  pub async fn refresh(&self) -> Result<RefreshResponse> {
    let observation = self.weather.current().await?;
    let record = WeatherCheckRecord::current(&self.location, observation);

    let response = RefreshResponse::from_record(&record)
      .ok_or_else(|| ApiError::internal("unexpected record kind"))?;

    let document = serde_json::to_value(&record)
      .map_err(|e| ApiError::internal(format!("record serialization failed: {e}")))?;

    self.store.create(&record.pk, document).await.map_err(|e| {
      error!(error = %e, id = %record.id, "チェック結果の保存に失敗しました");
      ApiError::db_write(&e)
    })?;

    info!(
      id = %response.id,
      is_snowing = response.is_snowing,
      weathercode = ?response.weathercode,
      "天気チェック完了"
    );

    Ok(response)
  }

  /// Scans the daily forecast for the first snow date.
  ///
  /// The `forecast_check` record is a best-effort side write: its failure is
  /// reported in [`ForecastOutcome::audit`] only.
  ///
  /// # Errors
  /// Upstream failure: [`ApiError::UpstreamWeather`]
  pub async fn forecast(&self) -> Result<ForecastOutcome> {
    let forecast = self.weather.daily_forecast(FORECAST_DAYS).await?;
    let record = WeatherCheckRecord::forecast(&self.location, forecast);

    let first_snow_date = match &record.result {
      CheckResult::Forecast { first_snow_date } => first_snow_date.clone(),
      CheckResult::Current { .. } => None,
    };

    let audit = match serde_json::to_value(&record) {
      Ok(document) => best_effort_write(self.store.as_ref(), &record.pk, document).await,
      Err(e) => SideWrite::Skipped(StoreError::InvalidDocument(e.to_string())),
    };

    info!(first_snow_date = ?first_snow_date, stored = audit.is_stored(), "予報チェック完了");

    Ok(ForecastOutcome {
      response: ForecastResponse { first_snow_date },
      audit,
    })
  }

  /// Stores an arbitrary JSON object under `data`.
  ///
  /// `id` and `pk` are taken from the body when present (non-empty strings),
  /// otherwise a UUID and `"default"` are used.
  ///
  /// # Errors
  /// - Body is not an object, or `id`/`pk` is not a non-empty string: [`ApiError::InvalidInput`]
  /// - Id already used in the partition: [`ApiError::Conflict`]
  /// - Other store failure: [`ApiError::Internal`]
  pub async fn create_document(&self, body: Value) -> Result<CreatedDocument> {
    let fields = body
      .as_object()
      .ok_or_else(|| ApiError::invalid_input("body must be a JSON object"))?;

    let id =
      optional_key(fields.get("id"), "id")?.unwrap_or_else(|| Uuid::new_v4().to_string());
    let pk = optional_key(fields.get("pk"), "pk")?
      .unwrap_or_else(|| DEFAULT_DOC_PARTITION_KEY.to_string());

    let document = serde_json::to_value(GenericDocument::new(&id, &pk, body))
      .map_err(|e| ApiError::internal(format!("document serialization failed: {e}")))?;

    self.store.create(&pk, document).await?;

    info!(id = %id, pk = %pk, "ドキュメントを保存しました");

    Ok(CreatedDocument { id, pk })
  }

  /// Reads a stored document (`pk` defaults to `"default"`).
  ///
  /// # Errors
  /// - Empty `pk`: [`ApiError::InvalidInput`]
  /// - No such document: [`ApiError::NotFound`]
  /// - Other store failure: [`ApiError::Internal`]
  pub async fn get_document(&self, id: &str, pk: Option<&str>) -> Result<Value> {
    let pk = pk.unwrap_or(DEFAULT_DOC_PARTITION_KEY);
    if pk.is_empty() {
      return Err(ApiError::invalid_input("pk must not be empty"));
    }
    Ok(self.store.read(id, pk).await?)
  }
}

/// `null` or absent → `None`; non-empty string → `Some`; anything else is invalid.
fn optional_key(value: Option<&Value>, name: &str) -> Result<Option<String>> {
  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.clone())),
    Some(_) => Err(ApiError::invalid_input(format!("`{name}` must be a non-empty string"))),
  }
}
