//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::SnowcheckApiService;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and the snow check service; the weather and store
/// clients inside the service are built once in `main` and shared.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Snow check service
  ///
  /// - Production: Open-Meteo + Cosmos DB clients
  /// - Test: mock server / stub clients + `MemoryStore`
  pub service: Arc<SnowcheckApiService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<SnowcheckApiService>) -> Self {
    Self { config, service }
  }
}
