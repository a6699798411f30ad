//! Config loading from environment variables

use std::str::FromStr;

use snowcheck::config::{
  DEFAULT_CONTAINER, DEFAULT_DATABASE, DEFAULT_WEATHER_BASE_URL, StoreSettings,
};

use super::constants::{
  DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_COSMOS_CONTAINER, ENV_COSMOS_DATABASE,
  ENV_COSMOS_ENDPOINT, ENV_COSMOS_KEY, ENV_STORE, ENV_WEATHER_BASE_URL,
};
use crate::errors::ApiError;

/// Document store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
  /// Azure Cosmos DB (default)
  Cosmos,
  /// In-process map, lost on restart
  Memory,
}

impl FromStr for StoreKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "cosmos" => Ok(Self::Cosmos),
      "memory" => Ok(Self::Memory),
      _ => Err(format!("Unknown store: {}. Valid values: cosmos, memory", s)),
    }
  }
}

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:8000")
  pub bind_addr: String,
  /// Document store backend
  pub store_kind: StoreKind,
  /// Open-Meteo base URL
  pub weather_base_url: String,
  /// Cosmos DB connection settings
  pub store: StoreSettings,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// `COSMOS_ENDPOINT` / `COSMOS_KEY` may be absent; the store then fails on
  /// its first operation.
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Loads configuration through an arbitrary variable lookup.
  ///
  /// Empty values are treated as unset.
  ///
  /// # Errors
  /// Returns an error if a value is invalid
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let bind_addr = var(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let store_kind = match var(ENV_STORE) {
      Some(s) => StoreKind::from_str(&s).map_err(ApiError::config)?,
      None => StoreKind::Cosmos,
    };

    let weather_base_url =
      var(ENV_WEATHER_BASE_URL).unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string());

    let store = StoreSettings {
      endpoint: var(ENV_COSMOS_ENDPOINT),
      key: var(ENV_COSMOS_KEY),
      database: var(ENV_COSMOS_DATABASE).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
      container: var(ENV_COSMOS_CONTAINER).unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
    };

    Ok(Self {
      bind_addr,
      store_kind,
      weather_base_url,
      store,
    })
  }
}
