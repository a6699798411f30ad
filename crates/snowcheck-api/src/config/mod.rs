//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_COSMOS_CONTAINER, ENV_COSMOS_DATABASE,
  ENV_COSMOS_ENDPOINT, ENV_COSMOS_KEY, ENV_STORE, ENV_WEATHER_BASE_URL,
};
pub use env::{Config, StoreKind};
