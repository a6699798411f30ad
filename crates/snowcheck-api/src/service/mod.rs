//! Service module

mod snowcheck_api_service;

pub use snowcheck_api_service::{
  ForecastOutcome, SideWrite, SnowcheckApiService, best_effort_write,
};
