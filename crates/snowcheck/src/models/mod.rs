//! models module

pub mod model_definition;
pub mod open_meteo;

pub use model_definition::{CheckResult, GenericDocument, RecordType, WeatherCheckRecord};
pub use open_meteo::{CurrentObservation, DailyForecast};
