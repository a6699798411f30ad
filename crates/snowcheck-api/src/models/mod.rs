//! モデルモジュール

mod request;
mod response;

pub use request::DocQuery;
pub use response::{CreatedDocument, ForecastResponse, PingResponse, RefreshResponse};
