//! snowcheck-api crate
//!
//! Web server answering "is it snowing in Bukovel?" over HTTP.
//!
//! ## Endpoints
//! - `GET /` - Page with a refresh button
//! - `POST /refresh` - Check current weather and store the result
//! - `GET /forecast` - First snow date in the 14-day forecast
//! - `POST /docs` - Store an arbitrary JSON object
//! - `GET /docs/{id}?pk=...` - Read a stored document
//! - `GET /ping` - Liveness probe
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:8000/refresh
//! curl -X POST http://127.0.0.1:8000/docs \
//!   -H "Content-Type: application/json" \
//!   -d '{"id": "note-1", "pk": "notes", "text": "first lift at 9"}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{CreatedDocument, ForecastResponse, PingResponse, RefreshResponse};
pub use service::SnowcheckApiService;
