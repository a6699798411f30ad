//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{
  app_js, get_doc, get_forecast, health_check, index, ping, post_doc, post_refresh,
};
pub use routes::{build_state, create_router, run_server};
pub use state::AppState;
