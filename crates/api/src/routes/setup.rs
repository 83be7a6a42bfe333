//! Route definitions for the `/api/setup` resource (installation wizard).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::setup;
use crate::state::AppState;

/// Routes mounted at `/setup`.
///
/// ```text
/// GET  /status    -> wizard status
/// POST /database  -> connectivity check
/// POST /admin     -> first admin account
/// POST /complete  -> finish installation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(setup::status))
        .route("/database", post(setup::check_database))
        .route("/admin", post(setup::create_admin))
        .route("/complete", post(setup::complete))
}
