//! Route definitions for the `/api/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All admin-only.
///
/// ```text
/// GET /logs                 -> audit trail
/// PUT /characters/{name}    -> direct character edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", get(admin::list_logs))
        .route("/characters/{name}", put(admin::update_character))
}
