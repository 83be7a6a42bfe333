//! Route definitions for the `/api/bans` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::bans;
use crate::state::AppState;

/// Routes mounted at `/bans`. All staff-only.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// DELETE /{id}  -> lift
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bans::list).post(bans::create))
        .route("/{id}", delete(bans::lift))
}
