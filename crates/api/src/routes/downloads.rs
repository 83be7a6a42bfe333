//! Route definitions for the `/api/downloads` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::downloads;
use crate::state::AppState;

/// Routes mounted at `/downloads`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> create (admin)
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(downloads::list).post(downloads::create))
        .route("/{id}", put(downloads::update).delete(downloads::delete))
}
