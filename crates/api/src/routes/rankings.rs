//! Route definitions for the public `/api/rankings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rankings;
use crate::state::AppState;

/// Routes mounted at `/rankings`. All public.
///
/// ```text
/// GET /resets  -> resets board
/// GET /level   -> level board
/// GET /pk      -> PK board
/// GET /guilds  -> guild board
/// GET /online  -> online snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resets", get(rankings::resets))
        .route("/level", get(rankings::level))
        .route("/pk", get(rankings::pk))
        .route("/guilds", get(rankings::guilds))
        .route("/online", get(rankings::online))
}
