//! Route definitions for the `/api/characters` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET  /                  -> own characters (auth)
/// GET  /{name}            -> character view
/// PUT  /{name}/points     -> distribute level-up points (owner)
/// POST /{name}/reset      -> reset (owner)
/// POST /{name}/pk-clear   -> clear PK status (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(characters::list_own))
        .route("/{name}", get(characters::get))
        .route("/{name}/points", put(characters::distribute_points))
        .route("/{name}/reset", post(characters::reset))
        .route("/{name}/pk-clear", post(characters::pk_clear))
}
