//! Route definitions for the `/api/wcoin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::wcoin;
use crate::state::AppState;

/// Routes mounted at `/wcoin`.
///
/// ```text
/// GET    /packages       -> list (public)
/// POST   /packages       -> create (admin)
/// PUT    /packages/{id}  -> update (admin)
/// DELETE /packages/{id}  -> delete (admin)
/// GET    /balance        -> own balance (auth)
/// GET    /history        -> own ledger (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/packages",
            get(wcoin::list_packages).post(wcoin::create_package),
        )
        .route(
            "/packages/{id}",
            put(wcoin::update_package).delete(wcoin::delete_package),
        )
        .route("/balance", get(wcoin::balance))
        .route("/history", get(wcoin::history))
}
