//! Route definitions for the `/api/accounts` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{accounts, wcoin};
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// GET /me                    -> own profile
/// PUT /me/password           -> change own password
/// PUT /me/email              -> change own email
/// GET /                      -> search (admin)
/// GET /{username}            -> lookup (admin)
/// PUT /{username}            -> update (admin)
/// POST /{username}/wcoin     -> credit / debit (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(accounts::me))
        .route("/me/password", put(accounts::change_password))
        .route("/me/email", put(accounts::change_email))
        .route("/", get(accounts::search))
        .route(
            "/{username}",
            get(accounts::get_by_username).put(accounts::update),
        )
        .route("/{username}/wcoin", post(wcoin::adjust))
}
