//! Install guard: until setup completes, only `/health` and the
//! `/api/setup` routes respond; everything else returns 503.
//!
//! Once installation has been observed the result is cached in an atomic
//! flag so steady-state requests never touch the `setup_state` row.

use std::sync::atomic::Ordering;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use muweb_db::repositories::SetupRepo;

use crate::state::AppState;

/// Axum middleware fn; mount with `axum::middleware::from_fn_with_state`.
pub async fn require_installed(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if path == "/health" || path.starts_with("/api/setup") {
        return next.run(request).await;
    }

    if !state.installed.load(Ordering::Relaxed) {
        match SetupRepo::get(&state.web_pool).await {
            Ok(setup) if setup.installed => {
                state.installed.store(true, Ordering::Relaxed);
            }
            Ok(_) => {
                return service_unavailable("Portal is not installed yet. Run the setup wizard.");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read setup state");
                return service_unavailable("Portal installation state is unavailable");
            }
        }
    }

    next.run(request).await
}

fn service_unavailable(message: &str) -> Response {
    let body = json!({
        "success": false,
        "error": message,
        "code": "NOT_INSTALLED",
    });
    (StatusCode::SERVICE_UNAVAILABLE, axum::Json(body)).into_response()
}
