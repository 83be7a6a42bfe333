//! Route definitions for the `/api/auth` resource.

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;
use tower_governor::GovernorLayer;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register -> register
/// POST /login    -> login
/// POST /refresh  -> refresh
/// POST /logout   -> logout (requires auth)
/// ```
///
/// The whole group sits behind a per-IP rate limiter (when enabled) since
/// these are the endpoints worth brute-forcing.
pub fn router(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout));

    let rate_limit = &state.config.rate_limit;
    if !rate_limit.enabled {
        return router;
    }

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(rate_limit.replenish_secs)
            .burst_size(rate_limit.burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("Invalid rate limit configuration"),
    );

    router.layer(GovernorLayer::new(governor_conf))
}
