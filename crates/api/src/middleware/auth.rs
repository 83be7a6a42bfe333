//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use muweb_core::error::CoreError;
use muweb_core::types::DbId;

use crate::auth::jwt::{hash_user_agent, validate_token};
use crate::error::AppError;
use crate::middleware::client::ClientMeta;
use crate::state::AppState;

/// Authenticated account extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// When client binding is enabled, the embedded IP / User-Agent hash is
/// compared against the live request; a mismatch is treated as a possible
/// session hijack and rejected with 401.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(account_id = user.account_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account's internal database id (from `claims.sub`).
    pub account_id: DbId,
    /// The account's role name (e.g. `"admin"`, `"player"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if state.config.jwt.bind_client {
            let meta = ClientMeta::from_request_parts(parts, state)
                .await
                .unwrap_or_default();

            if let (Some(bound_ip), Some(current_ip)) = (&claims.ip, &meta.ip) {
                if bound_ip != current_ip {
                    tracing::warn!(
                        account_id = claims.sub,
                        bound_ip = %bound_ip,
                        current_ip = %current_ip,
                        "Token presented from a different IP, rejecting as possible hijack"
                    );
                    return Err(AppError::Core(CoreError::Unauthorized(
                        "Token is not valid for this client".into(),
                    )));
                }
            }

            if let (Some(bound_ua), Some(current_ua)) = (&claims.ua, &meta.user_agent) {
                if *bound_ua != hash_user_agent(current_ua) {
                    tracing::warn!(
                        account_id = claims.sub,
                        "Token presented with a different User-Agent, rejecting as possible hijack"
                    );
                    return Err(AppError::Core(CoreError::Unauthorized(
                        "Token is not valid for this client".into(),
                    )));
                }
            }
        }

        Ok(AuthUser {
            account_id: claims.sub,
            role: claims.role,
        })
    }
}

/// `Option<AuthUser>` for routes that serve both anonymous and
/// authenticated callers: a missing Authorization header yields `None`,
/// while a present-but-invalid token is still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key("authorization") {
            return Ok(None);
        }
        <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
