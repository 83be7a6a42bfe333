//! Handlers for the `/api/bans` resource. All endpoints are staff-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::types::{DbId, Timestamp};
use muweb_db::models::ban::{Ban, BanScope, CreateBan};
use muweb_db::repositories::{AccountRepo, BanRepo, SessionRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/bans`.
#[derive(Debug, Deserialize)]
pub struct CreateBanRequest {
    pub scope: BanScope,
    /// Username for account bans, the address itself for ip/mac bans.
    pub value: String,
    pub reason: String,
    /// `null` means permanent.
    pub expires_at: Option<Timestamp>,
}

/// Query parameters for `GET /api/bans`.
#[derive(Debug, Deserialize)]
pub struct BanListParams {
    #[serde(default)]
    pub active: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/bans
///
/// Create a ban. Banning an account also revokes its sessions so the ban
/// takes effect immediately.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    meta: ClientMeta,
    Json(input): Json<CreateBanRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Ban>>)> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A ban reason is required".into(),
        )));
    }
    if let Some(expires_at) = input.expires_at {
        if expires_at <= chrono::Utc::now() {
            return Err(AppError::Core(CoreError::Validation(
                "Ban expiry must be in the future".into(),
            )));
        }
    }

    // Account bans resolve the username to an id; ip/mac bans store the
    // address verbatim.
    let account_id: Option<DbId> = match input.scope {
        BanScope::Account => {
            let account = AccountRepo::find_by_username(&state.game_pool, &input.value)
                .await?
                .ok_or_else(|| AppError::Core(CoreError::not_found("Account", &input.value)))?;
            Some(account.id)
        }
        BanScope::Ip | BanScope::Mac => {
            if input.value.trim().is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "A ban value is required".into(),
                )));
            }
            None
        }
    };

    let create_dto = CreateBan {
        scope: input.scope,
        value: input.value,
        account_id,
        reason: input.reason,
        banned_by: staff.account_id,
        expires_at: input.expires_at,
    };

    let ban = BanRepo::create(&state.web_pool, &create_dto).await?;

    if let Some(account_id) = account_id {
        SessionRepo::revoke_all_for_account(&state.web_pool, account_id).await?;
    }

    tracing::info!(ban_id = ban.id, scope = %ban.scope, value = %ban.value, "Ban created");

    audit::record(
        &state,
        staff.account_id,
        "ban.create",
        "ban",
        ban.id,
        Some(json!({
            "scope": ban.scope,
            "value": ban.value,
            "reason": ban.reason,
            "expires_at": ban.expires_at,
        })),
        meta.ip,
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(ban))))
}

/// GET /api/bans
///
/// List bans, newest first. `?active=true` filters to bans in force.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<BanListParams>,
) -> AppResult<Json<DataResponse<Vec<Ban>>>> {
    let bans = BanRepo::list(&state.web_pool, params.active, params.limit, params.offset).await?;
    Ok(Json(DataResponse::new(bans)))
}

/// DELETE /api/bans/{id}
///
/// Lift a ban. The record stays for history.
pub async fn lift(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let lifted = BanRepo::lift(&state.web_pool, id, staff.account_id).await?;
    if !lifted {
        return Err(AppError::Core(CoreError::not_found("Ban", id)));
    }

    audit::record(
        &state,
        staff.account_id,
        "ban.lift",
        "ban",
        id,
        None,
        meta.ip,
    )
    .await;

    Ok(Json(DataResponse::new(json!({ "lifted": true }))))
}
