//! Handlers for the `/api/accounts` resource: own profile management plus
//! the admin lookup screen.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::roles::is_valid_role;
use muweb_db::models::account::{Account, AccountResponse, UpdateAccount};
use muweb_db::repositories::{AccountRepo, CharacterRepo, SessionRepo};

use crate::audit;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::load_account;
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/accounts`.
#[derive(Debug, Deserialize)]
pub struct AccountSearchParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Own profile payload for `GET /api/accounts/me`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub characters: Vec<String>,
}

/// Request body for `PUT /api/accounts/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `PUT /api/accounts/me/email`.
#[derive(Debug, Deserialize)]
pub struct ChangeEmailRequest {
    pub current_password: String,
    pub new_email: String,
}

// ---------------------------------------------------------------------------
// Own-profile handlers
// ---------------------------------------------------------------------------

/// GET /api/accounts/me
///
/// Own account info plus character names.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let account = load_account(&state, user.account_id).await?;
    let characters = CharacterRepo::list_names_by_account(&state.game_pool, account.id).await?;

    Ok(Json(DataResponse::new(ProfileResponse {
        account: AccountResponse::from(&account),
        characters,
    })))
}

/// PUT /api/accounts/me/password
///
/// Change own password. All sessions are revoked afterwards, so every
/// device has to log in again.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let account = load_account(&state, user.account_id).await?;
    verify_current_password(&account, &input.current_password)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    AccountRepo::update_password(&state.game_pool, account.id, &hashed).await?;
    SessionRepo::revoke_all_for_account(&state.web_pool, account.id).await?;
    tracing::info!(username = %account.username, "Password changed, sessions revoked");

    Ok(Json(DataResponse::new(json!({ "updated": true }))))
}

/// PUT /api/accounts/me/email
///
/// Change own email after re-verifying the password.
pub async fn change_email(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangeEmailRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if !input.new_email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid email address".into(),
        )));
    }

    let account = load_account(&state, user.account_id).await?;
    verify_current_password(&account, &input.current_password)?;

    if let Some(existing) = AccountRepo::find_by_email(&state.game_pool, &input.new_email).await? {
        if existing.id != account.id {
            return Err(AppError::Core(CoreError::Conflict(
                "Email is already registered".into(),
            )));
        }
    }

    AccountRepo::update_email(&state.game_pool, account.id, &input.new_email).await?;

    Ok(Json(DataResponse::new(json!({ "updated": true }))))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/accounts
///
/// Paginated account lookup by username/email substring. Admin only.
pub async fn search(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AccountSearchParams>,
) -> AppResult<Json<DataResponse<Vec<AccountResponse>>>> {
    let accounts = AccountRepo::search(
        &state.game_pool,
        params.search.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    let responses: Vec<AccountResponse> = accounts.iter().map(AccountResponse::from).collect();
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/accounts/{username}
///
/// Single account lookup. Admin only.
pub async fn get_by_username(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(username): Path<String>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    let account = find_by_username(&state, &username).await?;
    Ok(Json(DataResponse::new(AccountResponse::from(&account))))
}

/// PUT /api/accounts/{username}
///
/// Admin edit of email / role / active flag. Deactivating revokes the
/// account's sessions. Admins cannot demote or deactivate themselves.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(username): Path<String>,
    Json(input): Json<UpdateAccount>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    if let Some(role) = &input.role {
        if !is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid role '{role}'. Must be one of: player, game_master, admin"
            ))));
        }
    }

    let account = find_by_username(&state, &username).await?;

    // Self-demotion or self-deactivation would lock the last admin out.
    if account.id == admin.account_id
        && (input.is_active == Some(false)
            || input.role.as_deref().is_some_and(|r| r != admin.role))
    {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot demote or deactivate their own account".into(),
        )));
    }

    let updated = AccountRepo::update(&state.game_pool, account.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Account", &username)))?;

    if input.is_active == Some(false) {
        SessionRepo::revoke_all_for_account(&state.web_pool, account.id).await?;
    }

    audit::record(
        &state,
        admin.account_id,
        "account.update",
        "account",
        &username,
        Some(json!({
            "email": input.email,
            "role": input.role,
            "is_active": input.is_active,
        })),
        meta.ip,
    )
    .await;

    Ok(Json(DataResponse::new(AccountResponse::from(&updated))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn verify_current_password(account: &Account, password: &str) -> AppResult<()> {
    let valid = verify_password(password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }
    Ok(())
}

pub(crate) async fn find_by_username(state: &AppState, username: &str) -> AppResult<Account> {
    AccountRepo::find_by_username(&state.game_pool, username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Account", username)))
}
