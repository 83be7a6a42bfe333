//! Handlers for the `/api/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use muweb_core::error::CoreError;
use muweb_core::roles::ROLE_PLAYER;
use muweb_core::types::DbId;
use muweb_db::models::account::{Account, AccountResponse, CreateAccount};
use muweb_db::models::session::CreateSession;
use muweb_db::repositories::{AccountRepo, BanRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 4, max = 10, message = "Username must be 4-10 characters"),
        custom(function = validate_username_chars)
    )]
    pub username: String,
    pub password: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /api/auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub account: AccountResponse,
}

/// Game accounts are limited to alphanumeric names; anything else breaks
/// the game client's login window.
fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_chars");
        err.message = Some("Username may only contain letters and digits".into());
        Err(err)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a player account. Returns the new account with 201 Created.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AccountResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Unique username/email checks up front for friendly messages; the
    // database constraints still back them up.
    if AccountRepo::find_by_username(&state.game_pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }
    if AccountRepo::find_by_email(&state.game_pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateAccount {
        username: input.username,
        password_hash: hashed,
        email: input.email,
        role: ROLE_PLAYER.to_string(),
    };

    let account = AccountRepo::create(&state.game_pool, &create_dto).await?;
    tracing::info!(username = %account.username, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(AccountResponse::from(&account))),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    // 1. Find the account. Unknown user and bad password produce the same
    //    message so usernames cannot be probed.
    let account = AccountRepo::find_by_username(&state.game_pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Check account status.
    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = account.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 3. Check active bans.
    if let Some(ban) = BanRepo::find_active_for_account(&state.web_pool, account.id).await? {
        let until = ban
            .expires_at
            .map(|t| format!(" until {}", t.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_default();
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Account is banned{until}: {}",
            ban.reason
        ))));
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold exceeded.
        AccountRepo::increment_failed_login(&state.game_pool, account.id).await?;

        let new_count = account.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            AccountRepo::lock_account(&state.game_pool, account.id, lock_until).await?;
            tracing::warn!(username = %account.username, "Account locked after repeated failures");
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 6. On success: reset the failure counter, stamp login time and IP.
    AccountRepo::record_successful_login(&state.game_pool, account.id, meta.ip.as_deref()).await?;

    // 7. Generate tokens and persist the session.
    let response = create_auth_response(&state, &account, &meta).await?;

    Ok(Json(DataResponse::new(response)))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    // 1. Hash the provided refresh token and find the matching session.
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.web_pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Revoke the old session (token rotation).
    SessionRepo::revoke(&state.web_pool, session.id).await?;

    // 3. Re-check the account.
    let account = AccountRepo::find_by_id(&state.game_pool, session.account_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if BanRepo::find_active_for_account(&state.web_pool, account.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is banned".into(),
        )));
    }

    // 4. Generate new tokens and a new session.
    let response = create_auth_response(&state, &account, &meta).await?;

    Ok(Json(DataResponse::new(response)))
}

/// POST /api/auth/logout
///
/// Revoke all sessions for the authenticated account. Returns 204.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_account(&state.web_pool, user.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response.
async fn create_auth_response(
    state: &AppState,
    account: &Account,
    meta: &ClientMeta,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(
        account.id,
        &account.role,
        meta.ip.as_deref(),
        meta.user_agent.as_deref(),
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        account_id: account.id,
        refresh_token_hash: refresh_hash,
        expires_at,
        user_agent: meta.user_agent.clone(),
        ip_address: meta.ip.clone(),
    };
    SessionRepo::create(&state.web_pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        account: AccountResponse::from(account),
    })
}

/// Shared username validation for the setup wizard's admin-account step.
pub(crate) fn validate_new_username(username: &str) -> Result<(), CoreError> {
    if !(4..=10).contains(&username.len()) {
        return Err(CoreError::Validation(
            "Username must be 4-10 characters".into(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(
            "Username may only contain letters and digits".into(),
        ));
    }
    Ok(())
}

/// Look up an account id's row or 404.
pub(crate) async fn load_account(state: &AppState, id: DbId) -> AppResult<Account> {
    AccountRepo::find_by_id(&state.game_pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Account", id)))
}
