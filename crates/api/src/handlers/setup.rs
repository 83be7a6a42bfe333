//! Handlers for the `/api/setup` resource (installation wizard).
//!
//! Steps run in order: `database` -> `admin_account` -> `finish`. State is
//! persisted in the web database so an interrupted install resumes. After
//! completion every setup mutation returns 409.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::roles::ROLE_ADMIN;
use muweb_core::setup::SetupStep;
use muweb_db::models::account::{AccountResponse, CreateAccount};
use muweb_db::models::setup::SetupState;
use muweb_db::repositories::{AccountRepo, SetupRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::validate_new_username;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `GET /api/setup/status`.
#[derive(Debug, Serialize)]
pub struct SetupStatusResponse {
    pub installed: bool,
    pub current_step: String,
}

/// Request body for `POST /api/setup/admin`.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/setup/status
///
/// Public: the SPA uses this to decide whether to show the wizard.
pub async fn status(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SetupStatusResponse>>> {
    let setup = SetupRepo::get(&state.web_pool).await?;
    Ok(Json(DataResponse::new(SetupStatusResponse {
        installed: setup.installed,
        current_step: setup.current_step,
    })))
}

/// POST /api/setup/database
///
/// Verify connectivity of both pools and advance to the admin-account
/// step. Migrations have necessarily already run (the `setup_state` row
/// this handler reads is created by them).
pub async fn check_database(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SetupStatusResponse>>> {
    let setup = require_not_installed(&state).await?;

    muweb_db::health_check(&state.game_pool)
        .await
        .map_err(|e| AppError::InternalError(format!("Game database unreachable: {e}")))?;
    muweb_db::health_check(&state.web_pool)
        .await
        .map_err(|e| AppError::InternalError(format!("Web database unreachable: {e}")))?;

    if SetupStep::from_str_db(&setup.current_step)? == SetupStep::Database {
        SetupRepo::set_step(&state.web_pool, SetupStep::AdminAccount).await?;
    }

    let setup = SetupRepo::get(&state.web_pool).await?;
    Ok(Json(DataResponse::new(SetupStatusResponse {
        installed: setup.installed,
        current_step: setup.current_step,
    })))
}

/// POST /api/setup/admin
///
/// Create the first admin account and advance to the finish step.
pub async fn create_admin(
    State(state): State<AppState>,
    Json(input): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AccountResponse>>)> {
    require_not_installed(&state).await?;

    validate_new_username(&input.username)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid email address".into(),
        )));
    }

    if AccountRepo::find_by_username(&state.game_pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateAccount {
        username: input.username,
        password_hash: hashed,
        email: input.email,
        role: ROLE_ADMIN.to_string(),
    };

    let account = AccountRepo::create(&state.game_pool, &create_dto).await?;
    SetupRepo::set_step(&state.web_pool, SetupStep::Finish).await?;
    tracing::info!(username = %account.username, "First admin account created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(AccountResponse::from(&account))),
    ))
}

/// POST /api/setup/complete
///
/// Mark the portal installed. Requires the finish step to be reached.
pub async fn complete(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let setup = require_not_installed(&state).await?;

    if SetupStep::from_str_db(&setup.current_step)? != SetupStep::Finish {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot complete setup from step '{}'",
            setup.current_step
        ))));
    }

    let marked = SetupRepo::mark_installed(&state.web_pool).await?;
    if !marked {
        return Err(AppError::Core(CoreError::Conflict(
            "Portal is already installed".into(),
        )));
    }

    state
        .installed
        .store(true, std::sync::atomic::Ordering::Relaxed);
    tracing::info!("Installation completed");

    Ok(Json(DataResponse::new(json!({ "installed": true }))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load setup state, rejecting with 409 once installed.
async fn require_not_installed(state: &AppState) -> AppResult<SetupState> {
    let setup = SetupRepo::get(&state.web_pool).await?;
    if setup.installed {
        return Err(AppError::Core(CoreError::Conflict(
            "Portal is already installed".into(),
        )));
    }
    Ok(setup)
}
