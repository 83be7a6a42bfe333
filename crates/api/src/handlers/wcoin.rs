//! Handlers for the `/api/wcoin` resource: public package listing, own
//! balance/history, admin package CRUD, and staff credit/debit.
//!
//! The portal stores external payment links; coins are credited manually
//! by staff after payment. There is no payment-provider integration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::types::DbId;
use muweb_db::models::wcoin::{
    CreateWcoinPackage, UpdateWcoinPackage, WcoinLedgerEntry, WcoinPackage,
};
use muweb_db::repositories::WcoinRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::handlers::accounts::find_by_username;
use crate::handlers::auth::load_account;
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/accounts/{username}/wcoin`.
#[derive(Debug, Deserialize)]
pub struct AdjustWcoinRequest {
    /// Positive to credit, negative to debit. Never zero.
    pub amount: i64,
    pub reason: String,
    /// Shop package this movement belongs to, if any.
    pub package_id: Option<DbId>,
}

/// Response for balance queries and adjustments.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: i64,
}

// ---------------------------------------------------------------------------
// Public / player handlers
// ---------------------------------------------------------------------------

/// GET /api/wcoin/packages
///
/// Active shop packages in configured order.
pub async fn list_packages(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WcoinPackage>>>> {
    let packages = WcoinRepo::list_packages(&state.web_pool, true).await?;
    Ok(Json(DataResponse::new(packages)))
}

/// GET /api/wcoin/balance
///
/// Own wcoin balance.
pub async fn balance(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<BalanceResponse>>> {
    let account = load_account(&state, user.account_id).await?;
    Ok(Json(DataResponse::new(BalanceResponse {
        balance: account.wcoin,
    })))
}

/// GET /api/wcoin/history
///
/// Own ledger entries, newest first.
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<WcoinLedgerEntry>>>> {
    let entries = WcoinRepo::list_ledger(
        &state.game_pool,
        user.account_id,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse::new(entries)))
}

// ---------------------------------------------------------------------------
// Admin package CRUD
// ---------------------------------------------------------------------------

/// POST /api/wcoin/packages
///
/// Create a shop package. Admin only.
pub async fn create_package(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Json(input): Json<CreateWcoinPackage>,
) -> AppResult<(StatusCode, Json<DataResponse<WcoinPackage>>)> {
    if input.coins <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Package must grant a positive number of coins".into(),
        )));
    }

    let package = WcoinRepo::create_package(&state.web_pool, &input).await?;

    audit::record(
        &state,
        admin.account_id,
        "wcoin.package.create",
        "wcoin_package",
        package.id,
        Some(json!({ "name": package.name, "coins": package.coins })),
        meta.ip,
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(package))))
}

/// PUT /api/wcoin/packages/{id}
///
/// Update a shop package. Admin only.
pub async fn update_package(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWcoinPackage>,
) -> AppResult<Json<DataResponse<WcoinPackage>>> {
    if input.coins.is_some_and(|c| c <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Package must grant a positive number of coins".into(),
        )));
    }

    let package = WcoinRepo::update_package(&state.web_pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WcoinPackage", id)))?;

    audit::record(
        &state,
        admin.account_id,
        "wcoin.package.update",
        "wcoin_package",
        id,
        Some(json!({ "name": package.name })),
        meta.ip,
    )
    .await;

    Ok(Json(DataResponse::new(package)))
}

/// DELETE /api/wcoin/packages/{id}
///
/// Delete a shop package. Admin only. Returns 204.
pub async fn delete_package(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WcoinRepo::delete_package(&state.web_pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("WcoinPackage", id)));
    }

    audit::record(
        &state,
        admin.account_id,
        "wcoin.package.delete",
        "wcoin_package",
        id,
        None,
        meta.ip,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Staff credit / debit
// ---------------------------------------------------------------------------

/// POST /api/accounts/{username}/wcoin
///
/// Credit or debit an account's wcoin balance. Staff only. The balance can
/// never go negative.
pub async fn adjust(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    meta: ClientMeta,
    Path(username): Path<String>,
    Json(input): Json<AdjustWcoinRequest>,
) -> AppResult<Json<DataResponse<BalanceResponse>>> {
    if input.amount == 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must not be zero".into(),
        )));
    }
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A reason is required".into(),
        )));
    }

    let account = find_by_username(&state, &username).await?;

    let balance = WcoinRepo::adjust_balance(
        &state.game_pool,
        account.id,
        input.amount,
        &input.reason,
        input.package_id,
        Some(staff.account_id),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Debit would take the balance negative".into(),
        ))
    })?;

    audit::record(
        &state,
        staff.account_id,
        "wcoin.adjust",
        "account",
        &username,
        Some(json!({
            "amount": input.amount,
            "reason": input.reason,
            "balance_after": balance,
        })),
        meta.ip,
    )
    .await;

    Ok(Json(DataResponse::new(BalanceResponse { balance })))
}
