//! Handlers for the `/api/downloads` resource: public listing plus admin
//! CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::roles::is_staff;
use muweb_core::types::DbId;
use muweb_db::models::download::{validate_category, CreateDownload, Download, UpdateDownload};
use muweb_db::repositories::DownloadRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/downloads
///
/// Active downloads in configured order. Staff see disabled entries too.
pub async fn list(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> AppResult<Json<DataResponse<Vec<Download>>>> {
    let staff = user.as_ref().is_some_and(|u| is_staff(&u.role));
    let entries = DownloadRepo::list(&state.web_pool, !staff).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// POST /api/downloads
///
/// Create a download entry. Admin only.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Json(input): Json<CreateDownload>,
) -> AppResult<(StatusCode, Json<DataResponse<Download>>)> {
    validate_category(&input.category)?;
    validate_entry(Some(&input.name), Some(&input.url))?;

    let entry = DownloadRepo::create(&state.web_pool, &input).await?;

    audit::record(
        &state,
        admin.account_id,
        "download.create",
        "download",
        entry.id,
        Some(json!({ "name": entry.name, "category": entry.category })),
        meta.ip,
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// PUT /api/downloads/{id}
///
/// Update a download entry. Admin only.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDownload>,
) -> AppResult<Json<DataResponse<Download>>> {
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    validate_entry(input.name.as_deref(), input.url.as_deref())?;

    let entry = DownloadRepo::update(&state.web_pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Download", id)))?;

    audit::record(
        &state,
        admin.account_id,
        "download.update",
        "download",
        id,
        Some(json!({ "name": entry.name })),
        meta.ip,
    )
    .await;

    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/downloads/{id}
///
/// Delete a download entry. Admin only. Returns 204.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DownloadRepo::delete(&state.web_pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Download", id)));
    }

    audit::record(
        &state,
        admin.account_id,
        "download.delete",
        "download",
        id,
        None,
        meta.ip,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_entry(name: Option<&str>, url: Option<&str>) -> AppResult<()> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be blank".into(),
        )));
    }
    if url.is_some_and(|u| !u.starts_with("http://") && !u.starts_with("https://")) {
        return Err(AppError::Core(CoreError::Validation(
            "URL must start with http:// or https://".into(),
        )));
    }
    Ok(())
}
