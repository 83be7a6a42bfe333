//! Handlers for the `/api/news` resource: public listing plus admin CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::roles::is_staff;
use muweb_core::types::DbId;
use muweb_db::models::news::{CreateNews, NewsItem, UpdateNews};
use muweb_db::repositories::NewsRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/news`.
#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
    /// Defaults to publishing immediately; pass `false` for a draft.
    #[serde(default = "default_true")]
    pub is_published: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/news
///
/// Published news, newest first. Staff see drafts too.
pub async fn list(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<NewsItem>>>> {
    let staff = user.as_ref().is_some_and(|u| is_staff(&u.role));
    let items = NewsRepo::list(&state.web_pool, !staff, params.limit, params.offset).await?;
    Ok(Json(DataResponse::new(items)))
}

/// GET /api/news/{id}
///
/// Single news item. Unpublished items are 404 for non-staff.
pub async fn get(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NewsItem>>> {
    let item = NewsRepo::find_by_id(&state.web_pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("News", id)))?;

    let staff = user.as_ref().is_some_and(|u| is_staff(&u.role));
    if !item.is_published && !staff {
        return Err(AppError::Core(CoreError::not_found("News", id)));
    }

    Ok(Json(DataResponse::new(item)))
}

/// POST /api/news
///
/// Create a news item. Admin only.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Json(input): Json<CreateNewsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<NewsItem>>)> {
    validate_title_and_body(Some(&input.title), Some(&input.body))?;

    let create_dto = CreateNews {
        title: input.title,
        body: input.body,
        author_id: admin.account_id,
        is_published: input.is_published,
    };

    let item = NewsRepo::create(&state.web_pool, &create_dto).await?;

    audit::record(
        &state,
        admin.account_id,
        "news.create",
        "news",
        item.id,
        Some(json!({ "title": item.title })),
        meta.ip,
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(item))))
}

/// PUT /api/news/{id}
///
/// Update a news item. Admin only.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNews>,
) -> AppResult<Json<DataResponse<NewsItem>>> {
    validate_title_and_body(input.title.as_deref(), input.body.as_deref())?;

    let item = NewsRepo::update(&state.web_pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("News", id)))?;

    audit::record(
        &state,
        admin.account_id,
        "news.update",
        "news",
        id,
        Some(json!({ "title": item.title })),
        meta.ip,
    )
    .await;

    Ok(Json(DataResponse::new(item)))
}

/// DELETE /api/news/{id}
///
/// Delete a news item. Admin only. Returns 204.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NewsRepo::delete(&state.web_pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("News", id)));
    }

    audit::record(&state, admin.account_id, "news.delete", "news", id, None, meta.ip).await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject blank titles/bodies on create and update.
fn validate_title_and_body(title: Option<&str>, body: Option<&str>) -> AppResult<()> {
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be blank".into(),
        )));
    }
    if body.is_some_and(|b| b.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Body must not be blank".into(),
        )));
    }
    Ok(())
}
