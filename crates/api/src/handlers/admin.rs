//! Handlers for the `/api/admin` resource: audit log queries and direct
//! character edits.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_db::models::admin_log::{AdminLog, AdminLogQuery};
use muweb_db::models::character::{AdminUpdateCharacter, CharacterResponse};
use muweb_db::repositories::{AdminLogRepo, CharacterRepo, GuildRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::handlers::characters::load_character;
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/logs
///
/// Query the staff audit trail with optional `?actor=` and `?action=`
/// filters. Admin only.
pub async fn list_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AdminLogQuery>,
) -> AppResult<Json<DataResponse<Vec<AdminLog>>>> {
    let logs = AdminLogRepo::query(&state.web_pool, &params).await?;
    Ok(Json(DataResponse::new(logs)))
}

/// PUT /api/admin/characters/{name}
///
/// Direct character edit (level, stats, zen, resets). Admin only.
pub async fn update_character(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    meta: ClientMeta,
    Path(name): Path<String>,
    Json(input): Json<AdminUpdateCharacter>,
) -> AppResult<Json<DataResponse<CharacterResponse>>> {
    // Negative values make no sense for any of these fields.
    let negatives = [
        input.level.map(i64::from),
        input.resets.map(i64::from),
        input.level_up_points.map(i64::from),
        input.strength.map(i64::from),
        input.agility.map(i64::from),
        input.vitality.map(i64::from),
        input.energy.map(i64::from),
        input.zen,
    ];
    if negatives.iter().flatten().any(|&v| v < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Character values must not be negative".into(),
        )));
    }

    let character = load_character(&state, &name).await?;

    let updated = CharacterRepo::admin_update(&state.game_pool, character.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Character", &name)))?;

    audit::record(
        &state,
        admin.account_id,
        "character.admin_update",
        "character",
        &name,
        Some(json!({
            "level": input.level,
            "resets": input.resets,
            "zen": input.zen,
        })),
        meta.ip,
    )
    .await;

    let guild = GuildRepo::resolve_name(&state.game_pool, updated.guild_id).await?;
    Ok(Json(DataResponse::new(updated.to_response(guild))))
}
