//! Handlers for the `/api/characters` resource: listing, stat point
//! distribution, resets, and PK clears.
//!
//! The game server owns live character state, so every mutation requires
//! the owning account to be offline. Rule checks run twice: once here for
//! friendly error messages, and once inside the repository's guarded
//! UPDATE so concurrent changes cannot overdraw points or zen.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muweb_core::error::CoreError;
use muweb_core::reset::{check_pk_clear, PointDistribution};
use muweb_core::roles::is_staff;
use muweb_db::models::character::{Character, CharacterCard, CharacterResponse};
use muweb_db::repositories::{AccountRepo, CharacterRepo, GuildRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /api/characters/{name}/points`.
#[derive(Debug, Deserialize)]
pub struct DistributePointsRequest {
    #[serde(default)]
    pub strength: i32,
    #[serde(default)]
    pub agility: i32,
    #[serde(default)]
    pub vitality: i32,
    #[serde(default)]
    pub energy: i32,
}

/// Response body for a successful reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub resets: i32,
    pub zen_charged: i64,
    pub points_granted: i32,
}

/// Either the full view (owner/staff) or the public card.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CharacterView {
    Full(CharacterResponse),
    Card(CharacterCard),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/characters
///
/// All characters on the caller's account, full view.
pub async fn list_own(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CharacterResponse>>>> {
    let characters = CharacterRepo::list_by_account(&state.game_pool, user.account_id).await?;

    let mut responses = Vec::with_capacity(characters.len());
    for ch in &characters {
        let guild = GuildRepo::resolve_name(&state.game_pool, ch.guild_id).await?;
        responses.push(ch.to_response(guild));
    }

    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/characters/{name}
///
/// Character lookup. The owner and staff get the full view; everyone else
/// gets the public card.
pub async fn get(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<CharacterView>>> {
    let character = load_character(&state, &name).await?;
    let guild = GuildRepo::resolve_name(&state.game_pool, character.guild_id).await?;

    let full_view = user
        .as_ref()
        .is_some_and(|u| u.account_id == character.account_id || is_staff(&u.role));

    let view = if full_view {
        CharacterView::Full(character.to_response(guild))
    } else {
        CharacterView::Card(character.to_card(guild))
    };

    Ok(Json(DataResponse::new(view)))
}

/// PUT /api/characters/{name}/points
///
/// Distribute unspent level-up points into stats. Negative values and
/// overspends are rejected with 400.
pub async fn distribute_points(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    Json(input): Json<DistributePointsRequest>,
) -> AppResult<Json<DataResponse<CharacterResponse>>> {
    let character = load_owned_character(&state, &user, &name).await?;
    ensure_offline(&state, &character).await?;

    let dist = PointDistribution {
        strength: input.strength,
        agility: input.agility,
        vitality: input.vitality,
        energy: input.energy,
    };
    dist.check(character.level_up_points)?;

    let applied = CharacterRepo::distribute_points(&state.game_pool, character.id, &dist).await?;
    if !applied {
        return Err(AppError::Core(CoreError::Conflict(
            "Character changed while processing, try again".into(),
        )));
    }

    let updated = load_character(&state, &name).await?;
    let guild = GuildRepo::resolve_name(&state.game_pool, updated.guild_id).await?;
    Ok(Json(DataResponse::new(updated.to_response(guild))))
}

/// POST /api/characters/{name}/reset
///
/// Perform a reset: level back to 1, reset counter up, zen charged, stat
/// points granted.
pub async fn reset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<ResetResponse>>> {
    let character = load_owned_character(&state, &user, &name).await?;
    ensure_offline(&state, &character).await?;

    let policy = &state.config.game.reset;
    let cost = policy.check(character.level, character.resets, character.zen)?;

    let applied = CharacterRepo::apply_reset(
        &state.game_pool,
        character.id,
        policy.required_level,
        policy.max_resets,
        cost,
        policy.point_grant(),
    )
    .await?;
    if !applied {
        return Err(AppError::Core(CoreError::Conflict(
            "Character changed while processing, try again".into(),
        )));
    }

    tracing::info!(character = %name, resets = character.resets + 1, "Character reset");

    Ok(Json(DataResponse::new(ResetResponse {
        resets: character.resets + 1,
        zen_charged: cost,
        points_granted: policy.point_grant(),
    })))
}

/// POST /api/characters/{name}/pk-clear
///
/// Clear PK status for a zen fee.
pub async fn pk_clear(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let character = load_owned_character(&state, &user, &name).await?;
    ensure_offline(&state, &character).await?;

    let fee = state.config.game.pk_clear_zen;
    check_pk_clear(character.pk_level, character.pk_kills, character.zen, fee)?;

    let applied = CharacterRepo::clear_pk(&state.game_pool, character.id, fee).await?;
    if !applied {
        return Err(AppError::Core(CoreError::Conflict(
            "Character changed while processing, try again".into(),
        )));
    }

    Ok(Json(DataResponse::new(json!({ "zen_charged": fee }))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn load_character(state: &AppState, name: &str) -> AppResult<Character> {
    CharacterRepo::find_by_name(&state.game_pool, name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Character", name)))
}

/// Load a character and verify the caller owns it.
async fn load_owned_character(
    state: &AppState,
    user: &AuthUser,
    name: &str,
) -> AppResult<Character> {
    let character = load_character(state, name).await?;
    if character.account_id != user.account_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Character belongs to another account".into(),
        )));
    }
    Ok(character)
}

/// Reject mutations while the owning account is in game.
async fn ensure_offline(state: &AppState, character: &Character) -> AppResult<()> {
    let account = AccountRepo::find_by_id(&state.game_pool, character.account_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Account", character.account_id)))?;

    if account.is_online {
        return Err(AppError::Core(CoreError::Conflict(
            "Character is online. Log out of the game first.".into(),
        )));
    }
    Ok(())
}
