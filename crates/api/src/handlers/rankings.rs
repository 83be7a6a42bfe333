//! Handlers for the public `/api/rankings` resource.

use axum::extract::{Query, State};
use axum::Json;

use muweb_db::models::ranking::{CharacterRankingRow, GuildRankingRow, OnlineSnapshot};
use muweb_db::repositories::RankingRepo;

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of online character names included in the online snapshot.
const ONLINE_SAMPLE: i64 = 20;

/// GET /api/rankings/resets
pub async fn resets(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CharacterRankingRow>>>> {
    let rows = RankingRepo::by_resets(&state.game_pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/rankings/level
pub async fn level(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CharacterRankingRow>>>> {
    let rows = RankingRepo::by_level(&state.game_pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/rankings/pk
pub async fn pk(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CharacterRankingRow>>>> {
    let rows = RankingRepo::by_pk(&state.game_pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/rankings/guilds
pub async fn guilds(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<GuildRankingRow>>>> {
    let rows = RankingRepo::guilds(&state.game_pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/rankings/online
pub async fn online(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<OnlineSnapshot>>> {
    let snapshot = RankingRepo::online(&state.game_pool, ONLINE_SAMPLE).await?;
    Ok(Json(DataResponse::new(snapshot)))
}
