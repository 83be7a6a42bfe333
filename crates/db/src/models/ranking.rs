//! Ranking row types: public projections over game tables.
//!
//! Ranking rows never expose stat internals or zen, only the fields the
//! public rankings pages show.

use serde::Serialize;
use sqlx::FromRow;

use muweb_core::types::DbId;

/// A character row in the resets / level / PK rankings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterRankingRow {
    pub rank: i64,
    pub name: String,
    pub class_code: i32,
    pub level: i32,
    pub resets: i32,
    pub pk_kills: i32,
    pub guild_name: Option<String>,
}

/// A guild row in the guild rankings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GuildRankingRow {
    pub rank: i64,
    pub id: DbId,
    pub name: String,
    pub master_name: String,
    pub score: i32,
    pub member_count: i64,
}

/// Snapshot of who is online right now.
#[derive(Debug, Clone, Serialize)]
pub struct OnlineSnapshot {
    pub online_count: i64,
    pub sample: Vec<String>,
}
