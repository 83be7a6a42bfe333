//! Repository for the `guilds` table (read-only; guilds are created by the
//! game server).

use sqlx::MySqlPool;

use muweb_core::types::DbId;

use crate::models::guild::Guild;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, master_name, score, notice, created_at";

/// Provides read operations for guilds.
pub struct GuildRepo;

impl GuildRepo {
    /// Find a guild by ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Guild>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guilds WHERE id = ?");
        sqlx::query_as::<_, Guild>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a guild name by ID, for character views.
    pub async fn resolve_name(
        pool: &MySqlPool,
        id: Option<DbId>,
    ) -> Result<Option<String>, sqlx::Error> {
        let Some(id) = id else {
            return Ok(None);
        };
        sqlx::query_scalar("SELECT name FROM guilds WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
