//! Repository for the `characters` table.
//!
//! Mutations that game rules gate (point distribution, resets, PK clear)
//! use guarded UPDATEs: the WHERE clause re-checks the precondition so a
//! concurrent change between read and write cannot overdraw points or zen.

use sqlx::MySqlPool;

use muweb_core::reset::PointDistribution;
use muweb_core::types::DbId;

use crate::models::character::{AdminUpdateCharacter, Character};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, name, class_code, level, experience, resets, \
                       level_up_points, strength, agility, vitality, energy, zen, \
                       pk_level, pk_kills, guild_id, created_at, updated_at";

/// Provides read and rule-gated write operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Find a character by name.
    pub async fn find_by_name(
        pool: &MySqlPool,
        name: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE name = ?");
        sqlx::query_as::<_, Character>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all characters belonging to an account, oldest first.
    pub async fn list_by_account(
        pool: &MySqlPool,
        account_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM characters WHERE account_id = ? ORDER BY id ASC");
        sqlx::query_as::<_, Character>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// List character names for an account (profile summaries).
    pub async fn list_names_by_account(
        pool: &MySqlPool,
        account_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM characters WHERE account_id = ? ORDER BY id")
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Spend unspent level-up points on stats. The guard re-checks the
    /// available points, so a stale read cannot overdraw.
    ///
    /// Returns `false` when the guard failed (points no longer available).
    pub async fn distribute_points(
        pool: &MySqlPool,
        id: DbId,
        dist: &PointDistribution,
    ) -> Result<bool, sqlx::Error> {
        let total = dist.total();
        let result = sqlx::query(
            "UPDATE characters SET
                strength = strength + ?,
                agility = agility + ?,
                vitality = vitality + ?,
                energy = energy + ?,
                level_up_points = level_up_points - ?
             WHERE id = ? AND level_up_points >= ?",
        )
        .bind(dist.strength)
        .bind(dist.agility)
        .bind(dist.vitality)
        .bind(dist.energy)
        .bind(total)
        .bind(id)
        .bind(total)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Perform a reset: level to 1, experience wiped, reset counter up,
    /// zen charged, stat points granted. The guard re-checks level, reset
    /// cap, and zen.
    ///
    /// Returns `false` when the guard failed (character changed since read).
    pub async fn apply_reset(
        pool: &MySqlPool,
        id: DbId,
        required_level: i32,
        max_resets: i32,
        zen_cost: i64,
        point_grant: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE characters SET
                level = 1,
                experience = 0,
                resets = resets + 1,
                zen = zen - ?,
                level_up_points = level_up_points + ?
             WHERE id = ? AND level >= ? AND resets < ? AND zen >= ?",
        )
        .bind(zen_cost)
        .bind(point_grant)
        .bind(id)
        .bind(required_level)
        .bind(max_resets)
        .bind(zen_cost)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear PK status for a zen fee. The guard re-checks the zen balance.
    pub async fn clear_pk(pool: &MySqlPool, id: DbId, fee: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE characters SET
                pk_level = 3,
                pk_kills = 0,
                zen = zen - ?
             WHERE id = ? AND zen >= ?",
        )
        .bind(fee)
        .bind(id)
        .bind(fee)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply an admin edit. Only non-`None` fields are changed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn admin_update(
        pool: &MySqlPool,
        id: DbId,
        input: &AdminUpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        sqlx::query(
            "UPDATE characters SET
                level = COALESCE(?, level),
                resets = COALESCE(?, resets),
                level_up_points = COALESCE(?, level_up_points),
                strength = COALESCE(?, strength),
                agility = COALESCE(?, agility),
                vitality = COALESCE(?, vitality),
                energy = COALESCE(?, energy),
                zen = COALESCE(?, zen)
             WHERE id = ?",
        )
        .bind(input.level)
        .bind(input.resets)
        .bind(input.level_up_points)
        .bind(input.strength)
        .bind(input.agility)
        .bind(input.vitality)
        .bind(input.energy)
        .bind(input.zen)
        .bind(id)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = ?");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
