//! Repository for the `bans` table.

use sqlx::MySqlPool;

use muweb_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use muweb_core::types::DbId;

use crate::models::ban::{Ban, CreateBan};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, scope, value, account_id, reason, banned_by, expires_at, \
                       lifted_at, lifted_by, created_at";

/// Condition selecting bans currently in force.
const ACTIVE: &str = "lifted_at IS NULL AND (expires_at IS NULL OR expires_at > NOW())";

/// Provides CRUD operations for ban records.
pub struct BanRepo;

impl BanRepo {
    /// Insert a new ban, returning the created row.
    pub async fn create(pool: &MySqlPool, input: &CreateBan) -> Result<Ban, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO bans (scope, value, account_id, reason, banned_by, expires_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(input.scope.as_str())
        .bind(&input.value)
        .bind(input.account_id)
        .bind(&input.reason)
        .bind(input.banned_by)
        .bind(input.expires_at)
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a ban by ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Ban>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bans WHERE id = ?");
        sqlx::query_as::<_, Ban>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bans, newest first. `active_only` filters to bans in force.
    pub async fn list(
        pool: &MySqlPool,
        active_only: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Ban>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);

        let query = if active_only {
            format!(
                "SELECT {COLUMNS} FROM bans WHERE {ACTIVE}
                 ORDER BY created_at DESC LIMIT ? OFFSET ?"
            )
        } else {
            format!("SELECT {COLUMNS} FROM bans ORDER BY created_at DESC LIMIT ? OFFSET ?")
        };
        sqlx::query_as::<_, Ban>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find the active ban (if any) for an account.
    pub async fn find_active_for_account(
        pool: &MySqlPool,
        account_id: DbId,
    ) -> Result<Option<Ban>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bans
             WHERE scope = 'account' AND account_id = ? AND {ACTIVE}
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Ban>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Lift a ban (soft delete: the row stays for history).
    ///
    /// Returns `false` when the ban does not exist or was already lifted.
    pub async fn lift(pool: &MySqlPool, id: DbId, lifted_by: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bans SET lifted_at = NOW(), lifted_by = ? WHERE id = ? AND lifted_at IS NULL",
        )
        .bind(lifted_by)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
