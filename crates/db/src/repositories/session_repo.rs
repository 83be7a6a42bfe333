//! Repository for the `sessions` table.

use sqlx::MySqlPool;

use muweb_core::types::DbId;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, refresh_token_hash, expires_at, is_revoked, \
                       user_agent, ip_address, created_at";

/// Provides CRUD operations for refresh-token sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning its ID.
    pub async fn create(pool: &MySqlPool, input: &CreateSession) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO sessions (account_id, refresh_token_hash, expires_at, user_agent, ip_address)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.account_id)
        .bind(&input.refresh_token_hash)
        .bind(input.expires_at)
        .bind(&input.user_agent)
        .bind(&input.ip_address)
        .execute(pool)
        .await?;
        Ok(result.last_insert_id() as DbId)
    }

    /// Find an active (unrevoked, unexpired) session by refresh token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &MySqlPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = ? AND is_revoked = FALSE AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session.
    pub async fn revoke(pool: &MySqlPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET is_revoked = TRUE WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke every session belonging to an account (logout, ban, password
    /// change).
    pub async fn revoke_all_for_account(
        pool: &MySqlPool,
        account_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET is_revoked = TRUE WHERE account_id = ? AND is_revoked = FALSE",
        )
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
