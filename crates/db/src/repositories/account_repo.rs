//! Repository for the `accounts` table.

use sqlx::MySqlPool;

use muweb_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use muweb_core::types::{DbId, Timestamp};

use crate::models::account::{Account, CreateAccount, UpdateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, email, role, wcoin, is_active, is_online, \
                       last_login_at, last_login_ip, failed_login_count, locked_until, \
                       created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    ///
    /// MySQL has no `RETURNING`, so the row is re-fetched by
    /// `last_insert_id()`.
    pub async fn create(pool: &MySqlPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO accounts (username, password_hash, email, role)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&input.email)
        .bind(&input.role)
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = ?");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by username.
    pub async fn find_by_username(
        pool: &MySqlPool,
        username: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE username = ?");
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email.
    pub async fn find_by_email(
        pool: &MySqlPool,
        email: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = ?");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Paginated account search for the admin lookup screen. When `search`
    /// is non-empty it matches username or email substrings.
    pub async fn search(
        pool: &MySqlPool,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Account>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let pattern = format!("%{}%", search.unwrap_or(""));

        let query = format!(
            "SELECT {COLUMNS} FROM accounts
             WHERE username LIKE ? OR email LIKE ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&pattern)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin update. Only non-`None` fields are changed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET
                email = COALESCE(?, email),
                role = COALESCE(?, role),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&input.email)
        .bind(&input.role)
        .bind(input.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Update an account's password hash. Returns `true` if a row changed.
    pub async fn update_password(
        pool: &MySqlPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update an account's email. Returns `true` if a row changed.
    pub async fn update_email(
        pool: &MySqlPool,
        id: DbId,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET email = ? WHERE id = ?")
            .bind(email)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &MySqlPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE accounts SET failed_login_count = failed_login_count + 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock an account until the specified timestamp.
    pub async fn lock_account(
        pool: &MySqlPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE accounts SET locked_until = ? WHERE id = ?")
            .bind(until)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset the failure counter, clear any lock,
    /// and stamp the login time and source IP.
    pub async fn record_successful_login(
        pool: &MySqlPool,
        id: DbId,
        ip: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW(),
                last_login_ip = ?
             WHERE id = ?",
        )
        .bind(ip)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
