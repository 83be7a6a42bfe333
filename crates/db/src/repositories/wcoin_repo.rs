//! Repository for the `wcoin_packages` table and the wcoin ledger.

use sqlx::MySqlPool;

use muweb_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use muweb_core::types::DbId;

use crate::models::wcoin::{
    CreateWcoinPackage, UpdateWcoinPackage, WcoinLedgerEntry, WcoinPackage,
};

/// Column list for `wcoin_packages` SELECT queries.
const PACKAGE_COLUMNS: &str = "id, name, coins, bonus_coins, price_label, payment_url, \
                               sort_order, is_active, created_at, updated_at";

/// Column list for `wcoin_ledger` SELECT queries.
const LEDGER_COLUMNS: &str =
    "id, account_id, amount, balance_after, reason, package_id, actor_id, created_at";

/// Provides package CRUD and atomic balance adjustments.
pub struct WcoinRepo;

impl WcoinRepo {
    // -- Packages -----------------------------------------------------------

    /// Insert a shop package, returning the created row.
    pub async fn create_package(
        pool: &MySqlPool,
        input: &CreateWcoinPackage,
    ) -> Result<WcoinPackage, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO wcoin_packages (name, coins, bonus_coins, price_label, payment_url, sort_order)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(input.coins)
        .bind(input.bonus_coins)
        .bind(&input.price_label)
        .bind(&input.payment_url)
        .bind(input.sort_order)
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_package(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a shop package by ID.
    pub async fn find_package(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<WcoinPackage>, sqlx::Error> {
        let query = format!("SELECT {PACKAGE_COLUMNS} FROM wcoin_packages WHERE id = ?");
        sqlx::query_as::<_, WcoinPackage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List packages by configured order. `active_only` hides disabled
    /// packages from the public shop.
    pub async fn list_packages(
        pool: &MySqlPool,
        active_only: bool,
    ) -> Result<Vec<WcoinPackage>, sqlx::Error> {
        let query = if active_only {
            format!(
                "SELECT {PACKAGE_COLUMNS} FROM wcoin_packages WHERE is_active = TRUE
                 ORDER BY sort_order ASC, coins ASC"
            )
        } else {
            format!(
                "SELECT {PACKAGE_COLUMNS} FROM wcoin_packages ORDER BY sort_order ASC, coins ASC"
            )
        };
        sqlx::query_as::<_, WcoinPackage>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a package update. Only non-`None` fields are changed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_package(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateWcoinPackage,
    ) -> Result<Option<WcoinPackage>, sqlx::Error> {
        sqlx::query(
            "UPDATE wcoin_packages SET
                name = COALESCE(?, name),
                coins = COALESCE(?, coins),
                bonus_coins = COALESCE(?, bonus_coins),
                price_label = COALESCE(?, price_label),
                payment_url = COALESCE(?, payment_url),
                sort_order = COALESCE(?, sort_order),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(input.coins)
        .bind(input.bonus_coins)
        .bind(&input.price_label)
        .bind(&input.payment_url)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_package(pool, id).await
    }

    /// Delete a shop package. Returns `true` if a row was removed.
    pub async fn delete_package(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wcoin_packages WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Balance / ledger ---------------------------------------------------

    /// Atomically adjust an account's wcoin balance and record the movement
    /// in the ledger. A debit that would take the balance negative fails
    /// the guard and returns `Ok(None)` without writing anything.
    ///
    /// Both statements run in one transaction, so this must be called with
    /// the pool that owns the `accounts` table (the game pool).
    ///
    /// Returns the new balance on success.
    pub async fn adjust_balance(
        pool: &MySqlPool,
        account_id: DbId,
        amount: i64,
        reason: &str,
        package_id: Option<DbId>,
        actor_id: Option<DbId>,
    ) -> Result<Option<i64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE accounts SET wcoin = wcoin + ? WHERE id = ? AND wcoin + ? >= 0",
        )
        .bind(amount)
        .bind(account_id)
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let balance: i64 = sqlx::query_scalar("SELECT wcoin FROM accounts WHERE id = ?")
            .bind(account_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO wcoin_ledger (account_id, amount, balance_after, reason, package_id, actor_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(account_id)
        .bind(amount)
        .bind(balance)
        .bind(reason)
        .bind(package_id)
        .bind(actor_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(balance))
    }

    /// List an account's ledger entries, newest first.
    pub async fn list_ledger(
        pool: &MySqlPool,
        account_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<WcoinLedgerEntry>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {LEDGER_COLUMNS} FROM wcoin_ledger
             WHERE account_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, WcoinLedgerEntry>(&query)
            .bind(account_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
