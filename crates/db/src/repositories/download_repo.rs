//! Repository for the `downloads` table.

use sqlx::MySqlPool;

use muweb_core::types::DbId;

use crate::models::download::{CreateDownload, Download, UpdateDownload};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, url, version_label, file_size_bytes, \
                       sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for download entries.
pub struct DownloadRepo;

impl DownloadRepo {
    /// Insert a download entry, returning the created row.
    pub async fn create(pool: &MySqlPool, input: &CreateDownload) -> Result<Download, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO downloads (name, category, url, version_label, file_size_bytes, sort_order)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.url)
        .bind(&input.version_label)
        .bind(input.file_size_bytes)
        .bind(input.sort_order)
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a download entry by ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Download>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM downloads WHERE id = ?");
        sqlx::query_as::<_, Download>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List download entries by configured order. `active_only` hides
    /// disabled entries from the public listing.
    pub async fn list(pool: &MySqlPool, active_only: bool) -> Result<Vec<Download>, sqlx::Error> {
        let query = if active_only {
            format!(
                "SELECT {COLUMNS} FROM downloads WHERE is_active = TRUE
                 ORDER BY sort_order ASC, name ASC"
            )
        } else {
            format!("SELECT {COLUMNS} FROM downloads ORDER BY sort_order ASC, name ASC")
        };
        sqlx::query_as::<_, Download>(&query).fetch_all(pool).await
    }

    /// Apply an update. Only non-`None` fields are changed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateDownload,
    ) -> Result<Option<Download>, sqlx::Error> {
        sqlx::query(
            "UPDATE downloads SET
                name = COALESCE(?, name),
                category = COALESCE(?, category),
                url = COALESCE(?, url),
                version_label = COALESCE(?, version_label),
                file_size_bytes = COALESCE(?, file_size_bytes),
                sort_order = COALESCE(?, sort_order),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.url)
        .bind(&input.version_label)
        .bind(input.file_size_bytes)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a download entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM downloads WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
