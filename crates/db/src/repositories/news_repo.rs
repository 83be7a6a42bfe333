//! Repository for the `news` table.

use sqlx::MySqlPool;

use muweb_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use muweb_core::types::DbId;

use crate::models::news::{CreateNews, NewsItem, UpdateNews};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, body, author_id, is_published, published_at, created_at, updated_at";

/// Provides CRUD operations for news items.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a news item, returning the created row. Published items get
    /// `published_at` stamped immediately.
    pub async fn create(pool: &MySqlPool, input: &CreateNews) -> Result<NewsItem, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO news (title, body, author_id, is_published, published_at)
             VALUES (?, ?, ?, ?, IF(?, NOW(), NULL))",
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.author_id)
        .bind(input.is_published)
        .bind(input.is_published)
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a news item by ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<NewsItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = ?");
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List news, newest first. `published_only` hides drafts from the
    /// public listing.
    pub async fn list(
        pool: &MySqlPool,
        published_only: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<NewsItem>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);

        let query = if published_only {
            format!(
                "SELECT {COLUMNS} FROM news WHERE is_published = TRUE
                 ORDER BY published_at DESC LIMIT ? OFFSET ?"
            )
        } else {
            format!("SELECT {COLUMNS} FROM news ORDER BY created_at DESC LIMIT ? OFFSET ?")
        };
        sqlx::query_as::<_, NewsItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply an update. Only non-`None` fields are changed; flipping
    /// `is_published` to true stamps `published_at` if unset.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<NewsItem>, sqlx::Error> {
        sqlx::query(
            "UPDATE news SET
                title = COALESCE(?, title),
                body = COALESCE(?, body),
                is_published = COALESCE(?, is_published),
                published_at = IF(COALESCE(?, is_published) AND published_at IS NULL,
                                  NOW(), published_at)
             WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.is_published)
        .bind(input.is_published)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a news item. Returns `true` if a row was removed.
    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
