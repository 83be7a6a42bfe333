//! News item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::types::{DbId, Timestamp};

/// A news row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsItem {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub author_id: DbId,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a news item.
#[derive(Debug)]
pub struct CreateNews {
    pub title: String,
    pub body: String,
    pub author_id: DbId,
    pub is_published: bool,
}

/// DTO for updating a news item. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_published: Option<bool>,
}
