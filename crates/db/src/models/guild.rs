//! Guild entity model.

use serde::Serialize;
use sqlx::FromRow;

use muweb_core::types::{DbId, Timestamp};

/// Guild row from the `guilds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Guild {
    pub id: DbId,
    pub name: String,
    pub master_name: String,
    pub score: i32,
    pub notice: Option<String>,
    pub created_at: Timestamp,
}
