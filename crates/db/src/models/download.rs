//! Download entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::error::CoreError;
use muweb_core::types::{DbId, Timestamp};

/// Allowed download categories.
pub const DOWNLOAD_CATEGORIES: &[&str] = &["client", "patch", "tool"];

/// Validate a download category string.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if DOWNLOAD_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid download category '{category}'. Must be one of: client, patch, tool"
        )))
    }
}

/// A download row from the `downloads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Download {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub url: String,
    pub version_label: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a download entry.
#[derive(Debug, Deserialize)]
pub struct CreateDownload {
    pub name: String,
    pub category: String,
    pub url: String,
    pub version_label: Option<String>,
    pub file_size_bytes: Option<i64>,
    #[serde(default)]
    pub sort_order: i32,
}

/// DTO for updating a download entry. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateDownload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub url: Option<String>,
    pub version_label: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
