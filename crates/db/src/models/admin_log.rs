//! Admin audit log model and DTOs.
//!
//! Admin logs are append-only; there are no update or delete paths.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::types::{DbId, Timestamp};

/// An audit row from the `admin_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLog {
    pub id: DbId,
    pub actor_id: DbId,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_key: Option<String>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAdminLog {
    pub actor_id: DbId,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_key: Option<String>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

/// Filter parameters for querying admin logs.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLogQuery {
    pub actor: Option<DbId>,
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
