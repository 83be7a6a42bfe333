//! Repository for the `admin_logs` table (append-only).

use sqlx::MySqlPool;

use muweb_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use muweb_core::types::DbId;

use crate::models::admin_log::{AdminLog, AdminLogQuery, CreateAdminLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, actor_id, action, entity_type, entity_key, details, ip_address, created_at";

/// Provides insert and query operations for the staff audit trail.
pub struct AdminLogRepo;

impl AdminLogRepo {
    /// Insert an audit entry, returning its ID.
    pub async fn create(pool: &MySqlPool, input: &CreateAdminLog) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO admin_logs (actor_id, action, entity_type, entity_key, details, ip_address)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(input.actor_id)
        .bind(&input.action)
        .bind(&input.entity_type)
        .bind(&input.entity_key)
        .bind(&input.details)
        .bind(&input.ip_address)
        .execute(pool)
        .await?;
        Ok(result.last_insert_id() as DbId)
    }

    /// Query the audit trail with optional actor/action filters, newest
    /// first.
    pub async fn query(
        pool: &MySqlPool,
        params: &AdminLogQuery,
    ) -> Result<Vec<AdminLog>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM admin_logs
             WHERE (? IS NULL OR actor_id = ?)
               AND (? IS NULL OR action = ?)
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, AdminLog>(&query)
            .bind(params.actor)
            .bind(params.actor)
            .bind(&params.action)
            .bind(&params.action)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
