//! Helper for recording staff actions in the admin audit trail.

use muweb_core::types::DbId;
use muweb_db::models::admin_log::CreateAdminLog;
use muweb_db::repositories::AdminLogRepo;

use crate::state::AppState;

/// Record a staff action in `admin_logs`.
///
/// Audit failures never roll back the mutation they describe; they are
/// logged at error level instead.
pub async fn record(
    state: &AppState,
    actor_id: DbId,
    action: &str,
    entity_type: &str,
    entity_key: impl ToString,
    details: Option<serde_json::Value>,
    ip: Option<String>,
) {
    let entry = CreateAdminLog {
        actor_id,
        action: action.to_string(),
        entity_type: Some(entity_type.to_string()),
        entity_key: Some(entity_key.to_string()),
        details,
        ip_address: ip,
    };

    if let Err(e) = AdminLogRepo::create(&state.web_pool, &entry).await {
        tracing::error!(error = %e, action, "Failed to write admin log entry");
    }
}
