//! Repository for the single-row `setup_state` table.

use sqlx::MySqlPool;

use muweb_core::setup::SetupStep;

use crate::models::setup::SetupState;

/// Provides read/advance operations for the installation wizard state.
pub struct SetupRepo;

impl SetupRepo {
    /// Read the wizard state row.
    pub async fn get(pool: &MySqlPool) -> Result<SetupState, sqlx::Error> {
        sqlx::query_as::<_, SetupState>(
            "SELECT installed, current_step, completed_at, updated_at FROM setup_state WHERE id = 1",
        )
        .fetch_one(pool)
        .await
    }

    /// Move the wizard to the given step.
    pub async fn set_step(pool: &MySqlPool, step: SetupStep) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE setup_state SET current_step = ? WHERE id = 1")
            .bind(step.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark the portal installed. Returns `false` when it already was
    /// (guards against double completion).
    pub async fn mark_installed(pool: &MySqlPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE setup_state SET installed = TRUE, completed_at = NOW()
             WHERE id = 1 AND installed = FALSE",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
