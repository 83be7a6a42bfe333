//! Installation wizard state model.

use serde::Serialize;
use sqlx::FromRow;

use muweb_core::types::Timestamp;

/// The single `setup_state` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SetupState {
    pub installed: bool,
    pub current_step: String,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}
