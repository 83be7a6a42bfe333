//! Installation wizard steps and status.
//!
//! First-run configuration is driven through the `/api/setup` endpoints.
//! Progress is persisted in the web database so an interrupted install
//! resumes where it left off.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Setup steps
// ---------------------------------------------------------------------------

/// The ordered steps of the installation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    /// Verify database connectivity and apply migrations.
    Database,
    /// Create the first admin account.
    AdminAccount,
    /// Final confirmation; marks the portal installed.
    Finish,
}

impl SetupStep {
    /// Parse a step string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "database" => Ok(Self::Database),
            "admin_account" => Ok(Self::AdminAccount),
            "finish" => Ok(Self::Finish),
            _ => Err(CoreError::Validation(format!(
                "Invalid setup step '{s}'. Must be one of: database, admin_account, finish"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::AdminAccount => "admin_account",
            Self::Finish => "finish",
        }
    }

    /// The step following this one, or `None` after the last step.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Database => Some(Self::AdminAccount),
            Self::AdminAccount => Some(Self::Finish),
            Self::Finish => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_round_trips_through_db_string() {
        for step in [SetupStep::Database, SetupStep::AdminAccount, SetupStep::Finish] {
            assert_eq!(SetupStep::from_str_db(step.as_str()).unwrap(), step);
        }
    }

    #[test]
    fn unknown_step_rejected() {
        assert!(SetupStep::from_str_db("welcome").is_err());
    }

    #[test]
    fn steps_advance_in_order() {
        assert_eq!(SetupStep::Database.next(), Some(SetupStep::AdminAccount));
        assert_eq!(SetupStep::AdminAccount.next(), Some(SetupStep::Finish));
        assert_eq!(SetupStep::Finish.next(), None);
    }
}
