//! Ban record model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::error::CoreError;
use muweb_core::types::{DbId, Timestamp};

/// What a ban record targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BanScope {
    Account,
    Ip,
    Mac,
}

impl BanScope {
    /// Parse a scope string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "account" => Ok(Self::Account),
            "ip" => Ok(Self::Ip),
            "mac" => Ok(Self::Mac),
            _ => Err(CoreError::Validation(format!(
                "Invalid ban scope '{s}'. Must be one of: account, ip, mac"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Ip => "ip",
            Self::Mac => "mac",
        }
    }
}

/// A ban row from the `bans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ban {
    pub id: DbId,
    pub scope: String,
    pub value: String,
    pub account_id: Option<DbId>,
    pub reason: String,
    pub banned_by: DbId,
    pub expires_at: Option<Timestamp>,
    pub lifted_at: Option<Timestamp>,
    pub lifted_by: Option<DbId>,
    pub created_at: Timestamp,
}

impl Ban {
    /// Whether the ban is in force at `now`: not lifted and not expired.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.lifted_at.is_none() && self.expires_at.map_or(true, |exp| exp > now)
    }
}

/// DTO for creating a new ban.
#[derive(Debug)]
pub struct CreateBan {
    pub scope: BanScope,
    pub value: String,
    pub account_id: Option<DbId>,
    pub reason: String,
    pub banned_by: DbId,
    pub expires_at: Option<Timestamp>,
}
