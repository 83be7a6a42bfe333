//! Account entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::types::{DbId, Timestamp};

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
    pub wcoin: i64,
    pub is_active: bool,
    pub is_online: bool,
    pub last_login_at: Option<Timestamp>,
    pub last_login_ip: Option<String>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub wcoin: i64,
    pub is_active: bool,
    pub is_online: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            username: a.username.clone(),
            email: a.email.clone(),
            role: a.role.clone(),
            wcoin: a.wcoin,
            is_active: a.is_active,
            is_online: a.is_online,
            last_login_at: a.last_login_at,
            created_at: a.created_at,
        }
    }
}

/// DTO for creating a new account.
#[derive(Debug)]
pub struct CreateAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

/// DTO for an admin account update. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateAccount {
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}
