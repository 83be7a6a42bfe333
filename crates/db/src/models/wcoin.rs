//! WCoin shop package and ledger models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::types::{DbId, Timestamp};

/// A shop package row from the `wcoin_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WcoinPackage {
    pub id: DbId,
    pub name: String,
    pub coins: i64,
    pub bonus_coins: i64,
    pub price_label: String,
    pub payment_url: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a shop package.
#[derive(Debug, Deserialize)]
pub struct CreateWcoinPackage {
    pub name: String,
    pub coins: i64,
    #[serde(default)]
    pub bonus_coins: i64,
    pub price_label: String,
    pub payment_url: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// DTO for updating a shop package. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateWcoinPackage {
    pub name: Option<String>,
    pub coins: Option<i64>,
    pub bonus_coins: Option<i64>,
    pub price_label: Option<String>,
    pub payment_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A ledger row from the `wcoin_ledger` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WcoinLedgerEntry {
    pub id: DbId,
    pub account_id: DbId,
    pub amount: i64,
    pub balance_after: i64,
    pub reason: String,
    pub package_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub created_at: Timestamp,
}
