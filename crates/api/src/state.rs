use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Game database pool (characters, guilds, accounts).
    pub game_pool: muweb_db::DbPool,
    /// Web database pool (news, bans, wcoin, sessions, setup state).
    pub web_pool: muweb_db::DbPool,
    /// Server configuration.
    pub config: Arc<AppConfig>,
    /// Sticky "setup finished" flag so the install guard stops hitting the
    /// database once installation has been observed.
    pub installed: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(game_pool: muweb_db::DbPool, web_pool: muweb_db::DbPool, config: AppConfig) -> Self {
        Self {
            game_pool,
            web_pool,
            config: Arc::new(config),
            installed: Arc::new(AtomicBool::new(false)),
        }
    }
}
