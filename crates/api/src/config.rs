//! Consolidated server configuration.
//!
//! The original deployment scattered database and auth settings across
//! three separate backends; everything now loads once at process start
//! into a single [`AppConfig`] injected through [`crate::state::AppState`].

use muweb_core::reset::ResetPolicy;

use crate::auth::jwt::JwtConfig;

/// Top-level configuration, one section per concern.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            game: GameConfig::from_env(),
        }
    }
}

/// HTTP server configuration.
///
/// | Env Var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Database configuration for the two logical databases.
///
/// | Env Var              | Required | Default             |
/// |----------------------|----------|---------------------|
/// | `GAME_DATABASE_URL`  | **yes**  | --                  |
/// | `WEB_DATABASE_URL`   | no       | `GAME_DATABASE_URL` |
/// | `DB_MAX_CONNECTIONS` | no       | `10`                |
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub game_url: String,
    pub web_url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let game_url =
            std::env::var("GAME_DATABASE_URL").expect("GAME_DATABASE_URL must be set");
        let web_url = std::env::var("WEB_DATABASE_URL").unwrap_or_else(|_| game_url.clone());

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            game_url,
            web_url,
            max_connections,
        }
    }
}

/// Rate-limit thresholds applied to the `/api/auth` routes.
///
/// One request token replenishes per `replenish_secs`, with bursts of up
/// to `burst` requests per client IP.
///
/// | Env Var                     | Default |
/// |-----------------------------|---------|
/// | `RATE_LIMIT_ENABLED`        | `true`  |
/// | `RATE_LIMIT_REPLENISH_SECS` | `2`     |
/// | `RATE_LIMIT_BURST`          | `5`     |
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub replenish_secs: u64,
    pub burst: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let replenish_secs: u64 = std::env::var("RATE_LIMIT_REPLENISH_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("RATE_LIMIT_REPLENISH_SECS must be a valid u64");

        let burst: u32 = std::env::var("RATE_LIMIT_BURST")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("RATE_LIMIT_BURST must be a valid u32");

        Self {
            enabled,
            replenish_secs,
            burst,
        }
    }
}

/// Game-mechanic tunables the portal enforces.
///
/// | Env Var                  | Default      |
/// |--------------------------|--------------|
/// | `RESET_LEVEL`            | `400`        |
/// | `RESET_MAX`              | `100`        |
/// | `RESET_POINTS_PER_RESET` | `500`        |
/// | `RESET_ZEN_BASE`         | `10000000`   |
/// | `RESET_ZEN_STEP`         | `5000000`    |
/// | `PK_CLEAR_ZEN`           | `5000000`    |
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub reset: ResetPolicy,
    pub pk_clear_zen: i64,
}

impl GameConfig {
    pub fn from_env() -> Self {
        let defaults = ResetPolicy::default();

        let reset = ResetPolicy {
            required_level: env_or("RESET_LEVEL", defaults.required_level),
            max_resets: env_or("RESET_MAX", defaults.max_resets),
            points_per_reset: env_or("RESET_POINTS_PER_RESET", defaults.points_per_reset),
            zen_base: env_or("RESET_ZEN_BASE", defaults.zen_base),
            zen_step: env_or("RESET_ZEN_STEP", defaults.zen_step),
        };

        Self {
            reset,
            pk_clear_zen: env_or("PK_CLEAR_ZEN", 5_000_000),
        }
    }
}

/// Parse an env var, falling back to `default` when unset.
///
/// Panics on a present-but-unparsable value so misconfiguration fails fast.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T
where
    T::Err: std::fmt::Debug,
{
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid number: {e:?}")),
        Err(_) => default,
    }
}
