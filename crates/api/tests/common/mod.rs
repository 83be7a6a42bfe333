//! Shared helpers for API integration tests.
//!
//! `build_test_app` mirrors the production router construction in
//! `muweb_api::router`, so tests exercise the same middleware stack (CORS,
//! request ID, timeout, install guard, panic recovery) that production
//! uses. Rate limiting is disabled except where a test enables it.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::MySqlPool;
use tower::ServiceExt;

use muweb_api::auth::jwt::JwtConfig;
use muweb_api::auth::password::hash_password;
use muweb_api::config::{
    AppConfig, DatabaseConfig, GameConfig, RateLimitConfig, ServerConfig,
};
use muweb_api::router::build_app_router;
use muweb_api::state::AppState;
use muweb_core::reset::ResetPolicy;
use muweb_core::types::DbId;

/// Build a test `AppConfig` with safe defaults: rate limiting off, client
/// binding on, reset policy at the documented defaults.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            game_url: String::new(),
            web_url: String::new(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
            bind_client: true,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            replenish_secs: 2,
            burst: 5,
        },
        game: GameConfig {
            reset: ResetPolicy::default(),
            pk_clear_zen: 5_000_000,
        },
    }
}

/// Build the application router against an installed portal.
pub async fn build_test_app(pool: MySqlPool) -> Router {
    mark_installed(&pool).await;
    build_app_with_config(pool, test_config())
}

/// Build the application router without completing installation, for
/// setup wizard tests.
pub fn build_uninstalled_app(pool: MySqlPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Build the application router with a custom config (e.g. rate limiting
/// enabled). Does NOT touch the setup state.
pub fn build_app_with_config(pool: MySqlPool, config: AppConfig) -> Router {
    let state = AppState::new(pool.clone(), pool, config);
    build_app_router(state)
}

/// Short-circuit the install wizard for tests that are not about it.
pub async fn mark_installed(pool: &MySqlPool) {
    sqlx::query("UPDATE setup_state SET installed = TRUE, current_step = 'finish' WHERE id = 1")
        .execute(pool)
        .await
        .expect("failed to mark portal installed");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().method("GET").uri(uri)).await
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {token}")),
    )
    .await
}

/// Send a JSON request with the given method, optionally authenticated.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Send a bodyless request with the given method, optionally authenticated.
pub async fn send_empty(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send(app: Router, builder: axum::http::request::Builder) -> Response<Body> {
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert an account with an Argon2id-hashed password, returning its id.
pub async fn seed_account(pool: &MySqlPool, username: &str, password: &str, role: &str) -> DbId {
    let hash = hash_password(password).expect("hashing should succeed");
    let result = sqlx::query(
        "INSERT INTO accounts (username, password_hash, email, role)
         VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(&hash)
    .bind(format!("{username}@example.com"))
    .bind(role)
    .execute(pool)
    .await
    .expect("failed to seed account");
    result.last_insert_id() as DbId
}

/// Character fields a test can tune; everything else gets a sane default.
#[derive(Debug, Clone)]
pub struct CharacterSeed {
    pub name: String,
    pub class_code: i32,
    pub level: i32,
    pub resets: i32,
    pub level_up_points: i32,
    pub zen: i64,
    pub pk_level: i32,
    pub pk_kills: i32,
}

impl CharacterSeed {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            class_code: 16, // Dark Knight
            level: 1,
            resets: 0,
            level_up_points: 0,
            zen: 0,
            pk_level: 3,
            pk_kills: 0,
        }
    }
}

/// Insert a character owned by `account_id`, returning its id.
pub async fn seed_character(pool: &MySqlPool, account_id: DbId, seed: &CharacterSeed) -> DbId {
    let result = sqlx::query(
        "INSERT INTO characters
            (account_id, name, class_code, level, resets, level_up_points,
             strength, agility, vitality, energy, zen, pk_level, pk_kills)
         VALUES (?, ?, ?, ?, ?, ?, 25, 20, 20, 10, ?, ?, ?)",
    )
    .bind(account_id)
    .bind(&seed.name)
    .bind(seed.class_code)
    .bind(seed.level)
    .bind(seed.resets)
    .bind(seed.level_up_points)
    .bind(seed.zen)
    .bind(seed.pk_level)
    .bind(seed.pk_kills)
    .execute(pool)
    .await
    .expect("failed to seed character");
    result.last_insert_id() as DbId
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = send_json(
        app.clone(),
        "POST",
        "/api/auth/login",
        None,
        serde_json::json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("login response must contain an access token")
        .to_string()
}

/// Seed an account and log in, returning `(account_id, token)`.
pub async fn seed_and_login(
    pool: &MySqlPool,
    app: &Router,
    username: &str,
    role: &str,
) -> (DbId, String) {
    let id = seed_account(pool, username, "hunter2-hunter2", role).await;
    let token = login(app, username, "hunter2-hunter2").await;
    (id, token)
}
