//! Integration tests for the `/api/setup` installation wizard and the
//! install guard.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, send_empty, send_json};
use serde_json::json;
use sqlx::MySqlPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn uninstalled_portal_blocks_api_routes(pool: MySqlPool) {
    let app = common::build_uninstalled_app(pool);

    // Regular API routes are 503 until installation completes.
    let response = get(app.clone(), "/api/news").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_INSTALLED");

    // Health and setup stay reachable.
    let response = get(app.clone(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/setup/status").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wizard_walks_through_all_steps(pool: MySqlPool) {
    let app = common::build_uninstalled_app(pool.clone());

    // Fresh install starts at the database step.
    let response = get(app.clone(), "/api/setup/status").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["installed"], false);
    assert_eq!(body["data"]["current_step"], "database");

    // Completing out of order is rejected.
    let response = send_empty(app.clone(), "POST", "/api/setup/complete", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Database check advances to the admin step.
    let response = send_empty(app.clone(), "POST", "/api/setup/database", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["current_step"], "admin_account");

    // Create the first admin.
    let response = send_json(
        app.clone(),
        "POST",
        "/api/setup/admin",
        None,
        json!({ "username": "sysop", "password": "super-secret-1", "email": "sysop@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["role"], "admin");

    // Finish.
    let response = send_empty(app.clone(), "POST", "/api/setup/complete", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // API routes open up, and the admin can log in.
    let response = get(app.clone(), "/api/news").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = common::login(&app, "sysop", "super-secret-1").await;
    assert!(!token.is_empty());

    // Setup mutations now conflict.
    let response = send_empty(app, "POST", "/api/setup/complete", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn setup_admin_validates_input(pool: MySqlPool) {
    let app = common::build_uninstalled_app(pool);
    send_empty(app.clone(), "POST", "/api/setup/database", None).await;

    // Weak password.
    let response = send_json(
        app.clone(),
        "POST",
        "/api/setup/admin",
        None,
        json!({ "username": "sysop", "password": "short", "email": "sysop@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Bad username.
    let response = send_json(
        app,
        "POST",
        "/api/setup/admin",
        None,
        json!({ "username": "x", "password": "super-secret-1", "email": "sysop@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn setup_mutations_conflict_after_install(pool: MySqlPool) {
    let app = common::build_test_app(pool).await;

    let response = send_empty(app.clone(), "POST", "/api/setup/database", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send_json(
        app,
        "POST",
        "/api/setup/admin",
        None,
        json!({ "username": "sysop", "password": "super-secret-1", "email": "sysop@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
