//! Integration tests for `/api/downloads`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, seed_and_login, send_empty, send_json};
use serde_json::json;
use sqlx::MySqlPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn crud_round_trip(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    // Create.
    let response = send_json(
        app.clone(),
        "POST",
        "/api/downloads",
        Some(&admin_token),
        json!({
            "name": "Full client",
            "category": "client",
            "url": "https://cdn.example.com/client.zip",
            "version_label": "1.04d",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Public list shows it.
    let response = get(app.clone(), "/api/downloads").await;
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Full client");

    // Update.
    let response = send_json(
        app.clone(),
        "PUT",
        &format!("/api/downloads/{id}"),
        Some(&admin_token),
        json!({ "version_label": "1.05a" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["version_label"], "1.05a");

    // Delete.
    let response = send_empty(
        app.clone(),
        "DELETE",
        &format!("/api/downloads/{id}"),
        Some(&admin_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, "/api/downloads").await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_category_is_rejected(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app,
        "POST",
        "/api/downloads",
        Some(&admin_token),
        json!({ "name": "Weird", "category": "warez", "url": "https://example.com/x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inactive_entries_hidden_from_public(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/downloads",
        Some(&admin_token),
        json!({ "name": "Old patch", "category": "patch", "url": "https://example.com/old.zip" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    send_json(
        app.clone(),
        "PUT",
        &format!("/api/downloads/{id}"),
        Some(&admin_token),
        json!({ "is_active": false }),
    )
    .await;

    // Hidden from anonymous callers, visible to staff.
    let response = get(app.clone(), "/api/downloads").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);

    let response = common::get_auth(app, "/api/downloads", &admin_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_http_url_is_rejected(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app,
        "POST",
        "/api/downloads",
        Some(&admin_token),
        json!({ "name": "Sketchy", "category": "tool", "url": "ftp://example.com/x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
