//! Integration tests for `/api/news`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, seed_and_login, send_empty, send_json};
use serde_json::json;
use sqlx::MySqlPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_creates_and_public_reads_news(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/news",
        Some(&admin_token),
        json!({ "title": "Server opening", "body": "Grand opening this weekend!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Anonymous list sees the published item.
    let response = get(app.clone(), "/api/news").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["title"], "Server opening");

    // Anonymous get works too.
    let response = get(app, &format!("/api/news/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn drafts_are_hidden_from_the_public(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/news",
        Some(&admin_token),
        json!({ "title": "Secret patch", "body": "wip", "is_published": false }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Hidden from the anonymous list.
    let response = get(app.clone(), "/api/news").await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // 404 for anonymous get.
    let response = get(app.clone(), &format!("/api/news/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Staff still see it.
    let response = common::get_auth(app, &format!("/api/news/{id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publishing_a_draft_stamps_published_at(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/news",
        Some(&admin_token),
        json!({ "title": "Patch notes", "body": "wip", "is_published": false }),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert!(created["data"]["published_at"].is_null());

    let response = send_json(
        app,
        "PUT",
        &format!("/api/news/{id}"),
        Some(&admin_token),
        json!({ "is_published": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["data"]["published_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_title_is_rejected(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app,
        "POST",
        "/api/news",
        Some(&admin_token),
        json!({ "title": "   ", "body": "text" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_admins_cannot_write_news(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_id, token) = seed_and_login(&pool, &app, "justme", "player").await;

    let response = send_json(
        app,
        "POST",
        "/api/news",
        Some(&token),
        json!({ "title": "Fake news", "body": "should not land" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_the_item(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/news",
        Some(&admin_token),
        json!({ "title": "Shortlived", "body": "bye" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = send_empty(
        app.clone(),
        "DELETE",
        &format!("/api/news/{id}"),
        Some(&admin_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/news/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
