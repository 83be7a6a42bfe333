//! Integration tests for `/api/admin` (audit trail, character edits) and
//! admin account management under `/api/accounts`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, seed_and_login, seed_character, send_json, CharacterSeed};
use serde_json::json;
use sqlx::MySqlPool;

// ---------------------------------------------------------------------------
// Audit trail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_mutations_land_in_the_audit_trail(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;
    seed_and_login(&pool, &app, "cheater", "player").await;

    send_json(
        app.clone(),
        "POST",
        "/api/bans",
        Some(&admin_token),
        json!({ "scope": "account", "value": "cheater", "reason": "dupe exploit" }),
    )
    .await;

    let response = get_auth(app.clone(), "/api/admin/logs", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entry = &body["data"][0];
    assert_eq!(entry["action"], "ban.create");
    assert_eq!(entry["entity_type"], "ban");
    assert_eq!(entry["details"]["reason"], "dupe exploit");

    // Action filter narrows the result.
    let response = get_auth(app, "/api/admin/logs?action=news.create", &admin_token).await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn audit_trail_requires_admin(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_gm_id, gm_token) = seed_and_login(&pool, &app, "thegm", "game_master").await;

    let response = get_auth(app, "/api/admin/logs", &gm_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Direct character edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_edit_characters_directly(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;
    let (player_id, _player_token) = seed_and_login(&pool, &app, "subject", "player").await;
    seed_character(&pool, player_id, &CharacterSeed::new("Guinea")).await;

    let response = send_json(
        app,
        "PUT",
        "/api/admin/characters/Guinea",
        Some(&admin_token),
        json!({ "level": 350, "zen": 7_000_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["level"], 350);
    assert_eq!(body["data"]["zen"], 7_000_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_character_edit_rejects_negative_values(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;
    let (player_id, _player_token) = seed_and_login(&pool, &app, "subject", "player").await;
    seed_character(&pool, player_id, &CharacterSeed::new("Guinea")).await;

    let response = send_json(
        app,
        "PUT",
        "/api/admin/characters/Guinea",
        Some(&admin_token),
        json!({ "zen": -1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Account management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_searches_and_updates_accounts(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;
    seed_and_login(&pool, &app, "promoted", "player").await;

    // Substring search finds the account.
    let response = get_auth(app.clone(), "/api/accounts?search=promo", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["username"], "promoted");

    // Promote to game master.
    let response = send_json(
        app.clone(),
        "PUT",
        "/api/accounts/promoted",
        Some(&admin_token),
        json!({ "role": "game_master" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "game_master");

    // Bogus role rejected.
    let response = send_json(
        app,
        "PUT",
        "/api/accounts/promoted",
        Some(&admin_token),
        json!({ "role": "superuser" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admins_cannot_demote_themselves(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "PUT",
        "/api/accounts/boss",
        Some(&admin_token),
        json!({ "role": "player" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        app,
        "PUT",
        "/api/accounts/boss",
        Some(&admin_token),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivating_an_account_revokes_its_sessions(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;
    seed_and_login(&pool, &app, "doomed", "player").await;

    let response = send_json(
        app,
        "PUT",
        "/api/accounts/doomed",
        Some(&admin_token),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let open_sessions: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sessions s
         JOIN accounts a ON a.id = s.account_id
         WHERE a.username = 'doomed' AND s.is_revoked = FALSE",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(open_sessions, 0);
}
