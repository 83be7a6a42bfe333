//! Integration tests for `/api/wcoin` and staff credit/debit.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, seed_and_login, send_json};
use serde_json::json;
use sqlx::MySqlPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn package_crud_and_public_listing(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/wcoin/packages",
        Some(&admin_token),
        json!({
            "name": "Starter pack",
            "coins": 1000,
            "bonus_coins": 100,
            "price_label": "5 EUR",
            "payment_url": "https://pay.example.com/starter",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Public listing shows active packages.
    let response = get(app.clone(), "/api/wcoin/packages").await;
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Starter pack");
    assert_eq!(body["data"][0]["coins"], 1000);

    // Deactivate; gone from the public shop.
    let response = send_json(
        app.clone(),
        "PUT",
        &format!("/api/wcoin/packages/{id}"),
        Some(&admin_token),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/wcoin/packages").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn package_must_grant_positive_coins(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_admin_id, admin_token) = seed_and_login(&pool, &app, "boss", "admin").await;

    let response = send_json(
        app,
        "POST",
        "/api/wcoin/packages",
        Some(&admin_token),
        json!({
            "name": "Scam pack",
            "coins": 0,
            "price_label": "5 EUR",
            "payment_url": "https://pay.example.com/scam",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_credit_updates_balance_and_ledger(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_gm_id, gm_token) = seed_and_login(&pool, &app, "thegm", "game_master").await;
    let (_player_id, player_token) = seed_and_login(&pool, &app, "buyer", "player").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/accounts/buyer/wcoin",
        Some(&gm_token),
        json!({ "amount": 1500, "reason": "paypal order #4411" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["balance"], 1500);

    // The player sees the new balance and the ledger entry.
    let response = get_auth(app.clone(), "/api/wcoin/balance", &player_token).await;
    assert_eq!(body_json(response).await["data"]["balance"], 1500);

    let response = get_auth(app, "/api/wcoin/history", &player_token).await;
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["amount"], 1500);
    assert_eq!(body["data"][0]["balance_after"], 1500);
    assert_eq!(body["data"][0]["reason"], "paypal order #4411");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn debit_cannot_take_balance_negative(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_gm_id, gm_token) = seed_and_login(&pool, &app, "thegm", "game_master").await;
    seed_and_login(&pool, &app, "poorguy", "player").await;

    send_json(
        app.clone(),
        "POST",
        "/api/accounts/poorguy/wcoin",
        Some(&gm_token),
        json!({ "amount": 100, "reason": "starter credit" }),
    )
    .await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/accounts/poorguy/wcoin",
        Some(&gm_token),
        json!({ "amount": -500, "reason": "chargeback" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Balance unchanged, no ledger entry for the failed debit.
    let balance: i64 =
        sqlx::query_scalar("SELECT wcoin FROM accounts WHERE username = 'poorguy'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(balance, 100);

    let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wcoin_ledger")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(entries, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn zero_amount_is_rejected(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_gm_id, gm_token) = seed_and_login(&pool, &app, "thegm", "game_master").await;
    seed_and_login(&pool, &app, "buyer", "player").await;

    let response = send_json(
        app,
        "POST",
        "/api/accounts/buyer/wcoin",
        Some(&gm_token),
        json!({ "amount": 0, "reason": "noop" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn players_cannot_credit_themselves(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_id, token) = seed_and_login(&pool, &app, "greedy", "player").await;

    let response = send_json(
        app,
        "POST",
        "/api/accounts/greedy/wcoin",
        Some(&token),
        json!({ "amount": 99999, "reason": "free money" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
