//! HTTP-level integration tests for registration, login, and token refresh.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use sqlx::PgPool;

/// Register → login round trip returns tokens and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_then_login(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({
            "email": "alice@example.com",
            "password": "a-long-enough-password",
            "role": "seller"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["role"], "seller");
    assert_eq!(json["account_status"], "pending");
    assert!(json.get("password_hash").is_none(), "hash must never leak");

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "email": "alice@example.com",
            "password": "a-long-enough-password"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["email"], "alice@example.com");
}

/// Registration rejects malformed emails and staff role self-assignment.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_validation(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({ "email": "not-an-email", "password": "a-long-enough-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({ "email": "short@example.com", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "email": "sneaky@example.com",
            "password": "a-long-enough-password",
            "role": "admin"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Duplicate email registration is a 409 via the unique constraint.
#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({
        "email": "dup@example.com",
        "password": "a-long-enough-password"
    });

    let response = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Wrong password is a 401; repeated failures lock the account (403).
#[sqlx::test(migrations = "../db/migrations")]
async fn failed_logins_lock_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    common::create_test_user(&pool, "locked@example.com", "buyer").await;

    for _ in 0..5 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            serde_json::json!({ "email": "locked@example.com", "password": "wrong" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is refused while locked.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "locked@example.com", "password": "test_password_123!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Refresh rotates the token pair; the old refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    common::create_test_user(&pool, "rotate@example.com", "buyer").await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "rotate@example.com", "password": "test_password_123!" }),
    )
    .await;
    let json = body_json(response).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], refresh_token);

    // The first refresh token was revoked by rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
