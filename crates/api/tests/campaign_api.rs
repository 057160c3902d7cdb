//! HTTP-level integration tests for ad-campaign authorization and review.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;

fn campaign_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Lakeside Launch",
        "start_date": "2026-09-01T00:00:00Z",
        "budget": 1000.0,
        "bid_strategy": "cpm",
        "bid_amount": 2.5,
        "target_audience": { "roles": ["buyer"] }
    })
}

/// Unauthenticated create is a 401 and writes no row.
#[sqlx::test(migrations = "../db/migrations")]
async fn unauthenticated_create_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;

    let response = post_json(app, "/api/v1/ad-campaigns", campaign_body()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ad_campaigns")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "no campaign row may be created");
}

/// Authenticated create succeeds and stamps the derived remaining budget.
#[sqlx::test(migrations = "../db/migrations")]
async fn authenticated_create_succeeds(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, token) = common::auth_user(app.clone(), &pool, "owner@example.com", "agent").await;

    let response = post_json_auth(app, "/api/v1/ad-campaigns", campaign_body(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "draft");
    assert_eq!(json["approval_status"], "pending");
    assert_eq!(json["remaining_budget"], 1000.0);
}

/// A campaign is invisible to other users (403) but visible to its owner.
#[sqlx::test(migrations = "../db/migrations")]
async fn owner_only_access(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, owner_token) =
        common::auth_user(app.clone(), &pool, "owner2@example.com", "agent").await;
    let (_other, other_token) =
        common::auth_user(app.clone(), &pool, "other@example.com", "buyer").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/ad-campaigns", campaign_body(), &owner_token).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/ad-campaigns/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, &format!("/api/v1/ad-campaigns/{id}"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Lifecycle transitions are enforced: draft → pending is fine, draft →
/// active is a 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn status_transitions_are_checked(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, token) = common::auth_user(app.clone(), &pool, "owner3@example.com", "agent").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/ad-campaigns", campaign_body(), &token).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/ad-campaigns/{id}"),
        serde_json::json!({ "status": "active" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        app,
        &format!("/api/v1/ad-campaigns/{id}"),
        serde_json::json!({ "status": "pending" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "pending");
}

/// Only admins may approve; approval activates the campaign.
#[sqlx::test(migrations = "../db/migrations")]
async fn approval_is_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, owner_token) =
        common::auth_user(app.clone(), &pool, "owner4@example.com", "agent").await;
    let (_admin, admin_token) =
        common::auth_user(app.clone(), &pool, "admin@example.com", "admin").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/ad-campaigns", campaign_body(), &owner_token).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    // Submit for review first.
    put_json_auth(
        app.clone(),
        &format!("/api/v1/ad-campaigns/{id}"),
        serde_json::json!({ "status": "pending" }),
        &owner_token,
    )
    .await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/ad-campaigns/{id}/approve"),
        serde_json::json!({}),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app,
        &format!("/api/v1/ad-campaigns/{id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["approval_status"], "approved");
    assert_eq!(json["status"], "active");
}
