//! HTTP-level integration tests for listings: ownership, filters,
//! favorites, and content endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;
use tower::ServiceExt;

async fn seed_property(app: axum::Router, token: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/properties",
        serde_json::json!({
            "building_name": "The Birchwood",
            "property_type": "condo",
            "address": {
                "street_address": "88 Pine St",
                "city": "New York",
                "state": "NY",
                "postal_code": "10005",
                "neighborhood": "FiDi",
                "latitude": 40.7061,
                "longitude": -74.0087
            }
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Listing another user's property is forbidden.
#[sqlx::test(migrations = "../db/migrations")]
async fn cannot_list_someone_elses_property(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, owner_token) =
        common::auth_user(app.clone(), &pool, "po@example.com", "seller").await;
    let (_other, other_token) =
        common::auth_user(app.clone(), &pool, "px@example.com", "seller").await;

    let property_id = seed_property(app.clone(), &owner_token).await;

    let body = serde_json::json!({ "property_id": property_id, "price": 500000.0 });
    let response = post_json_auth(app.clone(), "/api/v1/listings", body.clone(), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app, "/api/v1/listings", body, &owner_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Listing create validates type and price before writing.
#[sqlx::test(migrations = "../db/migrations")]
async fn listing_create_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, token) = common::auth_user(app.clone(), &pool, "lv@example.com", "seller").await;
    let property_id = seed_property(app.clone(), &token).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/listings",
        serde_json::json!({ "property_id": property_id, "price": -5.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/listings",
        serde_json::json!({
            "property_id": property_id,
            "listing_type": "timeshare",
            "price": 100.0
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Price filters narrow the public list; deleted listings disappear from it.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_and_deactivation(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, token) = common::auth_user(app.clone(), &pool, "lf@example.com", "seller").await;
    let property_id = seed_property(app.clone(), &token).await;

    for price in [300_000.0, 600_000.0] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/listings",
            serde_json::json!({ "property_id": property_id, "price": price }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.clone(), "/api/v1/listings?min_price=500000").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["price"], 600_000.0);

    let cheap_id = {
        let response = get(app.clone(), "/api/v1/listings?max_price=400000").await;
        body_json(response).await["data"][0]["id"].as_i64().unwrap()
    };

    // DELETE deactivates rather than removing the row.
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/listings/{cheap_id}"))
                .header("authorization", format!("Bearer {token}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/listings").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get(app, "/api/v1/listings?include_inactive=true").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

/// Favoriting is idempotent and visible under /users/me/favorites.
#[sqlx::test(migrations = "../db/migrations")]
async fn favorite_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, owner_token) =
        common::auth_user(app.clone(), &pool, "fo@example.com", "seller").await;
    let (_buyer, buyer_token) =
        common::auth_user(app.clone(), &pool, "fb@example.com", "buyer").await;

    let property_id = seed_property(app.clone(), &owner_token).await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/listings",
        serde_json::json!({ "property_id": property_id, "price": 450000.0 }),
        &owner_token,
    )
    .await;
    let listing_id = body_json(response).await["id"].as_i64().unwrap();

    for _ in 0..2 {
        let response = put_json_auth(
            app.clone(),
            &format!("/api/v1/listings/{listing_id}/favorite"),
            serde_json::json!({}),
            &buyer_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(app.clone(), "/api/v1/users/me/favorites", &buyer_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Refavoriting twice still counted once on the property.
    let count: i32 =
        sqlx::query_scalar("SELECT favorites_count FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

/// Published content is public; writes are staff-only.
#[sqlx::test(migrations = "../db/migrations")]
async fn content_read_public_write_staff(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_user, user_token) = common::auth_user(app.clone(), &pool, "cu@example.com", "buyer").await;
    let (_admin, admin_token) =
        common::auth_user(app.clone(), &pool, "ca@example.com", "admin").await;

    let faq = serde_json::json!({ "question": "How do I list?", "answer": "Create a property first." });
    let response = post_json_auth(app.clone(), "/api/v1/faqs", faq.clone(), &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app.clone(), "/api/v1/faqs", faq, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/v1/faqs").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
