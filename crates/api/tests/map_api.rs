//! HTTP-level integration tests for map search and coordinate validation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json_auth};
use sqlx::PgPool;
use tower::ServiceExt;

/// Create a property + listing at the given coordinates via the API,
/// returning the listing id.
async fn seed_listing(
    app: axum::Router,
    token: &str,
    lat: f64,
    lon: f64,
    price: f64,
) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/properties",
        serde_json::json!({
            "building_name": "Seed Tower",
            "property_type": "condo",
            "address": {
                "street_address": "1 Test Way",
                "city": "New York",
                "state": "NY",
                "postal_code": "10001",
                "latitude": lat,
                "longitude": lon
            }
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let property_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        "/api/v1/listings",
        serde_json::json!({
            "property_id": property_id,
            "listing_type": "sale",
            "price": price,
            "bedrooms": 2
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// A listing at (40.7128, -74.0060) is returned for a 5 km search from the
/// same center, and not from (0, 0).
#[sqlx::test(migrations = "../db/migrations")]
async fn map_search_finds_nearby_listing(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, token) = common::auth_user(app.clone(), &pool, "mapper@example.com", "seller").await;
    let listing_id = seed_listing(app.clone(), &token, 40.7128, -74.0060, 950_000.0).await;

    let response = get(
        app.clone(),
        "/api/v1/listings/map?latitude=40.7128&longitude=-74.0060&radius_km=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["listing_count"], 1);
    assert_eq!(json["property_count"], 1);
    assert_eq!(json["avg_price"], 950_000.0);
    assert_eq!(json["listings"][0]["id"], listing_id);

    let response = get(
        app,
        "/api/v1/listings/map?latitude=0&longitude=0&radius_km=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["listing_count"], 0);
    assert!(json["avg_price"].is_null());
}

/// Out-of-range coordinates and negative radii are 400s, not empty results.
#[sqlx::test(migrations = "../db/migrations")]
async fn map_search_validates_input(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get(
        app.clone(),
        "/api/v1/listings/map?latitude=91&longitude=0&radius_km=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = get(
        app.clone(),
        "/api/v1/listings/map?latitude=0&longitude=-200&radius_km=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        app,
        "/api/v1/listings/map?latitude=0&longitude=0&radius_km=-2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The same applies to the nearby-users search.
#[sqlx::test(migrations = "../db/migrations")]
async fn nearby_users_validates_input(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get(
        app.clone(),
        "/api/v1/users/nearby?latitude=-90.5&longitude=0",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/v1/users/nearby?latitude=40.7&longitude=-74.0").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Cluster aggregates recompute after listing writes: list clusters, then
/// deactivate the listing and observe the counts fall to zero.
#[sqlx::test(migrations = "../db/migrations")]
async fn clusters_track_listing_writes(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (_owner, token) =
        common::auth_user(app.clone(), &pool, "cluster@example.com", "seller").await;
    let (_admin, admin_token) =
        common::auth_user(app.clone(), &pool, "cadmin@example.com", "admin").await;

    let listing_id = seed_listing(app.clone(), &token, 40.7128, -74.0060, 800_000.0).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/map-clusters",
        serde_json::json!({
            "center_latitude": 40.7128,
            "center_longitude": -74.0060,
            "radius_km": 5.0
        }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let cluster_id = json["id"].as_i64().unwrap();
    assert_eq!(json["listing_count"], 1);
    assert_eq!(json["avg_price"], 800_000.0);

    // Deactivate the listing through the API; the cluster empties.
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/listings/{listing_id}"))
                .header("authorization", format!("Bearer {token}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/map-clusters/{cluster_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["listing_count"], 0);
    assert!(json["avg_price"].is_null());
}
