//! Integration tests for the bounding-box proximity queries.
//!
//! Exercises the repository layer against a real database to verify that:
//! - A listing is found when searching around its own coordinates
//! - The same listing is not found from a far-away center
//! - Repeated identical searches over unchanged data return identical sets
//! - Inactive listings never appear in map results
//! - Users with a stored location are discoverable the same way

use homegrid_core::geo::{BoundingBox, GeoPoint};
use homegrid_db::models::listing::CreateListing;
use homegrid_db::models::property::{CreateAddress, CreateProperty};
use homegrid_db::models::user::{CreateUser, UpdateUser};
use homegrid_db::repositories::{ListingRepo, PropertyRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> homegrid_db::models::user::User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$fake".to_string(),
        role: "seller".to_string(),
    };
    UserRepo::create(pool, &input).await.expect("user creation")
}

fn nyc_address() -> CreateAddress {
    CreateAddress {
        street_address: "350 5th Ave".to_string(),
        unit_number: None,
        city: "New York".to_string(),
        state: "NY".to_string(),
        postal_code: "10118".to_string(),
        neighborhood: Some("Midtown".to_string()),
        borough: Some("Manhattan".to_string()),
        latitude: 40.7128,
        longitude: -74.0060,
        walk_score: Some(99),
        transit_score: Some(100),
    }
}

async fn create_listing_at(
    pool: &PgPool,
    owner_id: i64,
    address: CreateAddress,
    price: f64,
) -> homegrid_db::models::listing::Listing {
    let property = PropertyRepo::create(
        pool,
        owner_id,
        &CreateProperty {
            building_name: "Test Building".to_string(),
            property_type: "condo".to_string(),
            address,
            total_units: None,
            year_built: Some(1931),
            floors: None,
        },
    )
    .await
    .expect("property creation");

    let input = CreateListing {
        property_id: property.id,
        listing_type: "sale".to_string(),
        price,
        bedrooms: Some(2),
        bathrooms: Some(1.0),
        square_footage: Some(900),
        floor: Some(12),
        description: String::new(),
        pet_policy: None,
        maintenance_fee: None,
        hoa_fee: None,
    };
    ListingRepo::create(pool, owner_id, &input)
        .await
        .expect("listing creation")
}

fn bbox(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let center = GeoPoint::new(lat, lon).expect("valid center");
    BoundingBox::around(center, radius_km).expect("valid radius")
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// A listing at (40.7128, -74.0060) is found when querying a 5 km radius
/// from the same center.
#[sqlx::test(migrations = "./migrations")]
async fn listing_found_at_own_coordinates(pool: PgPool) {
    let owner = create_user(&pool, "geo-owner@test.com").await;
    let listing = create_listing_at(&pool, owner.id, nyc_address(), 950_000.0).await;

    let results = ListingRepo::list_in_bounds(&pool, &bbox(40.7128, -74.0060, 5.0))
        .await
        .expect("map query");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, listing.id);
    assert_eq!(results[0].latitude, 40.7128);
}

/// The same listing is not found from (0, 0) with the same radius.
#[sqlx::test(migrations = "./migrations")]
async fn listing_not_found_from_distant_center(pool: PgPool) {
    let owner = create_user(&pool, "geo-far@test.com").await;
    create_listing_at(&pool, owner.id, nyc_address(), 950_000.0).await;

    let results = ListingRepo::list_in_bounds(&pool, &bbox(0.0, 0.0, 5.0))
        .await
        .expect("map query");

    assert!(results.is_empty());
}

/// Two identical queries over unchanged data return identical result sets.
#[sqlx::test(migrations = "./migrations")]
async fn repeated_search_is_idempotent(pool: PgPool) {
    let owner = create_user(&pool, "geo-idem@test.com").await;
    create_listing_at(&pool, owner.id, nyc_address(), 950_000.0).await;
    let mut brooklyn = nyc_address();
    brooklyn.latitude = 40.6782;
    brooklyn.longitude = -73.9442;
    create_listing_at(&pool, owner.id, brooklyn, 650_000.0).await;

    let search = bbox(40.7, -74.0, 10.0);
    let first = ListingRepo::list_in_bounds(&pool, &search).await.expect("first query");
    let second = ListingRepo::list_in_bounds(&pool, &search).await.expect("second query");

    let first_ids: Vec<i64> = first.iter().map(|l| l.id).collect();
    let second_ids: Vec<i64> = second.iter().map(|l| l.id).collect();
    assert_eq!(first_ids, second_ids);
}

/// Deactivated listings drop out of map results.
#[sqlx::test(migrations = "./migrations")]
async fn deactivated_listing_leaves_map_results(pool: PgPool) {
    let owner = create_user(&pool, "geo-inactive@test.com").await;
    let listing = create_listing_at(&pool, owner.id, nyc_address(), 950_000.0).await;

    let search = bbox(40.7128, -74.0060, 5.0);
    assert_eq!(
        ListingRepo::list_in_bounds(&pool, &search).await.unwrap().len(),
        1
    );

    let deactivated = ListingRepo::deactivate(&pool, listing.id).await.unwrap();
    assert!(deactivated);
    // Second deactivation is a no-op.
    assert!(!ListingRepo::deactivate(&pool, listing.id).await.unwrap());

    assert!(ListingRepo::list_in_bounds(&pool, &search).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Nearby-user search finds active users with a stored location inside the
/// box and skips users elsewhere.
#[sqlx::test(migrations = "./migrations")]
async fn nearby_users_respects_bounds(pool: PgPool) {
    let near = create_user(&pool, "near@test.com").await;
    UserRepo::update(
        &pool,
        near.id,
        &UpdateUser {
            latitude: Some(40.71),
            longitude: Some(-74.00),
            account_status: Some("active".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update near user");

    let far = create_user(&pool, "far@test.com").await;
    UserRepo::update(
        &pool,
        far.id,
        &UpdateUser {
            latitude: Some(51.5074),
            longitude: Some(-0.1278),
            account_status: Some("active".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update far user");

    let results = UserRepo::list_in_bounds(&pool, &bbox(40.7128, -74.0060, 5.0))
        .await
        .expect("nearby query");

    let ids: Vec<i64> = results.iter().map(|u| u.id).collect();
    assert!(ids.contains(&near.id));
    assert!(!ids.contains(&far.id));
}
