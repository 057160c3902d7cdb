//! Handlers for map search and the `/map-clusters` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::cache as cache_keys;
use homegrid_core::cluster::{ClusterStats, ListingPoint};
use homegrid_core::error::CoreError;
use homegrid_core::geo::{validate_radius_km, BoundingBox, GeoPoint};
use homegrid_core::types::DbId;
use homegrid_db::models::listing::GeoListing;
use homegrid_db::models::map_cluster::{CreateMapCluster, MapCluster};
use homegrid_db::repositories::{ListingRepo, MapClusterRepo};
use serde::Serialize;

use crate::cache::TTL_MAP_SECS;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::RadiusParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "map_cluster";

/// Response body for `GET /listings/map`: the in-box listings plus the
/// aggregates a map viewport needs.
#[derive(Debug, Serialize)]
pub struct MapSearchResponse {
    pub listings: Vec<GeoListing>,
    pub center: Center,
    pub radius_km: f64,
    pub property_count: i64,
    pub listing_count: i64,
    pub avg_price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Center {
    pub latitude: f64,
    pub longitude: f64,
}

/// GET /api/v1/listings/map?latitude=&longitude=&radius_km=
///
/// Bounding-box search over active listings with on-the-fly aggregates.
/// Coordinates and radius are validated; out-of-range input is a 400.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<RadiusParams>,
) -> AppResult<Json<MapSearchResponse>> {
    let center = GeoPoint::new(params.latitude, params.longitude)?;
    let radius_km = params.radius_km();
    validate_radius_km(radius_km)?;

    let bbox = BoundingBox::around(center, radius_km)?;
    let listings = ListingRepo::list_in_bounds(&state.pool, &bbox).await?;

    let points: Vec<ListingPoint> = listings
        .iter()
        .map(|l| ListingPoint {
            property_id: l.property_id,
            price: l.price,
        })
        .collect();
    let stats = ClusterStats::compute(&points);

    Ok(Json(MapSearchResponse {
        listings,
        center: Center {
            latitude: center.latitude,
            longitude: center.longitude,
        },
        radius_km,
        property_count: stats.property_count,
        listing_count: stats.listing_count,
        avg_price: stats.avg_price,
    }))
}

/// GET /api/v1/map-clusters
///
/// Refreshes every cluster's aggregates, then returns them. The refreshed
/// list is memoized briefly; any listing write invalidates it.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let key = cache_keys::list_key(ENTITY, &[]);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let clusters = MapClusterRepo::refresh_all(&state.pool).await?;
    let value = serde_json::to_value(DataResponse { data: clusters })
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;

    state
        .cache
        .put(&key, &cache_keys::list_tags(ENTITY), &value, TTL_MAP_SECS)
        .await;
    Ok(Json(value))
}

/// GET /api/v1/map-clusters/{id}
///
/// Refreshes the cluster on demand before returning it.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MapCluster>> {
    let cluster = MapClusterRepo::refresh(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MapCluster",
            id,
        }))?;
    Ok(Json(cluster))
}

/// POST /api/v1/map-clusters
///
/// Staff-only: register a cluster circle. Its aggregates are computed
/// immediately.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateMapCluster>,
) -> AppResult<(StatusCode, Json<MapCluster>)> {
    GeoPoint::new(input.center_latitude, input.center_longitude)?;
    validate_radius_km(input.radius_km)?;

    let created = MapClusterRepo::create(&state.pool, &input).await?;
    let cluster = MapClusterRepo::refresh(&state.pool, created.id)
        .await?
        .unwrap_or(created);

    state.cache.invalidate(&cache_keys::entity_tag(ENTITY)).await;
    Ok((StatusCode::CREATED, Json(cluster)))
}

/// DELETE /api/v1/map-clusters/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MapClusterRepo::delete(&state.pool, id).await?;
    if deleted {
        state.cache.invalidate(&cache_keys::entity_tag(ENTITY)).await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MapCluster",
            id,
        }))
    }
}
