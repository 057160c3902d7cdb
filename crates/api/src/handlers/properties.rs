//! Handlers for the `/properties` resource and its transit/school
//! sub-resources.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::cache as cache_keys;
use homegrid_core::error::CoreError;
use homegrid_core::geo::{haversine_km, GeoPoint};
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_db::models::property::{CreateProperty, Property, PropertyFilter, UpdateProperty};
use homegrid_db::models::school::LinkSchool;
use homegrid_db::models::transit::LinkTransit;
use homegrid_db::repositories::{PropertyRepo, SchoolRepo, TransitRepo};
use serde::Serialize;

use crate::cache::{TTL_DETAIL_SECS, TTL_LIST_SECS};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "property";

/// Property detail joined with its address for API responses.
#[derive(Debug, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub address: Option<homegrid_db::models::property::Address>,
}

/// Flat query struct: `serde_urlencoded` cannot deserialize flattened
/// structs with non-string fields, so filter and pagination parameters are
/// declared inline.
#[derive(Debug, serde::Deserialize)]
pub struct PropertyListQuery {
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub min_units: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/properties
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProperty>,
) -> AppResult<(StatusCode, Json<Property>)> {
    GeoPoint::new(input.address.latitude, input.address.longitude)?;
    if input.property_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "property_type must not be empty".into(),
        )));
    }

    let property = PropertyRepo::create(&state.pool, auth.user_id, &input).await?;
    state
        .cache
        .invalidate(&cache_keys::entity_tag(ENTITY))
        .await;
    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /api/v1/properties
///
/// Public, filterable, paginated, and memoized per filter scope.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PropertyListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = clamp_limit(query.limit);
    let offset = clamp_offset(query.offset);
    let filter = PropertyFilter {
        property_type: query.property_type,
        status: query.status,
        min_units: query.min_units,
    };

    let scope = [
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
        ("type", filter.property_type.clone().unwrap_or_default()),
        ("status", filter.status.clone().unwrap_or_default()),
        (
            "min_units",
            filter.min_units.map(|u| u.to_string()).unwrap_or_default(),
        ),
    ];
    let key = cache_keys::list_key(ENTITY, &scope);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let properties = PropertyRepo::list(&state.pool, &filter, limit, offset).await?;
    let value = serde_json::to_value(DataResponse { data: properties })
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;

    state
        .cache
        .put(&key, &cache_keys::list_tags(ENTITY), &value, TTL_LIST_SECS)
        .await;
    Ok(Json(value))
}

/// GET /api/v1/properties/{id}
///
/// Public detail read (property + address), memoized. The view counter is
/// only bumped on cache misses; memoized reads are invisible to analytics,
/// as in any response-cached system.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let key = cache_keys::detail_key(ENTITY, id);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))?;
    PropertyRepo::record_view(&state.pool, id).await?;

    let address = match property.address_id {
        Some(address_id) => PropertyRepo::find_address(&state.pool, address_id).await?,
        None => None,
    };

    let value = serde_json::to_value(PropertyDetail { property, address })
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;

    state
        .cache
        .put(
            &key,
            &cache_keys::detail_tags(ENTITY, id),
            &value,
            TTL_DETAIL_SECS,
        )
        .await;
    Ok(Json(value))
}

/// PUT /api/v1/properties/{id}
///
/// Owner-or-staff update.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProperty>,
) -> AppResult<Json<Property>> {
    ensure_owner(&state, &auth, id).await?;

    let property = PropertyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))?;

    state
        .cache
        .invalidate_all(&cache_keys::detail_tags(ENTITY, id))
        .await;
    Ok(Json(property))
}

/// DELETE /api/v1/properties/{id}
///
/// Owner-or-staff hard delete; cascades to listings.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, &auth, id).await?;

    let deleted = PropertyRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }));
    }

    state
        .cache
        .invalidate_all(&cache_keys::detail_tags(ENTITY, id))
        .await;
    // Cascaded listing deletions stale the listing caches too.
    state
        .cache
        .invalidate(&cache_keys::entity_tag("listing"))
        .await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Transit / school sub-resources
// ---------------------------------------------------------------------------

/// GET /api/v1/properties/{id}/transit
///
/// Transit stops linked to the property, nearest first. Each row carries the
/// stored walking context; distances were computed from the property's
/// address at link time.
pub async fn list_transit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<homegrid_db::models::transit::PropertyTransit>>>> {
    ensure_exists(&state, id).await?;
    let data = TransitRepo::list_for_property(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/properties/{id}/transit
///
/// Staff-only: link a transit stop. The stored distance is the haversine
/// between the property's address and the stop.
pub async fn link_transit(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<LinkTransit>,
) -> AppResult<StatusCode> {
    let property_point = property_location(&state, id).await?;

    let transit = TransitRepo::find_by_id(&state.pool, input.transit_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Transit",
            id: input.transit_id,
        }))?;
    let stop_point = GeoPoint::new(transit.latitude, transit.longitude)?;

    let distance_meters = haversine_km(property_point, stop_point) * 1000.0;
    TransitRepo::link_to_property(
        &state.pool,
        id,
        transit.id,
        distance_meters,
        input.walking_time_minutes,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/properties/{id}/schools
pub async fn list_schools(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<homegrid_db::models::school::PropertySchool>>>> {
    ensure_exists(&state, id).await?;
    let data = SchoolRepo::list_for_property(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/properties/{id}/schools
///
/// Staff-only: link a school, storing the haversine distance.
pub async fn link_school(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<LinkSchool>,
) -> AppResult<StatusCode> {
    let property_point = property_location(&state, id).await?;

    let school = SchoolRepo::find_by_id(&state.pool, input.school_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "School",
            id: input.school_id,
        }))?;
    let school_point = GeoPoint::new(school.latitude, school.longitude)?;

    let distance_meters = haversine_km(property_point, school_point) * 1000.0;
    SchoolRepo::link_to_property(
        &state.pool,
        id,
        school.id,
        distance_meters,
        input.walking_time_minutes,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Transit / school catalogs
// ---------------------------------------------------------------------------

/// GET /api/v1/transits
pub async fn list_transit_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<homegrid_db::models::transit::Transit>>>> {
    let data = TransitRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/transits
///
/// Staff-only: register a transit stop.
pub async fn create_transit(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<homegrid_db::models::transit::CreateTransit>,
) -> AppResult<(StatusCode, Json<homegrid_db::models::transit::Transit>)> {
    GeoPoint::new(input.latitude, input.longitude)?;
    let transit = TransitRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(transit)))
}

/// GET /api/v1/schools
pub async fn list_school_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<homegrid_db::models::school::School>>>> {
    let data = SchoolRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/schools
///
/// Staff-only: register a school.
pub async fn create_school(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<homegrid_db::models::school::CreateSchool>,
) -> AppResult<(StatusCode, Json<homegrid_db::models::school::School>)> {
    GeoPoint::new(input.latitude, input.longitude)?;
    let school = SchoolRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<Property> {
    PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))
}

async fn ensure_owner(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Property> {
    let property = ensure_exists(state, id).await?;
    if !auth.can_access(property.owner_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot modify another user's property".into(),
        )));
    }
    Ok(property)
}

/// The property's address coordinates, required for distance computations.
async fn property_location(state: &AppState, id: DbId) -> AppResult<GeoPoint> {
    let property = ensure_exists(state, id).await?;
    let address_id = property.address_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Property has no address on record".into(),
        ))
    })?;
    let address = PropertyRepo::find_address(&state.pool, address_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id: address_id,
        }))?;
    Ok(GeoPoint::new(address.latitude, address.longitude)?)
}
