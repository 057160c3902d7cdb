//! Handlers for the `/listings` resource and its sub-resources (photos,
//! price history, favorites, inquiries).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::cache as cache_keys;
use homegrid_core::error::CoreError;
use homegrid_core::listing::{validate_listing_type, validate_price};
use homegrid_core::messaging;
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_db::models::listing::{
    CreateListing, CreateListingPhoto, Listing, ListingFilter, ListingPhoto, PriceHistory,
    UpdateListing,
};
use homegrid_db::models::message::CreateMessage;
use homegrid_db::repositories::{
    FavoriteRepo, ListingRepo, MapClusterRepo, MessageRepo, PropertyRepo,
};
use serde::Deserialize;

use crate::cache::{TTL_DETAIL_SECS, TTL_LIST_SECS};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "listing";

/// Flat query struct: `serde_urlencoded` cannot deserialize flattened
/// structs with non-string fields, so filter and pagination parameters are
/// declared inline.
#[derive(Debug, Deserialize)]
pub struct ListingListQuery {
    pub listing_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Invalidate the caches a listing write can stale, then recompute cluster
/// aggregates. Cluster recomputation is synchronous by design; there is no
/// background schedule.
async fn after_listing_write(state: &AppState, id: DbId) -> AppResult<()> {
    state
        .cache
        .invalidate_all(&cache_keys::detail_tags(ENTITY, id))
        .await;
    state
        .cache
        .invalidate(&cache_keys::entity_tag("map_cluster"))
        .await;
    MapClusterRepo::refresh_all(&state.pool).await?;
    Ok(())
}

/// POST /api/v1/listings
///
/// Authenticated create. Only the property owner (or staff) may list a
/// property.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    validate_listing_type(&input.listing_type)?;
    validate_price(input.price)?;

    let property = PropertyRepo::find_by_id(&state.pool, input.property_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id: input.property_id,
        }))?;
    if !auth.can_access(property.owner_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot list another user's property".into(),
        )));
    }

    let listing = ListingRepo::create(&state.pool, auth.user_id, &input).await?;
    after_listing_write(&state, listing.id).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/v1/listings
///
/// Public, filterable, paginated, and memoized per filter scope.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListingListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = clamp_limit(query.limit);
    let offset = clamp_offset(query.offset);
    let filter = ListingFilter {
        listing_type: query.listing_type,
        min_price: query.min_price,
        max_price: query.max_price,
        min_bedrooms: query.min_bedrooms,
        neighborhood: query.neighborhood,
        include_inactive: query.include_inactive,
    };

    let scope = [
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
        ("type", filter.listing_type.clone().unwrap_or_default()),
        (
            "min_price",
            filter.min_price.map(|p| p.to_string()).unwrap_or_default(),
        ),
        (
            "max_price",
            filter.max_price.map(|p| p.to_string()).unwrap_or_default(),
        ),
        (
            "min_bedrooms",
            filter
                .min_bedrooms
                .map(|b| b.to_string())
                .unwrap_or_default(),
        ),
        (
            "neighborhood",
            filter.neighborhood.clone().unwrap_or_default(),
        ),
        ("inactive", filter.include_inactive.to_string()),
    ];
    let key = cache_keys::list_key(ENTITY, &scope);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let listings = ListingRepo::list(&state.pool, &filter, limit, offset).await?;
    let value = serde_json::to_value(DataResponse { data: listings })
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;

    state
        .cache
        .put(&key, &cache_keys::list_tags(ENTITY), &value, TTL_LIST_SECS)
        .await;
    Ok(Json(value))
}

/// GET /api/v1/listings/{id}
///
/// Public detail read, memoized. The view counter is bumped on cache misses
/// only.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let key = cache_keys::detail_key(ENTITY, id);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let listing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    ListingRepo::record_view(&state.pool, id).await?;

    let value = serde_json::to_value(&listing)
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

/// PUT /api/v1/listings/{id}
///
/// Owner-or-staff update. Price changes record history; contract dates
/// re-derive days on market; clusters recompute afterwards.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<Json<Listing>> {
    ensure_owner(&state, &auth, id).await?;

    if let Some(listing_type) = &input.listing_type {
        validate_listing_type(listing_type)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let listing = ListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    after_listing_write(&state, id).await?;
    Ok(Json(listing))
}

/// DELETE /api/v1/listings/{id}
///
/// Owner-or-staff deactivation. Listings are never hard-deleted.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, &auth, id).await?;

    let deactivated = ListingRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }));
    }
    after_listing_write(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// GET /api/v1/listings/{id}/photos
pub async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ListingPhoto>>>> {
    ensure_exists(&state, id).await?;
    let data = ListingRepo::list_photos(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/listings/{id}/photos
pub async fn add_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateListingPhoto>,
) -> AppResult<(StatusCode, Json<ListingPhoto>)> {
    ensure_owner(&state, &auth, id).await?;
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Photo url must not be empty".into(),
        )));
    }
    let photo = ListingRepo::add_photo(&state.pool, id, &input).await?;
    state
        .cache
        .invalidate(&cache_keys::id_tag(ENTITY, id))
        .await;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// DELETE /api/v1/listings/{id}/photos/{photo_id}
pub async fn delete_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, photo_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, &auth, id).await?;
    let deleted = ListingRepo::delete_photo(&state.pool, photo_id).await?;
    if deleted {
        state
            .cache
            .invalidate(&cache_keys::id_tag(ENTITY, id))
            .await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ListingPhoto",
            id: photo_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Price history
// ---------------------------------------------------------------------------

/// GET /api/v1/listings/{id}/price-history
pub async fn list_price_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PriceHistory>>>> {
    ensure_exists(&state, id).await?;
    let data = ListingRepo::list_price_history(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Favorites & inquiries
// ---------------------------------------------------------------------------

/// PUT /api/v1/listings/{id}/favorite
///
/// Idempotent favorite.
pub async fn favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<homegrid_db::models::favorite::Favorite>> {
    ensure_exists(&state, id).await?;
    let favorite = FavoriteRepo::add(&state.pool, auth.user_id, id).await?;
    state
        .cache
        .invalidate(&cache_keys::id_tag(ENTITY, id))
        .await;
    Ok(Json(favorite))
}

/// DELETE /api/v1/listings/{id}/favorite
pub async fn unfavorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = FavoriteRepo::remove(&state.pool, auth.user_id, id).await?;
    if removed {
        state
            .cache
            .invalidate(&cache_keys::id_tag(ENTITY, id))
            .await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/me/favorites
pub async fn list_my_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<homegrid_db::models::favorite::Favorite>>>> {
    let data = FavoriteRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub body: String,
}

/// POST /api/v1/listings/{id}/inquire
///
/// Send an inquiry message to the listing owner and bump the inquiry
/// counter.
pub async fn inquire(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<InquiryRequest>,
) -> AppResult<(StatusCode, Json<homegrid_db::models::message::Message>)> {
    messaging::validate_message("", &input.body)?;

    let listing = ensure_exists(&state, id).await?;
    if listing.user_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot inquire about your own listing".into(),
        )));
    }

    let message = MessageRepo::create(
        &state.pool,
        auth.user_id,
        &CreateMessage {
            recipient_id: listing.user_id,
            subject: format!("Inquiry about listing #{id}"),
            body: input.body,
            message_type: messaging::TYPE_INQUIRY.to_string(),
            parent_id: None,
            priority: "medium".to_string(),
            attachment_metadata: None,
        },
    )
    .await?;
    ListingRepo::record_inquiry(&state.pool, id).await?;
    state
        .cache
        .invalidate(&cache_keys::id_tag(ENTITY, id))
        .await;

    Ok((StatusCode::CREATED, Json(message)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<Listing> {
    ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))
}

async fn ensure_owner(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Listing> {
    let listing = ensure_exists(state, id).await?;
    if !auth.can_access(listing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot modify another user's listing".into(),
        )));
    }
    Ok(listing)
}
