//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::geo::{validate_radius_km, BoundingBox, GeoPoint};
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_core::user::{validate_price_bounds, validate_search_radius};
use homegrid_db::models::user::{UpdateUser, UserResponse};
use homegrid_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::{PaginationParams, RadiusParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
///
/// Staff-only listing of all accounts.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(
        &state.pool,
        clamp_limit(pagination.limit),
        clamp_offset(pagination.offset),
    )
    .await?;
    let data = users.into_iter().map(|u| u.into_response()).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/nearby?latitude=&longitude=&radius_km=
///
/// Public box search over users with a stored location. Coordinates and
/// radius are validated up front; out-of-range input is a 400, never a
/// silently empty result.
pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<RadiusParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let center = GeoPoint::new(params.latitude, params.longitude)?;
    let radius_km = params.radius_km();
    validate_radius_km(radius_km)?;

    let bbox = BoundingBox::around(center, radius_km)?;
    let users = UserRepo::list_in_bounds(&state.pool, &bbox).await?;
    let data = users.into_iter().map(|u| u.into_response()).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/{id}
///
/// Self-or-staff read of the full profile.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    if !auth.can_access(id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot view another user's profile".into(),
        )));
    }
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into_response()))
}

/// PUT /api/v1/users/{id}
///
/// Self-or-staff profile update. Account status changes are staff-only.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if !auth.can_access(id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot modify another user's profile".into(),
        )));
    }
    if input.account_status.is_some() && !auth.is_staff() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only staff may change account status".into(),
        )));
    }

    if let (Some(lat), Some(lon)) = (input.latitude, input.longitude) {
        GeoPoint::new(lat, lon)?;
    } else if input.latitude.is_some() != input.longitude.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "Latitude and longitude must be provided together".into(),
        )));
    }
    if let Some(radius) = input.search_radius_km {
        validate_search_radius(radius)?;
    }
    validate_price_bounds(input.min_price, input.max_price)?;

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into_response()))
}

/// DELETE /api/v1/users/{id}
///
/// Self-or-staff soft delete via status flag. The row is kept.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !auth.can_access(id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete another user's account".into(),
        )));
    }
    let deleted = UserRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
