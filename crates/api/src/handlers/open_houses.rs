//! Handlers for open houses, nested under listings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::types::DbId;
use homegrid_db::models::open_house::{CreateOpenHouse, OpenHouse};
use homegrid_db::repositories::{ListingRepo, OpenHouseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/listings/{listing_id}/open-houses
pub async fn list_by_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<OpenHouse>>>> {
    let data = OpenHouseRepo::list_by_listing(&state.pool, listing_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/listings/{listing_id}/open-houses
///
/// Listing owner (or staff) schedules an open house.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(listing_id): Path<DbId>,
    Json(input): Json<CreateOpenHouse>,
) -> AppResult<(StatusCode, Json<OpenHouse>)> {
    if input.end_time <= input.start_time {
        return Err(AppError::Core(CoreError::Validation(
            "end_time must be after start_time".into(),
        )));
    }

    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;
    if !auth.can_access(listing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot schedule an open house for another user's listing".into(),
        )));
    }

    let open_house = OpenHouseRepo::create(&state.pool, listing_id, &input).await?;
    Ok((StatusCode::CREATED, Json(open_house)))
}

/// POST /api/v1/open-houses/{id}/rsvp
///
/// Authenticated RSVP. Past-deadline RSVPs are refused with a validation
/// error.
pub async fn rsvp(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OpenHouse>> {
    // Distinguish "missing" from "deadline passed" for the error message.
    OpenHouseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OpenHouse",
            id,
        }))?;

    match OpenHouseRepo::rsvp(&state.pool, id).await? {
        Some(updated) => Ok(Json(updated)),
        None => Err(AppError::Core(CoreError::Validation(
            "RSVP deadline has passed".into(),
        ))),
    }
}

/// DELETE /api/v1/open-houses/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let open_house = OpenHouseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OpenHouse",
            id,
        }))?;

    let listing = ListingRepo::find_by_id(&state.pool, open_house.listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: open_house.listing_id,
        }))?;
    if !auth.can_access(listing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot cancel another user's open house".into(),
        )));
    }

    OpenHouseRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
