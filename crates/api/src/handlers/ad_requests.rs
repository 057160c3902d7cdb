//! Handlers for the `/ad-requests` resource: ad-slot requests and serving.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_db::models::ad_request::{AdRequest, CreateAdRequest};
use homegrid_db::repositories::{AdRequestRepo, BannerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/ad-requests
///
/// Record an ad-slot request for the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAdRequest>,
) -> AppResult<(StatusCode, Json<AdRequest>)> {
    let request = AdRequestRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/ad-requests
///
/// The authenticated user's own requests.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<AdRequest>>>> {
    let data = AdRequestRepo::list_by_requester(
        &state.pool,
        auth.user_id,
        clamp_limit(pagination.limit),
        clamp_offset(pagination.offset),
    )
    .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/ad-requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdRequest>> {
    let request = AdRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdRequest",
            id,
        }))?;
    if !auth.can_access(request.requester_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot view another user's ad request".into(),
        )));
    }
    Ok(Json(request))
}

/// POST /api/v1/ad-requests/{id}/serve
///
/// Fill a pending request with a servable banner: pick the least-shown
/// active banner from a running approved campaign with budget left, stamp
/// the request, and record the impression. With no servable banner the
/// request is rejected.
pub async fn serve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdRequest>> {
    let request = AdRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdRequest",
            id,
        }))?;
    if !auth.can_access(request.requester_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot serve another user's ad request".into(),
        )));
    }
    if request.status != "pending" {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Ad request is already '{}'",
            request.status
        ))));
    }

    match BannerRepo::pick_servable(&state.pool).await? {
        Some(banner) => {
            let served = AdRequestRepo::mark_served(&state.pool, id, banner.id)
                .await?
                .ok_or(AppError::Core(CoreError::Conflict(
                    "Ad request was served concurrently".into(),
                )))?;
            BannerRepo::record_impression(&state.pool, banner.id).await?;
            Ok(Json(served))
        }
        None => {
            let rejected = AdRequestRepo::mark_rejected(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::Conflict(
                    "Ad request was served concurrently".into(),
                )))?;
            Ok(Json(rejected))
        }
    }
}
