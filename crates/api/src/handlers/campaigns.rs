//! Handlers for the `/ad-campaigns` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::campaign::{
    can_transition, validate_bid_strategy, validate_budget, validate_status,
};
use homegrid_core::error::CoreError;
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_db::models::campaign::{AdCampaign, CreateCampaign, UpdateCampaign};
use homegrid_db::repositories::CampaignRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/ad-campaigns
///
/// Authentication is required; an unauthenticated request is rejected with
/// 401 before any row is written.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<AdCampaign>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign name must not be empty".into(),
        )));
    }
    validate_budget(input.budget, input.bid_amount)?;
    validate_bid_strategy(&input.bid_strategy)?;
    if let Some(end) = input.end_date {
        if end <= input.start_date {
            return Err(AppError::Core(CoreError::Validation(
                "end_date must be after start_date".into(),
            )));
        }
    }

    let campaign = CampaignRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// GET /api/v1/ad-campaigns
///
/// A user's own campaigns.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<AdCampaign>>>> {
    let data = CampaignRepo::list_by_user(
        &state.pool,
        auth.user_id,
        clamp_limit(pagination.limit),
        clamp_offset(pagination.offset),
    )
    .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/ad-campaigns/pending
///
/// Admin review queue.
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<AdCampaign>>>> {
    let data = CampaignRepo::list_pending_approval(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/ad-campaigns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdCampaign>> {
    let campaign = fetch_owned(&state, &auth, id).await?;
    Ok(Json(campaign))
}

/// PUT /api/v1/ad-campaigns/{id}
///
/// Owner-or-staff update. Status changes must follow the lifecycle machine;
/// spend/budget writes re-derive the remaining budget.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<AdCampaign>> {
    let current = fetch_owned(&state, &auth, id).await?;

    if let Some(status) = &input.status {
        validate_status(status)?;
        if !can_transition(&current.status, status) {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Cannot move campaign from '{}' to '{status}'",
                current.status
            ))));
        }
    }
    if let Some(strategy) = &input.bid_strategy {
        validate_bid_strategy(strategy)?;
    }
    let budget = input.budget.unwrap_or(current.budget);
    let bid_amount = input.bid_amount.unwrap_or(current.bid_amount);
    validate_budget(budget, bid_amount)?;

    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdCampaign",
            id,
        }))?;
    Ok(Json(campaign))
}

/// DELETE /api/v1/ad-campaigns/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    fetch_owned(&state, &auth, id).await?;
    CampaignRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// POST /api/v1/ad-campaigns/{id}/approve
///
/// Admin review decision: approve and activate.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdCampaign>> {
    let campaign = CampaignRepo::set_approval(&state.pool, id, true, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdCampaign",
            id,
        }))?;
    tracing::info!(campaign_id = id, "Campaign approved");
    Ok(Json(campaign))
}

/// POST /api/v1/ad-campaigns/{id}/reject
///
/// Admin review decision: reject with an optional reason.
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<Json<AdCampaign>> {
    let campaign = CampaignRepo::set_approval(&state.pool, id, false, input.reason.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdCampaign",
            id,
        }))?;
    tracing::info!(campaign_id = id, "Campaign rejected");
    Ok(Json(campaign))
}

/// Load a campaign and enforce the owner-or-staff predicate.
async fn fetch_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<AdCampaign> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdCampaign",
            id,
        }))?;
    if !auth.can_access(campaign.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot access another user's campaign".into(),
        )));
    }
    Ok(campaign)
}
