//! Handlers for the `/banners` resource. Banners belong to a campaign; all
//! writes are gated on campaign ownership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::types::DbId;
use homegrid_db::models::banner::{Banner, CreateBanner, UpdateBanner};
use homegrid_db::repositories::{BannerRepo, CampaignRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/banners
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBanner>,
) -> AppResult<(StatusCode, Json<Banner>)> {
    if input.title.trim().is_empty() || input.image_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Banner title and image_url must not be empty".into(),
        )));
    }
    ensure_campaign_owner(&state, &auth, input.campaign_id).await?;

    let banner = BannerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// GET /api/v1/ad-campaigns/{campaign_id}/banners
pub async fn list_by_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Banner>>>> {
    ensure_campaign_owner(&state, &auth, campaign_id).await?;
    let data = BannerRepo::list_by_campaign(&state.pool, campaign_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/banners/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Banner>> {
    let banner = fetch_banner(&state, id).await?;
    ensure_campaign_owner(&state, &auth, banner.campaign_id).await?;
    Ok(Json(banner))
}

/// PUT /api/v1/banners/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBanner>,
) -> AppResult<Json<Banner>> {
    let banner = fetch_banner(&state, id).await?;
    ensure_campaign_owner(&state, &auth, banner.campaign_id).await?;

    let updated = BannerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Banner",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/banners/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let banner = fetch_banner(&state, id).await?;
    ensure_campaign_owner(&state, &auth, banner.campaign_id).await?;

    BannerRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/banners/{id}/click
///
/// Public click tracking; spends the campaign's bid amount on CPC
/// campaigns.
pub async fn record_click(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let banner = fetch_banner(&state, id).await?;
    BannerRepo::record_click(&state.pool, id).await?;

    if let Some(campaign) = CampaignRepo::find_by_id(&state.pool, banner.campaign_id).await? {
        if campaign.bid_strategy == "cpc" {
            CampaignRepo::update(
                &state.pool,
                campaign.id,
                &homegrid_db::models::campaign::UpdateCampaign {
                    total_spent: Some(campaign.total_spent + campaign.bid_amount),
                    ..Default::default()
                },
            )
            .await?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn fetch_banner(state: &AppState, id: DbId) -> AppResult<Banner> {
    BannerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Banner",
            id,
        }))
}

async fn ensure_campaign_owner(
    state: &AppState,
    auth: &AuthUser,
    campaign_id: DbId,
) -> AppResult<()> {
    let campaign = CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdCampaign",
            id: campaign_id,
        }))?;
    if !auth.can_access(campaign.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot manage banners on another user's campaign".into(),
        )));
    }
    Ok(())
}
