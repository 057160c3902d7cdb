//! Handlers for the `/system-config` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::types::DbId;
use homegrid_db::models::system_config::{
    CreateSystemConfig, SystemConfig, UpdateSystemConfig,
};
use homegrid_db::repositories::SystemConfigRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/system-config/active
///
/// The currently active configuration. Public: clients read feature flags
/// and limits from here.
pub async fn get_active(State(state): State<AppState>) -> AppResult<Json<SystemConfig>> {
    SystemConfigRepo::find_active(&state.pool)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No active system configuration".into(),
            ))
        })
}

/// GET /api/v1/system-config
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<SystemConfig>>>> {
    let data = SystemConfigRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/system-config/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<SystemConfig>> {
    let config = SystemConfigRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SystemConfig",
            id,
        }))?;
    Ok(Json(config))
}

/// POST /api/v1/system-config
///
/// Creating an active configuration deactivates every other one in the same
/// transaction.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSystemConfig>,
) -> AppResult<(StatusCode, Json<SystemConfig>)> {
    if input.name.trim().is_empty() || input.version.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Config name and version must not be empty".into(),
        )));
    }
    let config = SystemConfigRepo::create(&state.pool, &input).await?;
    tracing::info!(config_id = config.id, version = %config.version, "System config created");
    Ok((StatusCode::CREATED, Json(config)))
}

/// PUT /api/v1/system-config/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSystemConfig>,
) -> AppResult<Json<SystemConfig>> {
    let config = SystemConfigRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SystemConfig",
            id,
        }))?;
    Ok(Json(config))
}

/// DELETE /api/v1/system-config/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SystemConfigRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SystemConfig",
            id,
        }))
    }
}
