//! Handlers for the `/saved-searches` resource (owner-only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::types::DbId;
use homegrid_db::models::saved_search::{CreateSavedSearch, SavedSearch, UpdateSavedSearch};
use homegrid_db::repositories::SavedSearchRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/saved-searches
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateSavedSearch>,
) -> AppResult<(StatusCode, Json<SavedSearch>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Search name must not be empty".into(),
        )));
    }
    let search = SavedSearchRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(search)))
}

/// GET /api/v1/saved-searches
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SavedSearch>>>> {
    let data = SavedSearchRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/saved-searches/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SavedSearch>> {
    let search = fetch_owned(&state, &auth, id).await?;
    Ok(Json(search))
}

/// PUT /api/v1/saved-searches/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSavedSearch>,
) -> AppResult<Json<SavedSearch>> {
    fetch_owned(&state, &auth, id).await?;
    let search = SavedSearchRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SavedSearch",
            id,
        }))?;
    Ok(Json(search))
}

/// DELETE /api/v1/saved-searches/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    fetch_owned(&state, &auth, id).await?;
    SavedSearchRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Load a saved search and enforce the owner-or-staff predicate.
async fn fetch_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<SavedSearch> {
    let search = SavedSearchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SavedSearch",
            id,
        }))?;
    if !auth.can_access(search.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot access another user's saved search".into(),
        )));
    }
    Ok(search)
}
