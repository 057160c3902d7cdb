//! Handlers for the `/support-tickets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::ticket::{
    validate_category, validate_escalation_level, validate_priority, validate_status,
};
use homegrid_core::types::DbId;
use homegrid_db::models::ticket::{CreateTicket, SupportTicket, UpdateTicket};
use homegrid_db::repositories::TicketRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/support-tickets
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTicket>,
) -> AppResult<(StatusCode, Json<SupportTicket>)> {
    if input.subject.trim().is_empty() || input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Ticket subject and description must not be empty".into(),
        )));
    }
    validate_category(&input.category)?;
    validate_priority(&input.priority)?;

    let ticket = TicketRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(ticket_id = ticket.id, "Support ticket opened");
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/v1/support-tickets
///
/// The authenticated user's own tickets.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<SupportTicket>>>> {
    let data = TicketRepo::list_by_user(
        &state.pool,
        auth.user_id,
        clamp_limit(pagination.limit),
        clamp_offset(pagination.offset),
    )
    .await?;
    Ok(Json(DataResponse { data }))
}

/// Flat query struct (`serde_urlencoded` cannot deserialize flattened
/// structs with non-string fields).
#[derive(Debug, Deserialize)]
pub struct TicketQueueQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/support-tickets/queue
///
/// Staff view of all tickets, optionally filtered by status.
pub async fn queue(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(query): Query<TicketQueueQuery>,
) -> AppResult<Json<DataResponse<Vec<SupportTicket>>>> {
    if let Some(status) = &query.status {
        validate_status(status)?;
    }
    let data = TicketRepo::list(
        &state.pool,
        query.status.as_deref(),
        clamp_limit(query.limit),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/support-tickets/{id}
///
/// Owner-or-staff read.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SupportTicket>> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))?;
    if !auth.can_access(ticket.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot view another user's ticket".into(),
        )));
    }
    Ok(Json(ticket))
}

/// PUT /api/v1/support-tickets/{id}
///
/// Staff-only triage: status, priority, assignment, escalation, resolution.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<Json<SupportTicket>> {
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }
    if let Some(level) = input.escalation_level {
        validate_escalation_level(level)?;
    }

    let ticket = TicketRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))?;
    Ok(Json(ticket))
}

/// DELETE /api/v1/support-tickets/{id}
///
/// Staff-only.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TicketRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))
    }
}
