//! Handlers for the `/messages` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::error::CoreError;
use homegrid_core::messaging::{validate_message, validate_message_type};
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_db::models::message::{CreateMessage, Message};
use homegrid_db::repositories::{MessageRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Flat query struct: `serde_urlencoded` cannot deserialize flattened
/// structs with non-string fields, so mailbox and pagination parameters are
/// declared inline.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    /// `inbox` (default) or `sent`.
    pub mailbox: Option<String>,
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/messages
///
/// Send a message. Replies must thread under a message the sender was a
/// party to.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    validate_message(&input.subject, &input.body)?;
    validate_message_type(&input.message_type)?;

    if input.recipient_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot send a message to yourself".into(),
        )));
    }
    let recipient = UserRepo::find_by_id(&state.pool, input.recipient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.recipient_id,
        }))?;
    if !recipient.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Recipient account is deactivated".into(),
        )));
    }

    if let Some(parent_id) = input.parent_id {
        let parent = MessageRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Message",
                id: parent_id,
            }))?;
        if parent.sender_id != auth.user_id && parent.recipient_id != auth.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot reply to a conversation you are not part of".into(),
            )));
        }
    }

    let message = MessageRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/messages?mailbox=inbox|sent&unread_only=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MessageListQuery>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let limit = clamp_limit(query.limit);
    let offset = clamp_offset(query.offset);

    let data = match query.mailbox.as_deref() {
        Some("sent") => MessageRepo::list_sent(&state.pool, auth.user_id, limit, offset).await?,
        None | Some("inbox") => {
            MessageRepo::list_inbox(&state.pool, auth.user_id, query.unread_only, limit, offset)
                .await?
        }
        Some(other) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown mailbox '{other}'. Must be 'inbox' or 'sent'"
            ))));
        }
    };
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/messages/{id}
///
/// Participant-only read, with the reply thread attached.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let message = fetch_participant(&state, &auth, id).await?;
    let replies = MessageRepo::list_replies(&state.pool, id).await?;

    let value = serde_json::json!({
        "message": message,
        "replies": replies,
    });
    Ok(Json(value))
}

/// POST /api/v1/messages/{id}/mark-read
///
/// Recipient-only. Idempotent: the first call stamps `read_at`, later calls
/// change nothing.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Message>> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id,
        }))?;
    if message.recipient_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the recipient may mark a message read".into(),
        )));
    }

    let updated = MessageRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/messages/{id}
///
/// Participant-only hard delete.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    fetch_participant(&state, &auth, id).await?;
    MessageRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Load a message and require the caller to be sender, recipient, or staff.
async fn fetch_participant(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Message> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id,
        }))?;
    let is_participant =
        message.sender_id == auth.user_id || message.recipient_id == auth.user_id;
    if !is_participant && !auth.is_staff() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot access a conversation you are not part of".into(),
        )));
    }
    Ok(message)
}
