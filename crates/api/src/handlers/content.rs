//! Handlers for administrative content: FAQs, legal documents,
//! announcements, and the contact form. Public read of published content,
//! staff-only writes; contact creation is public.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homegrid_core::cache as cache_keys;
use homegrid_core::error::CoreError;
use homegrid_core::pagination::{clamp_limit, clamp_offset};
use homegrid_core::types::DbId;
use homegrid_core::user::validate_email;
use homegrid_db::models::content::{
    Announcement, ContactMessage, CreateAnnouncement, CreateContactMessage, CreateFaq,
    CreateLegalDocument, Faq, LegalDocument, UpdateAnnouncement, UpdateFaq, UpdateLegalDocument,
};
use homegrid_db::repositories::{
    AnnouncementRepo, ContactMessageRepo, FaqRepo, LegalDocumentRepo,
};
use serde::Deserialize;

use crate::cache::TTL_LIST_SECS;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// FAQs
// ---------------------------------------------------------------------------

/// GET /api/v1/faqs
///
/// Published FAQs in display order, memoized.
pub async fn list_faqs(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let key = cache_keys::list_key("faq", &[]);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(cached));
    }

    let faqs = FaqRepo::list(&state.pool, false).await?;
    let value = serde_json::to_value(DataResponse { data: faqs })
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    state
        .cache
        .put(&key, &cache_keys::list_tags("faq"), &value, TTL_LIST_SECS)
        .await;
    Ok(Json(value))
}

/// POST /api/v1/faqs
pub async fn create_faq(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateFaq>,
) -> AppResult<(StatusCode, Json<Faq>)> {
    if input.question.trim().is_empty() || input.answer.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "FAQ question and answer must not be empty".into(),
        )));
    }
    let faq = FaqRepo::create(&state.pool, &input).await?;
    state.cache.invalidate(&cache_keys::entity_tag("faq")).await;
    Ok((StatusCode::CREATED, Json(faq)))
}

/// PUT /api/v1/faqs/{id}
pub async fn update_faq(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaq>,
) -> AppResult<Json<Faq>> {
    let faq = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Faq", id }))?;
    state.cache.invalidate(&cache_keys::entity_tag("faq")).await;
    Ok(Json(faq))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete_faq(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FaqRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Faq", id }));
    }
    state.cache.invalidate(&cache_keys::entity_tag("faq")).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Legal documents
// ---------------------------------------------------------------------------

/// GET /api/v1/legal-documents
pub async fn list_legal(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<LegalDocument>>>> {
    let data = LegalDocumentRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/legal-documents/{slug}
///
/// The currently effective published version of a document.
pub async fn get_legal_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<LegalDocument>> {
    let document = LegalDocumentRepo::find_current_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "No published legal document for slug '{slug}'"
            )))
        })?;
    Ok(Json(document))
}

/// POST /api/v1/legal-documents
pub async fn create_legal(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateLegalDocument>,
) -> AppResult<(StatusCode, Json<LegalDocument>)> {
    if input.slug.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Legal document slug and body must not be empty".into(),
        )));
    }
    let document = LegalDocumentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/v1/legal-documents/{id}
pub async fn update_legal(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLegalDocument>,
) -> AppResult<Json<LegalDocument>> {
    let document = LegalDocumentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LegalDocument",
            id,
        }))?;
    Ok(Json(document))
}

/// DELETE /api/v1/legal-documents/{id}
pub async fn delete_legal(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LegalDocumentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "LegalDocument",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

/// Valid announcement audiences.
const VALID_AUDIENCES: &[&str] = &["all", "buyers", "sellers", "agents"];

/// GET /api/v1/announcements
///
/// Published announcements currently inside their display window.
pub async fn list_announcements(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    let data = AnnouncementRepo::list_current(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/announcements/all
///
/// Staff view including unpublished and expired announcements.
pub async fn list_all_announcements(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    let data = AnnouncementRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    if !VALID_AUDIENCES.contains(&input.audience.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid audience '{}'. Must be one of: {}",
            input.audience,
            VALID_AUDIENCES.join(", ")
        ))));
    }
    let announcement = AnnouncementRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// PUT /api/v1/announcements/{id}
pub async fn update_announcement(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncement>,
) -> AppResult<Json<Announcement>> {
    if let Some(audience) = &input.audience {
        if !VALID_AUDIENCES.contains(&audience.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid audience '{audience}'"
            ))));
        }
    }
    let announcement = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    Ok(Json(announcement))
}

/// DELETE /api/v1/announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AnnouncementRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

/// POST /api/v1/contact-messages
///
/// Public contact form.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    validate_email(&input.email)?;
    if input.subject.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Subject and body must not be empty".into(),
        )));
    }
    let message = ContactMessageRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Flat query struct (`serde_urlencoded` cannot deserialize flattened
/// structs with non-string fields).
#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/contact-messages
///
/// Staff triage listing.
pub async fn list_contact(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(query): Query<ContactListQuery>,
) -> AppResult<Json<DataResponse<Vec<ContactMessage>>>> {
    let data = ContactMessageRepo::list(
        &state.pool,
        query.status.as_deref(),
        clamp_limit(query.limit),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(DataResponse { data }))
}

#[derive(Debug, Deserialize)]
pub struct ContactStatusRequest {
    pub status: String,
}

/// PUT /api/v1/contact-messages/{id}/status
pub async fn set_contact_status(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<ContactStatusRequest>,
) -> AppResult<Json<ContactMessage>> {
    const VALID_STATUSES: &[&str] = &["new", "in_progress", "closed"];
    if !VALID_STATUSES.contains(&input.status.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid status '{}'. Must be one of: {}",
            input.status,
            VALID_STATUSES.join(", ")
        ))));
    }
    let message = ContactMessageRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))?;
    Ok(Json(message))
}
