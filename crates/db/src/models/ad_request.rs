//! Ad-request model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A request for an ad slot. Created `pending`, then either served (stamped
/// with the chosen banner) or rejected.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub banner_id: Option<DbId>,
    pub context: Option<serde_json::Value>,
    pub status: String,
    pub served_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdRequest {
    pub context: Option<serde_json::Value>,
}
