//! Open-house model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OpenHouse {
    pub id: DbId,
    pub listing_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub registration_required: bool,
    pub attendees_count: i32,
    pub rsvp_deadline: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOpenHouse {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub registration_required: bool,
    pub rsvp_deadline: Option<Timestamp>,
}
