//! Support-ticket model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<DbId>,
    pub resolution_notes: Option<String>,
    pub resolved_at: Option<Timestamp>,
    pub escalation_level: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicket {
    pub subject: String,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_category() -> String {
    "other".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

/// DTO for staff updates: status transitions, assignment, resolution.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicket {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
    pub resolution_notes: Option<String>,
    pub escalation_level: Option<i32>,
}
