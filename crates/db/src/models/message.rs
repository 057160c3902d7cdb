//! Message model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A directed message between two users. Threads are modeled by `parent_id`
/// referencing another message row; relations are looked up by id, never
/// embedded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub subject: String,
    pub body: String,
    pub message_type: String,
    pub parent_id: Option<DbId>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub priority: String,
    pub attachment_metadata: Option<serde_json::Value>,
    pub sent_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub recipient_id: DbId,
    #[serde(default)]
    pub subject: String,
    pub body: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    pub parent_id: Option<DbId>,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub attachment_metadata: Option<serde_json::Value>,
}

fn default_message_type() -> String {
    "text".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}
