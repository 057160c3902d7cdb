//! Saved-search model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A saved search row. `criteria` and `search_area` are schema-less JSON,
/// matching whatever the client persisted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SavedSearch {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub criteria: serde_json::Value,
    pub search_area: Option<serde_json::Value>,
    pub notify_on_match: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateSavedSearch {
    pub name: String,
    pub criteria: serde_json::Value,
    pub search_area: Option<serde_json::Value>,
    #[serde(default = "default_notify")]
    pub notify_on_match: bool,
}

fn default_notify() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSavedSearch {
    pub name: Option<String>,
    pub criteria: Option<serde_json::Value>,
    pub search_area: Option<serde_json::Value>,
    pub notify_on_match: Option<bool>,
    pub is_active: Option<bool>,
}
