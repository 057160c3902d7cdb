//! System-configuration model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A versioned configuration record. At most one row is active; activating a
/// row deactivates the others inside the same transaction.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemConfig {
    pub id: DbId,
    pub name: String,
    pub version: String,
    pub is_active: bool,
    pub settings: Option<serde_json::Value>,
    pub description: String,
    pub maintenance_mode: bool,
    pub default_currency: String,
    pub max_upload_size_mb: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateSystemConfig {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub is_active: bool,
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_upload_size")]
    pub max_upload_size_mb: i32,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_upload_size() -> i32 {
    10
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSystemConfig {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub settings: Option<serde_json::Value>,
    pub description: Option<String>,
    pub maintenance_mode: Option<bool>,
    pub default_currency: Option<String>,
    pub max_upload_size_mb: Option<i32>,
}
