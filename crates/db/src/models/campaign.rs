//! Ad-campaign model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An ad campaign row.
///
/// `remaining_budget` is derived from `budget - total_spent` on every write;
/// it is never accepted from the client. Targeting blobs are schema-less
/// JSON, matching whatever the advertiser's tooling sends.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdCampaign {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub status: String,
    pub approval_status: String,
    pub rejection_reason: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub budget: f64,
    pub bid_strategy: String,
    pub bid_amount: f64,
    pub target_audience: Option<serde_json::Value>,
    pub target_locations: Option<serde_json::Value>,
    pub target_devices: Option<serde_json::Value>,
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub budget: f64,
    #[serde(default = "default_bid_strategy")]
    pub bid_strategy: String,
    pub bid_amount: f64,
    pub target_audience: Option<serde_json::Value>,
    pub target_locations: Option<serde_json::Value>,
    pub target_devices: Option<serde_json::Value>,
}

fn default_bid_strategy() -> String {
    "cpm".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub budget: Option<f64>,
    pub bid_strategy: Option<String>,
    pub bid_amount: Option<f64>,
    pub target_audience: Option<serde_json::Value>,
    pub target_locations: Option<serde_json::Value>,
    pub target_devices: Option<serde_json::Value>,
    pub total_spent: Option<f64>,
}
