//! Banner model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Banner {
    pub id: DbId,
    pub campaign_id: DbId,
    pub title: String,
    pub image_url: String,
    pub target_url: String,
    pub size: String,
    pub placement: String,
    pub status: String,
    pub impressions: i64,
    pub clicks: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateBanner {
    pub campaign_id: DbId,
    pub title: String,
    pub image_url: String,
    pub target_url: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_placement")]
    pub placement: String,
}

fn default_size() -> String {
    "728x90".to_string()
}

fn default_placement() -> String {
    "header".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBanner {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub size: Option<String>,
    pub placement: Option<String>,
    pub status: Option<String>,
}
