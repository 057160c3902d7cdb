//! Map-cluster model and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A cached aggregate for a fixed geographic circle. Counts and average
/// price are recomputed from the listings inside the circle's bounding box;
/// they are advisory display values, not a ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MapCluster {
    pub id: DbId,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub radius_km: f64,
    pub property_count: i64,
    pub listing_count: i64,
    pub avg_price: Option<f64>,
    pub last_refreshed: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMapCluster {
    pub center_latitude: f64,
    pub center_longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    5.0
}
