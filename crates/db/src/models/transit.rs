//! Transit stop models and DTOs.

use homegrid_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transit {
    pub id: DbId,
    pub name: String,
    pub transit_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub operator: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransit {
    pub name: String,
    #[serde(default = "default_transit_type")]
    pub transit_type: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub operator: String,
}

fn default_transit_type() -> String {
    "subway".to_string()
}

/// A transit stop linked to a property, with the stored walking context and
/// the straight-line distance from the property's address.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyTransit {
    pub id: DbId,
    pub transit_id: DbId,
    pub name: String,
    pub transit_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_meters: f64,
    pub walking_time_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LinkTransit {
    pub transit_id: DbId,
    pub walking_time_minutes: Option<i32>,
}
