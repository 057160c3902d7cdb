//! School models and DTOs.

use homegrid_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct School {
    pub id: DbId,
    pub name: String,
    pub school_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSchool {
    pub name: String,
    #[serde(default = "default_school_type")]
    pub school_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<i32>,
}

fn default_school_type() -> String {
    "elementary".to_string()
}

/// A school linked to a property, with the stored walking context and the
/// straight-line distance from the property's address.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertySchool {
    pub id: DbId,
    pub school_id: DbId,
    pub name: String,
    pub school_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_meters: f64,
    pub walking_time_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LinkSchool {
    pub school_id: DbId,
    pub walking_time_minutes: Option<i32>,
}
