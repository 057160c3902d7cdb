//! Property and address models and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A property row: a building or unit that listings attach to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub building_name: String,
    pub property_type: String,
    pub status: String,
    pub address_id: Option<DbId>,
    pub owner_id: DbId,
    pub total_units: i32,
    pub year_built: Option<i32>,
    pub floors: i32,
    pub views_count: i32,
    pub favorites_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A property-specific address row carrying the geolocation used by every
/// proximity query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Address {
    pub id: DbId,
    pub street_address: String,
    pub unit_number: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub neighborhood: Option<String>,
    pub borough: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub walk_score: Option<i32>,
    pub transit_score: Option<i32>,
}

/// DTO for creating an address.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddress {
    pub street_address: String,
    pub unit_number: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub neighborhood: Option<String>,
    pub borough: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub walk_score: Option<i32>,
    pub transit_score: Option<i32>,
}

/// DTO for creating a property together with its address.
#[derive(Debug, Deserialize)]
pub struct CreateProperty {
    #[serde(default)]
    pub building_name: String,
    pub property_type: String,
    pub address: CreateAddress,
    pub total_units: Option<i32>,
    pub year_built: Option<i32>,
    pub floors: Option<i32>,
}

/// DTO for updating a property. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProperty {
    pub building_name: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub total_units: Option<i32>,
    pub year_built: Option<i32>,
    pub floors: Option<i32>,
}

/// Optional list filters, built from query parameters the client actually
/// sent.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyFilter {
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub min_units: Option<i32>,
}
