//! Listing, photo, and price-history models and DTOs.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A listing row: a for-sale/rent offer tied to one property.
///
/// `days_on_market` is derived from `listed_date`/`contract_date` on every
/// write; it is never accepted from the client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub property_id: DbId,
    pub user_id: DbId,
    pub listing_type: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: f64,
    pub square_footage: Option<i32>,
    pub floor: Option<i32>,
    pub is_active: bool,
    pub listed_date: Timestamp,
    pub contract_date: Option<Timestamp>,
    pub closing_date: Option<Timestamp>,
    pub days_on_market: i32,
    pub views_count: i32,
    pub inquiries_count: i32,
    pub description: String,
    pub pet_policy: Option<String>,
    pub maintenance_fee: Option<f64>,
    pub hoa_fee: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A listing row joined with its address coordinates, returned by the
/// map/radius queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeoListing {
    pub id: DbId,
    pub property_id: DbId,
    pub listing_type: String,
    pub price: f64,
    pub bedrooms: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateListing {
    pub property_id: DbId,
    #[serde(default = "default_listing_type")]
    pub listing_type: String,
    pub price: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_footage: Option<i32>,
    pub floor: Option<i32>,
    #[serde(default)]
    pub description: String,
    pub pet_policy: Option<String>,
    pub maintenance_fee: Option<f64>,
    pub hoa_fee: Option<f64>,
}

fn default_listing_type() -> String {
    "sale".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateListing {
    pub listing_type: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_footage: Option<i32>,
    pub floor: Option<i32>,
    pub contract_date: Option<Timestamp>,
    pub closing_date: Option<Timestamp>,
    pub description: Option<String>,
    pub pet_policy: Option<String>,
    pub maintenance_fee: Option<f64>,
    pub hoa_fee: Option<f64>,
    /// Recorded on the price-history row when the price changes.
    pub price_change_reason: Option<String>,
}

/// Optional list filters for `GET /listings`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingFilter {
    pub listing_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// A listing photo row. Only the storage location is persisted; upload
/// storage itself is external.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingPhoto {
    pub id: DbId,
    pub listing_id: DbId,
    pub url: String,
    pub caption: String,
    pub is_primary: bool,
    pub sort_order: i32,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateListingPhoto {
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// A price-change row. `change_pct` is derived at write time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceHistory {
    pub id: DbId,
    pub listing_id: DbId,
    pub old_price: f64,
    pub new_price: f64,
    pub change_pct: Option<f64>,
    pub reason: String,
    pub changed_at: Timestamp,
}
