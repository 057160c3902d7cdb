//! Listing status sets and write-time derivations.

use crate::error::CoreError;
use crate::types::Timestamp;

pub const LISTING_TYPE_SALE: &str = "sale";
pub const LISTING_TYPE_RENT: &str = "rent";
pub const LISTING_TYPE_AUCTION: &str = "auction";
pub const LISTING_TYPE_LEASE_TO_OWN: &str = "lease_to_own";

/// All valid listing types.
pub const VALID_LISTING_TYPES: &[&str] = &[
    LISTING_TYPE_SALE,
    LISTING_TYPE_RENT,
    LISTING_TYPE_AUCTION,
    LISTING_TYPE_LEASE_TO_OWN,
];

/// Valid pet policy values (empty string means unspecified).
pub const VALID_PET_POLICIES: &[&str] = &["allowed", "not_allowed", "case_by_case"];

/// Validate that a listing type is one of the allowed values.
pub fn validate_listing_type(listing_type: &str) -> Result<(), CoreError> {
    if VALID_LISTING_TYPES.contains(&listing_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid listing type '{listing_type}'. Must be one of: {}",
            VALID_LISTING_TYPES.join(", ")
        )))
    }
}

/// Validate a listing price: finite and non-negative.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "Price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

/// Days on market, derived at write time from the listed and contract dates.
///
/// Zero when no contract has been signed yet, or when the contract date
/// somehow precedes the listed date.
pub fn days_on_market(listed_date: Timestamp, contract_date: Option<Timestamp>) -> i32 {
    match contract_date {
        Some(contract) => (contract - listed_date).num_days().max(0) as i32,
        None => 0,
    }
}

/// Percentage change from `old_price` to `new_price`, derived at write time
/// when a price-history row is recorded. `None` when the old price is zero.
pub fn price_change_pct(old_price: f64, new_price: f64) -> Option<f64> {
    if old_price == 0.0 {
        None
    } else {
        Some((new_price - old_price) / old_price * 100.0)
    }
}
