//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `homegrid_core::pagination` before reaching the
/// repository layer: default 20, maximum 100.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for every radius-search endpoint.
#[derive(Debug, Deserialize)]
pub struct RadiusParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
}

impl RadiusParams {
    /// Default search radius when the client does not supply one.
    pub const DEFAULT_RADIUS_KM: f64 = 5.0;

    pub fn radius_km(&self) -> f64 {
        self.radius_km.unwrap_or(Self::DEFAULT_RADIUS_KM)
    }
}
