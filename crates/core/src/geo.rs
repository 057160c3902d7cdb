//! Geospatial primitives: coordinate validation, approximate bounding-box
//! radius search, and great-circle distance.
//!
//! Radius searches use a flat degree conversion (`radius_km / 111`) to build
//! a bounding square around the center. The square over-selects near its
//! corners and applies no cos(latitude) correction to the longitude delta;
//! callers that need a true distance compute it with [`haversine_km`] after
//! the box pre-filter. Out-of-range coordinates and radii are rejected up
//! front instead of silently producing an empty or wrong result set.

use crate::error::CoreError;

/// Kilometers per degree of latitude (and, uncorrected, of longitude).
pub const KM_PER_DEGREE: f64 = 111.0;

/// Mean Earth radius in kilometers, used by [`haversine_km`].
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting coordinates outside [-90, 90] / [-180, 180]
    /// or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Validate a latitude/longitude pair.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "Latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "Longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}

/// Validate a search radius in kilometers. Zero is allowed and degenerates
/// to an exact-point match.
pub fn validate_radius_km(radius_km: f64) -> Result<(), CoreError> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(CoreError::Validation(format!(
            "Radius must be a non-negative number of kilometers, got {radius_km}"
        )));
    }
    Ok(())
}

/// An axis-aligned bounding box in degrees.
///
/// Built from a center and radius via [`BoundingBox::around`]; the repository
/// layer binds the four bounds directly into `BETWEEN` clauses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Bounding square of `radius_km` around `center`.
    ///
    /// The degree delta is `radius_km / 111` on both axes. The box is a
    /// superset of the true circle of the same radius: every point within
    /// `radius_km` of the center (by flat-earth distance) is inside the box,
    /// and points near the corners up to `radius_km * sqrt(2)` away are
    /// over-selected. Latitude bounds are clamped to the valid range;
    /// longitude bounds are not wrapped across the antimeridian, matching
    /// the stored-coordinate semantics of the search tables.
    pub fn around(center: GeoPoint, radius_km: f64) -> Result<Self, CoreError> {
        validate_radius_km(radius_km)?;
        let delta = radius_km / KM_PER_DEGREE;
        Ok(Self {
            min_latitude: (center.latitude - delta).max(-90.0),
            max_latitude: (center.latitude + delta).min(90.0),
            min_longitude: center.longitude - delta,
            max_longitude: center.longitude + delta,
        })
    }

    /// Whether a point lies inside the box (inclusive on all edges).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_latitude
            && latitude <= self.max_latitude
            && longitude >= self.min_longitude
            && longitude <= self.max_longitude
    }
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).expect("valid test point")
    }

    // --- Coordinate validation ---

    #[test]
    fn validate_coordinates_accepts_range_limits() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(0.0, 0.0).is_ok());
    }

    #[test]
    fn validate_coordinates_rejects_out_of_range() {
        let err = validate_coordinates(90.1, 0.0).unwrap_err();
        assert!(err.to_string().contains("Latitude"));

        let err = validate_coordinates(0.0, -180.5).unwrap_err();
        assert!(err.to_string().contains("Longitude"));
    }

    #[test]
    fn validate_coordinates_rejects_non_finite() {
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn validate_radius_rejects_negative_and_nan() {
        assert!(validate_radius_km(-0.1).is_err());
        assert!(validate_radius_km(f64::NAN).is_err());
        assert!(validate_radius_km(0.0).is_ok());
    }

    // --- Bounding box ---

    #[test]
    fn bounding_box_uses_flat_degree_delta() {
        let center = p(40.7128, -74.0060);
        let bbox = BoundingBox::around(center, 5.0).unwrap();

        let delta = 5.0 / KM_PER_DEGREE;
        assert!((bbox.min_latitude - (40.7128 - delta)).abs() < 1e-12);
        assert!((bbox.max_latitude - (40.7128 + delta)).abs() < 1e-12);
        assert!((bbox.min_longitude - (-74.0060 - delta)).abs() < 1e-12);
        assert!((bbox.max_longitude - (-74.0060 + delta)).abs() < 1e-12);
    }

    #[test]
    fn bounding_box_contains_center_and_is_deterministic() {
        let center = p(51.5074, -0.1278);
        let a = BoundingBox::around(center, 10.0).unwrap();
        let b = BoundingBox::around(center, 10.0).unwrap();
        assert_eq!(a, b);
        assert!(a.contains(center.latitude, center.longitude));
    }

    /// The box must never under-select within its inscribed circle: any point
    /// at most `radius_km` (flat distance) from the center is inside the box.
    #[test]
    fn bounding_box_is_superset_of_inscribed_circle() {
        let center = p(40.7128, -74.0060);
        let radius_km = 5.0;
        let bbox = BoundingBox::around(center, radius_km).unwrap();

        let delta = radius_km / KM_PER_DEGREE;
        // Sweep points on the inscribed circle's rim.
        for i in 0..360 {
            let theta = (i as f64).to_radians();
            let lat = center.latitude + delta * theta.sin();
            let lon = center.longitude + delta * theta.cos();
            assert!(
                bbox.contains(lat, lon),
                "point at bearing {i} deg fell outside the box"
            );
        }
    }

    #[test]
    fn bounding_box_over_selects_at_corners() {
        let center = p(0.0, 0.0);
        let bbox = BoundingBox::around(center, 111.0).unwrap();

        // Corner is ~sqrt(2) degrees out, beyond the 1-degree circle, but
        // still inside the box. Expected, not a bug.
        assert!(bbox.contains(1.0, 1.0));
        assert!(haversine_km(center, p(1.0, 1.0)) > 111.0);
    }

    #[test]
    fn zero_radius_degenerates_to_center_point() {
        let center = p(40.0, -73.0);
        let bbox = BoundingBox::around(center, 0.0).unwrap();
        assert!(bbox.contains(40.0, -73.0));
        assert!(!bbox.contains(40.0001, -73.0));
    }

    #[test]
    fn bounding_box_clamps_latitude_at_poles() {
        let bbox = BoundingBox::around(p(89.9, 0.0), 50.0).unwrap();
        assert!(bbox.max_latitude <= 90.0);
    }

    // --- Haversine ---

    #[test]
    fn haversine_zero_for_identical_points() {
        let a = p(40.7128, -74.0060);
        assert!(haversine_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = p(40.7128, -74.0060);
        let b = p(34.0522, -118.2437);
        let d1 = haversine_km(a, b);
        let d2 = haversine_km(b, a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn haversine_nyc_to_la_roughly_3940_km() {
        let nyc = p(40.7128, -74.0060);
        let la = p(34.0522, -118.2437);
        let d = haversine_km(nyc, la);
        assert!((3900.0..4000.0).contains(&d), "got {d} km");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(p(0.0, 0.0), p(1.0, 0.0));
        assert!((d - KM_PER_DEGREE).abs() < 1.0, "got {d} km");
    }
}
