//! Coordinate validation and Haversine great-circle distance.
//!
//! Contract:
//! - An invalid point must never silently produce a numeric distance, so both
//!   endpoints are range-checked before any trigonometry.
//! - Earth is modelled as a sphere of radius 6,371,000 m; planar
//!   approximations are rejected because survey areas can span distances where
//!   curvature affects metre-level accuracy.
//! - Distances are reported in metres, rounded to 2 decimals.

use svy_core::entities::GeoPoint;
use svy_core::errors::CoreError;
use svy_core::rounding::round2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spherical-earth model radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Result of a coordinate range check: valid, or one message per bad axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Range-check a coordinate pair, collecting every violation.
pub fn coordinate_report(lat: f64, lng: f64) -> CoordinateReport {
    let mut errors = Vec::new();
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        errors.push(format!("latitude out of range [-90, 90]: {lat}"));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        errors.push(format!("longitude out of range [-180, 180]: {lng}"));
    }
    CoordinateReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Range-check a coordinate pair, failing fast on the first violation.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), CoreError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(CoreError::InvalidParameter("lat"));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(CoreError::InvalidParameter("lng"));
    }
    Ok(())
}

/// Great-circle distance between two points, in metres (2 decimals).
pub fn haversine_distance_m(a: &GeoPoint, b: &GeoPoint) -> Result<f64, CoreError> {
    validate_coordinates(a.lat, a.lng)?;
    validate_coordinates(b.lat, b.lng)?;

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    // Floating rounding can push the sum marginally past 1 for near-antipodal
    // pairs; clamp so `(1 - h).sqrt()` cannot produce NaN.
    let h = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Ok(round2(EARTH_RADIUS_M * c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_millidegree_scenario() {
        // Two points 0.001° latitude apart at the equator: ≈ 111.19 m under
        // the R = 6,371,000 m model.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.001, 0.0);
        let d = haversine_distance_m(&a, &b).unwrap();
        assert_eq!(d, 111.19);
    }

    #[test]
    fn reflexive_and_symmetric() {
        let p = GeoPoint::new(-23.55052, -46.633308);
        let q = GeoPoint::new(-23.5489, -46.6388);
        assert_eq!(haversine_distance_m(&p, &p).unwrap(), 0.0);
        assert_eq!(
            haversine_distance_m(&p, &q).unwrap(),
            haversine_distance_m(&q, &p).unwrap()
        );
    }

    #[test]
    fn antimeridian_neighbours_are_close() {
        let a = GeoPoint::new(0.0, 179.9995);
        let b = GeoPoint::new(0.0, -179.9995);
        let d = haversine_distance_m(&a, &b).unwrap();
        // 0.001° of longitude at the equator, crossing the antimeridian.
        assert_eq!(d, 111.19);
    }

    #[test]
    fn antipodal_pairs_stay_finite() {
        // Exactly and nearly antipodal pairs must yield the half-circumference
        // (π × R ≈ 20,015,086.8 m), never NaN.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        assert_eq!(haversine_distance_m(&a, &b).unwrap(), 20_015_086.8);

        let near = GeoPoint::new(0.0000001, 179.9999999);
        let d = haversine_distance_m(&a, &near).unwrap();
        assert!(d.is_finite());
        assert!((d - 20_015_086.8).abs() < 1.0);
    }

    #[test]
    fn out_of_range_points_never_yield_distances() {
        let good = GeoPoint::new(0.0, 0.0);
        for bad in [
            GeoPoint::new(90.1, 0.0),
            GeoPoint::new(-90.1, 0.0),
            GeoPoint::new(0.0, 180.1),
            GeoPoint::new(0.0, -180.1),
            GeoPoint::new(f64::NAN, 0.0),
        ] {
            assert!(haversine_distance_m(&good, &bad).is_err());
            assert!(haversine_distance_m(&bad, &good).is_err());
        }
    }

    #[test]
    fn report_collects_both_axes() {
        let r = coordinate_report(91.0, -200.0);
        assert!(!r.is_valid);
        assert_eq!(r.errors.len(), 2);
        assert!(r.errors[0].contains("latitude"));
        assert!(r.errors[1].contains("longitude"));

        let ok = coordinate_report(45.0, 170.0);
        assert!(ok.is_valid);
        assert!(ok.errors.is_empty());
    }
}
