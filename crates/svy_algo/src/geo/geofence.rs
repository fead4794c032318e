//! Geofence verdicts and coverage bounds.
//!
//! A geofence is a circular boundary around an area centre; validity is a pure
//! comparison of Haversine distance against the allowed radius. No hysteresis
//! and no smoothing across repeated calls: each call is a fresh, independent
//! verdict, and any debouncing of flapping GPS fixes belongs to the caller's
//! polling loop.

use svy_core::entities::{GeoPoint, GeofenceVerdict};
use svy_core::errors::CoreError;

use crate::geo::haversine::{haversine_distance_m, validate_coordinates, EARTH_RADIUS_M};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collection radius used when an area does not configure its own.
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 100.0;

/// Check a current position against an area centre and allowed radius.
///
/// The boundary itself is inside the fence: `distance == max_distance_m`
/// is valid, anything beyond is not.
pub fn validate_geofence(
    current: &GeoPoint,
    area_center: &GeoPoint,
    max_distance_m: f64,
) -> Result<GeofenceVerdict, CoreError> {
    if !max_distance_m.is_finite() || max_distance_m <= 0.0 {
        return Err(CoreError::InvalidParameter("maxDistance"));
    }

    let distance = haversine_distance_m(current, area_center)?;

    Ok(GeofenceVerdict {
        is_valid: distance <= max_distance_m,
        distance_from_center_m: distance,
        max_allowed_distance_m: max_distance_m,
    })
}

/// Axis-aligned bounding box of a circular coverage area, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverageBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Approximate bounding box of the circle `radius_m` around `center`.
///
/// Equirectangular approximation; adequate for the sub-kilometre radii used
/// for collection areas. Degenerates near the poles, so polar centres are
/// rejected rather than returning an unbounded longitude span.
pub fn coverage_bounds(center: &GeoPoint, radius_m: f64) -> Result<CoverageBounds, CoreError> {
    validate_coordinates(center.lat, center.lng)?;
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(CoreError::InvalidParameter("radius"));
    }

    let lat_delta = (radius_m / EARTH_RADIUS_M).to_degrees();
    let cos_lat = center.lat.to_radians().cos();
    if cos_lat <= f64::EPSILON {
        return Err(CoreError::InvalidParameter("center latitude at pole"));
    }
    let lng_delta = lat_delta / cos_lat;

    Ok(CoverageBounds {
        north: center.lat + lat_delta,
        south: center.lat - lat_delta,
        east: center.lng + lng_delta,
        west: center.lng - lng_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_flips_exactly_at_boundary() {
        let center = GeoPoint::new(0.0, 0.0);
        // 0.001° of latitude ≈ 111.19 m (2-decimal rounded distance).
        let probe = GeoPoint::new(0.001, 0.0);

        let on = validate_geofence(&probe, &center, 111.19).unwrap();
        assert!(on.is_valid, "distance == max must be valid");
        assert_eq!(on.distance_from_center_m, 111.19);

        let off = validate_geofence(&probe, &center, 111.18).unwrap();
        assert!(!off.is_valid, "distance beyond max must be invalid");
        assert_eq!(off.max_allowed_distance_m, 111.18);
    }

    #[test]
    fn default_radius_gates_at_100m() {
        let center = GeoPoint::new(-23.55052, -46.633308);
        let near = GeoPoint::new(-23.5508, -46.6333);
        let v = validate_geofence(&near, &center, DEFAULT_GEOFENCE_RADIUS_M).unwrap();
        assert!(v.distance_from_center_m < 100.0);
        assert!(v.is_valid);
    }

    #[test]
    fn bad_radius_is_a_configuration_error() {
        let p = GeoPoint::new(0.0, 0.0);
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                validate_geofence(&p, &p, r),
                Err(CoreError::InvalidParameter("maxDistance"))
            );
        }
    }

    #[test]
    fn invalid_points_propagate() {
        let good = GeoPoint::new(0.0, 0.0);
        let bad = GeoPoint::new(120.0, 0.0);
        assert!(validate_geofence(&bad, &good, 100.0).is_err());
        assert!(validate_geofence(&good, &bad, 100.0).is_err());
    }

    #[test]
    fn coverage_bounds_contain_the_centre() {
        let center = GeoPoint::new(-23.55, -46.63);
        let b = coverage_bounds(&center, 500.0).unwrap();
        assert!(b.south < center.lat && center.lat < b.north);
        assert!(b.west < center.lng && center.lng < b.east);
        // Longitude span widens away from the equator.
        let eq = coverage_bounds(&GeoPoint::new(0.0, 0.0), 500.0).unwrap();
        assert!((b.east - b.west) > (eq.east - eq.west));
    }

    #[test]
    fn polar_centres_rejected() {
        assert_eq!(
            coverage_bounds(&GeoPoint::new(90.0, 0.0), 100.0),
            Err(CoreError::InvalidParameter("center latitude at pole"))
        );
    }
}
