//! Location gating: resolve an area's geofence and check a position fix.
//!
//! The surrounding application polls this while a researcher holds an active
//! task (enabling/disabling the interview action) and once more at submission
//! time to stamp the record. Each call is one independent verdict.

use svy_algo::geo::{validate_geofence, DEFAULT_GEOFENCE_RADIUS_M};
use svy_core::entities::{GeoPoint, GeofenceVerdict};
use svy_io::design::AreaDesign;

use crate::PipelineError;

/// Check a researcher's position against an area's configured geofence.
///
/// Uses the area's collection radius when configured, otherwise the engine
/// default of 100 m. Areas without a collection centre cannot be checked.
pub fn check_interview_location(
    area: &AreaDesign,
    probe: &GeoPoint,
) -> Result<GeofenceVerdict, PipelineError> {
    let center = area
        .center
        .ok_or_else(|| PipelineError::NoCenter(area.id.clone()))?;
    let radius = area.radius_m.unwrap_or(DEFAULT_GEOFENCE_RADIUS_M);
    Ok(validate_geofence(probe, &center.into(), radius)?)
}
