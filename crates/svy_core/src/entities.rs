//! Data-model entities: value types, immutable once computed.
//!
//! None of these are persisted by the core itself; callers hand them to
//! whatever storage layer they use. Serde derives are feature-gated.

use core::fmt;

use crate::confidence::ConfidenceLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inputs to a sample-size derivation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleParameters {
    pub confidence: ConfidenceLevel,
    /// Margin of error in percent; valid domain [1, 10].
    pub margin_error: f64,
    /// Expected proportion as a fraction; valid domain [0.01, 0.99].
    pub expected_proportion: f64,
    /// Finite population size, when the target population is enumerable.
    pub population_size: Option<u64>,
}

impl SampleParameters {
    /// Parameters with the conventional worst-case proportion p = 0.5.
    pub fn new(confidence: ConfidenceLevel, margin_error: f64) -> Self {
        Self {
            confidence,
            margin_error,
            expected_proportion: 0.5,
            population_size: None,
        }
    }
}

/// Output of a sample-size derivation.
///
/// `final_sample <= base_sample` whenever the finite-population correction was
/// applied; both are ceiling-rounded, never truncated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleResult {
    pub base_sample: u64,
    pub final_sample: u64,
    pub z_score: f64,
    pub correction_applied: bool,
}

/// A population subgroup (geographic area) receiving a proportional quota.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stratum {
    pub id: String,
    pub name: String,
    /// Must be positive; zero-population strata are rejected up front.
    pub population: u64,
}

/// Smallest per-stratum allocation considered statistically usable.
pub const MIN_VALID_QUOTA: i64 = 30;

/// One stratum's allocated interview quota.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StratumQuota {
    pub stratum_id: String,
    pub name: String,
    pub population: u64,
    /// Integer quota after remainder adjustment. Σ quotas == total exactly.
    pub quota: i64,
    /// Share of the total population, in percent (unrounded).
    pub percentage_of_population: f64,
    /// `quota >= MIN_VALID_QUOTA`. Advisory only; never auto-corrected.
    pub is_valid: bool,
    pub warning: Option<String>,
}

/// Advisory severity attached to a workload level.
///
/// Visual-severity semantics, not UI styling: the caller chooses rendering.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdvisorySeverity {
    Normal,
    Elevated,
    Critical,
}

/// Workload classification for a field-collection schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WorkloadLevel {
    /// Fewer than 15 interviews per researcher per day.
    Optimal,
    /// 15 to 25 inclusive.
    Intense,
    /// More than 25.
    Excessive,
}

impl WorkloadLevel {
    pub fn severity(self) -> AdvisorySeverity {
        match self {
            WorkloadLevel::Optimal => AdvisorySeverity::Normal,
            WorkloadLevel::Intense => AdvisorySeverity::Elevated,
            WorkloadLevel::Excessive => AdvisorySeverity::Critical,
        }
    }

    /// Canonical advisory message for the level.
    pub fn message(self) -> &'static str {
        match self {
            WorkloadLevel::Optimal => "workload within recommended capacity",
            WorkloadLevel::Intense => "intense workload, still feasible",
            WorkloadLevel::Excessive => "excessive workload, completion at risk",
        }
    }
}

/// Workload assessment for a schedule (rates reported to 2 decimals).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkloadAssessment {
    pub interviews_per_day: f64,
    pub interviews_per_researcher: f64,
    pub level: WorkloadLevel,
}

/// Wald confidence interval for an observed proportion, in percent.
///
/// Bounds are clamped to the [0, 1] proportion domain before percent
/// conversion, so `0 <= lower <= upper <= 100` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfidenceInterval {
    pub lower_pct: f64,
    pub upper_pct: f64,
    pub margin_error_pct: f64,
}

impl ConfidenceInterval {
    /// Degenerate zero-width interval (the documented empty-data policy).
    pub fn zero() -> Self {
        Self {
            lower_pct: 0.0,
            upper_pct: 0.0,
            margin_error_pct: 0.0,
        }
    }
}

/// A geographic fix handed in by the caller.
///
/// The core never touches a location sensor; coordinates arrive already
/// resolved. `timestamp_ms` is epoch milliseconds supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees; valid domain [-90, 90].
    pub lat: f64,
    /// Longitude in degrees; valid domain [-180, 180].
    pub lng: f64,
    /// Reported fix accuracy in metres, when the source provides one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy_m: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp_ms: Option<u64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            accuracy_m: None,
            timestamp_ms: None,
        }
    }
}

impl fmt::Display for GeoPoint {
    /// Renders `12.345678°N, 4.500000°W` (6 decimal places, hemisphere letters).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.lat >= 0.0 { 'N' } else { 'S' };
        let lng_dir = if self.lng >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.6}°{}, {:.6}°{}",
            self.lat.abs(),
            lat_dir,
            self.lng.abs(),
            lng_dir
        )
    }
}

/// Verdict of a single geofence check.
///
/// `is_valid ⇔ distance_from_center_m <= max_allowed_distance_m`. Each check
/// is a fresh, independent verdict; there is no hysteresis across calls.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeofenceVerdict {
    pub is_valid: bool,
    /// Great-circle distance in metres, rounded to 2 decimals.
    pub distance_from_center_m: f64,
    pub max_allowed_distance_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_levels_carry_severity() {
        assert_eq!(WorkloadLevel::Optimal.severity(), AdvisorySeverity::Normal);
        assert_eq!(WorkloadLevel::Intense.severity(), AdvisorySeverity::Elevated);
        assert_eq!(
            WorkloadLevel::Excessive.severity(),
            AdvisorySeverity::Critical
        );
    }

    #[test]
    fn geo_point_display_uses_hemisphere_letters() {
        let p = GeoPoint::new(12.345678, -4.5);
        assert_eq!(p.to_string(), "12.345678°N, 4.500000°W");
        let q = GeoPoint::new(-0.000001, 0.0);
        assert_eq!(q.to_string(), "0.000001°S, 0.000000°E");
    }

    #[test]
    fn zero_interval_is_degenerate() {
        let ci = ConfidenceInterval::zero();
        assert_eq!(ci.lower_pct, 0.0);
        assert_eq!(ci.upper_pct, 0.0);
        assert_eq!(ci.margin_error_pct, 0.0);
    }
}
