// crates/svy_algo/src/lib.rs
#![forbid(unsafe_code)]

//! svy_algo - the two pure computation modules of the survey engine.
//!
//! - **Sampling engine**: required sample sizes (with the one-sided
//!   finite-population correction), proportional integer quotas that sum
//!   exactly, workload classification, Wald confidence intervals, and
//!   per-option result analysis at realized n.
//! - **Geofence validator**: coordinate validation, Haversine great-circle
//!   distance, and radius verdicts.
//!
//! Every function here is a pure, synchronous function of its arguments:
//! no shared state, no I/O, no RNG. Validation is eager and errors are the
//! `svy_core::CoreError` taxonomy.

pub mod sampling {
    pub mod interval;
    pub mod quotas;
    pub mod results;
    pub mod size;
    pub mod workload;

    pub use interval::calculate_confidence_interval;
    pub use quotas::calculate_stratified_quotas;
    pub use results::{analyze_question_results, OptionStats};
    pub use size::{
        apply_finite_population_correction, calculate_base_sample, calculate_sample_size,
        CorrectionOutcome,
    };
    pub use workload::calculate_workload;
}

pub mod geo {
    pub mod geofence;
    pub mod haversine;

    pub use geofence::{
        coverage_bounds, validate_geofence, CoverageBounds, DEFAULT_GEOFENCE_RADIUS_M,
    };
    pub use haversine::{
        coordinate_report, haversine_distance_m, validate_coordinates, CoordinateReport,
        EARTH_RADIUS_M,
    };
}

// Convenience re-exports (pipeline imports these from the crate root).
pub use geo::{validate_geofence, haversine_distance_m};
pub use sampling::{calculate_sample_size, calculate_stratified_quotas};
