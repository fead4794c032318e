//! Field-team workload classification.
//!
//! Thresholds are fixed policy: optimal below 15 interviews per researcher per
//! day, intense from 15 to 25 inclusive, excessive above 25. Classification
//! happens on the unrounded rate; the reported rates carry 2 decimals.

use svy_core::entities::{WorkloadAssessment, WorkloadLevel};
use svy_core::errors::CoreError;
use svy_core::rounding::round2;

const INTENSE_FROM: f64 = 15.0;
const EXCESSIVE_ABOVE: f64 = 25.0;

/// Classify the daily load implied by a sample, schedule, and team size.
pub fn calculate_workload(
    total_sample: u64,
    field_days: u32,
    researcher_count: u32,
) -> Result<WorkloadAssessment, CoreError> {
    if field_days == 0 {
        return Err(CoreError::InvalidParameter("fieldDays"));
    }
    if researcher_count == 0 {
        return Err(CoreError::InvalidParameter("researcherCount"));
    }

    let per_day = total_sample as f64 / field_days as f64;
    let per_researcher = per_day / researcher_count as f64;

    let level = if per_researcher < INTENSE_FROM {
        WorkloadLevel::Optimal
    } else if per_researcher <= EXCESSIVE_ABOVE {
        WorkloadLevel::Intense
    } else {
        WorkloadLevel::Excessive
    };

    Ok(WorkloadAssessment {
        interviews_per_day: round2(per_day),
        interviews_per_researcher: round2(per_researcher),
        level,
    })
}
