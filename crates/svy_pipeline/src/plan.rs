//! Plan stage: design → sample size → quotas → workload → plan artifact.

use std::path::Path;

use serde::{Deserialize, Serialize};

use svy_algo::sampling::{calculate_sample_size, calculate_stratified_quotas, calculate_workload};
use svy_core::entities::{SampleResult, StratumQuota, WorkloadAssessment};
use svy_io::canonical::fingerprint;
use svy_io::design::{load_design, SurveyDesign};

use crate::validate::validate_design;
use crate::{PipelineError, ENGINE_VERSION};

/// The emitted survey plan: everything a caller persists into a survey record.
///
/// `design_sha256` fingerprints the canonical bytes of the source design, so a
/// stored plan is always traceable to the exact design it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyPlanDoc {
    pub engine_version: String,
    pub design_id: Option<String>,
    pub title: String,
    pub design_sha256: String,

    pub confidence_level: u8,
    pub margin_error: f64,
    pub expected_proportion: f64,
    pub population_size: Option<u64>,

    pub sample: SampleResult,
    pub quotas: Vec<StratumQuota>,
    pub workload: WorkloadAssessment,
}

/// Build a survey plan from a loaded design.
///
/// Validation runs first; a failing report aborts with
/// [`PipelineError::Validation`] carrying every finding.
pub fn build_survey_plan(design: &SurveyDesign) -> Result<SurveyPlanDoc, PipelineError> {
    let report = validate_design(design);
    if !report.pass {
        return Err(PipelineError::Validation(report));
    }

    let params = design.sample_parameters()?;
    let sample = calculate_sample_size(&params)?;
    let quotas = calculate_stratified_quotas(sample.final_sample, &design.strata())?;
    let workload = calculate_workload(
        sample.final_sample,
        design.field_days,
        design.researcher_count,
    )?;

    Ok(SurveyPlanDoc {
        engine_version: ENGINE_VERSION.to_string(),
        design_id: design.id.clone(),
        title: design.title.clone(),
        design_sha256: fingerprint(design)?,
        confidence_level: design.confidence_level,
        margin_error: design.margin_error,
        expected_proportion: design.expected_proportion,
        population_size: design.population_size,
        sample,
        quotas,
        workload,
    })
}

/// Load a design from disk and build its plan.
pub fn plan_from_path(path: &Path) -> Result<SurveyPlanDoc, PipelineError> {
    let design = load_design(path)?;
    build_survey_plan(&design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svy_core::entities::WorkloadLevel;
    use svy_io::design::AreaDesign;

    fn design() -> SurveyDesign {
        SurveyDesign {
            id: Some("svy-001".into()),
            title: "Household survey".into(),
            confidence_level: 95,
            margin_error: 5.0,
            expected_proportion: 0.5,
            population_size: Some(10_000),
            field_days: 7,
            researcher_count: 4,
            areas: vec![
                area("north", 4000),
                area("center", 3000),
                area("south", 3000),
            ],
        }
    }

    fn area(id: &str, population: u64) -> AreaDesign {
        AreaDesign {
            id: id.into(),
            name: id.to_uppercase(),
            population,
            center: None,
            radius_m: None,
        }
    }

    #[test]
    fn end_to_end_canonical_scenario() {
        // 95/5/0.5 over N=10000: base 385, corrected to
        // ceil(385 / (1 + 384/10000)) = ceil(370.75…) = 371.
        let plan = build_survey_plan(&design()).unwrap();
        assert_eq!(plan.sample.base_sample, 385);
        assert_eq!(plan.sample.final_sample, 371);
        assert!(plan.sample.correction_applied);

        let quota_sum: i64 = plan.quotas.iter().map(|q| q.quota).sum();
        assert_eq!(quota_sum, 371);
        assert!(plan.quotas.iter().all(|q| q.is_valid));

        assert_eq!(plan.workload.level, WorkloadLevel::Optimal);
        assert_eq!(plan.design_sha256.len(), 64);
        assert_eq!(plan.design_id.as_deref(), Some("svy-001"));
    }

    #[test]
    fn plan_fingerprint_tracks_the_design() {
        let d1 = design();
        let mut d2 = design();
        d2.margin_error = 4.0;
        let p1 = build_survey_plan(&d1).unwrap();
        let p2 = build_survey_plan(&d2).unwrap();
        assert_ne!(p1.design_sha256, p2.design_sha256);
    }

    #[test]
    fn validation_failure_blocks_the_plan() {
        let mut d = design();
        d.margin_error = 0.0;
        match build_survey_plan(&d) {
            Err(PipelineError::Validation(report)) => {
                assert_eq!(report.error_count(), 1);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
