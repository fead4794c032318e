//! svy_pipeline - deterministic pipeline surface
//! (load → validate → size → allocate → workload → plan; analyze; locate).
//!
//! This crate stays computation-free on its own: JSON and hashing are
//! delegated to `svy_io`, all math to `svy_algo`. Every stage is a pure
//! function of its inputs; callers composing a sequence of stages serialize
//! their own state transitions.

#![forbid(unsafe_code)]

use thiserror::Error;

use svy_core::errors::CoreError;
use svy_io::IoError;

pub mod analyze;
pub mod locate;
pub mod plan;
pub mod validate;

pub use analyze::{analyze_responses, QuestionAnalysis, SurveyAnalysisDoc};
pub use locate::check_interview_location;
pub use plan::{build_survey_plan, plan_from_path, SurveyPlanDoc};
pub use validate::{validate_design, Severity, ValidationIssue, ValidationReport};

/// Engine version baked into emitted artifacts.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Single error surface for pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] IoError),

    /// The design failed validation; the report carries the findings.
    #[error("design validation failed with {} error(s)", .0.error_count())]
    Validation(ValidationReport),

    /// A core computation rejected its inputs (should be prevented by
    /// validation; surfaced verbatim if it still happens).
    #[error("compute: {0}")]
    Compute(String),

    #[error("unknown area: {0}")]
    UnknownArea(String),

    /// Geofence checks need a configured collection centre.
    #[error("area has no collection centre configured: {0}")]
    NoCenter(String),
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::Compute(e.to_string())
    }
}
