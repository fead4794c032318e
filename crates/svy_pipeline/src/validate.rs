//! Structural & semantic validation before any computation.
//!
//! Deterministic outputs: issues are emitted in a fixed order (parameters,
//! then schedule, then areas in design order), so reports diff cleanly.
//! Warnings never block; `pass` means "no Error-severity findings".

use svy_io::design::SurveyDesign;

use svy_algo::geo::haversine::coordinate_report;
use svy_algo::sampling::calculate_sample_size;
use svy_core::entities::MIN_VALID_QUOTA;
use svy_core::rounding::round_half_up;
use svy_core::ConfidenceLevel;

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Root,
    Param(&'static str),
    Area(String),
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// Deterministic report: pass = no Error-severity issues.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }
}

/// Top-level entry point: validate a loaded design.
pub fn validate_design(design: &SurveyDesign) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    check_parameters(design, &mut issues);
    check_schedule(design, &mut issues);
    check_areas(design, &mut issues);
    check_expected_quotas(design, &mut issues);

    let pass = issues.iter().all(|i| i.severity != Severity::Error);
    ValidationReport { pass, issues }
}

fn error(code: &'static str, message: String, where_: EntityRef) -> ValidationIssue {
    ValidationIssue {
        severity: Severity::Error,
        code,
        message,
        where_,
    }
}

fn warning(code: &'static str, message: String, where_: EntityRef) -> ValidationIssue {
    ValidationIssue {
        severity: Severity::Warning,
        code,
        message,
        where_,
    }
}

fn check_parameters(design: &SurveyDesign, issues: &mut Vec<ValidationIssue>) {
    if ConfidenceLevel::from_percent(design.confidence_level).is_err() {
        issues.push(error(
            "confidence.domain",
            format!(
                "confidence_level must be 90, 95 or 99 (got {})",
                design.confidence_level
            ),
            EntityRef::Param("confidence_level"),
        ));
    }
    if !design.margin_error.is_finite() || !(1.0..=10.0).contains(&design.margin_error) {
        issues.push(error(
            "margin.range",
            format!("margin_error must be within [1, 10] (got {})", design.margin_error),
            EntityRef::Param("margin_error"),
        ));
    }
    if !design.expected_proportion.is_finite()
        || !(0.01..=0.99).contains(&design.expected_proportion)
    {
        issues.push(error(
            "proportion.range",
            format!(
                "expected_proportion must be within [0.01, 0.99] (got {})",
                design.expected_proportion
            ),
            EntityRef::Param("expected_proportion"),
        ));
    }
    if design.population_size == Some(0) {
        issues.push(error(
            "population.zero",
            "population_size, when present, must be positive".into(),
            EntityRef::Param("population_size"),
        ));
    }
}

fn check_schedule(design: &SurveyDesign, issues: &mut Vec<ValidationIssue>) {
    if design.field_days == 0 {
        issues.push(error(
            "schedule.field_days",
            "field_days must be positive".into(),
            EntityRef::Param("field_days"),
        ));
    }
    if design.researcher_count == 0 {
        issues.push(error(
            "schedule.researchers",
            "researcher_count must be positive".into(),
            EntityRef::Param("researcher_count"),
        ));
    }
}

fn check_areas(design: &SurveyDesign, issues: &mut Vec<ValidationIssue>) {
    if design.areas.is_empty() {
        issues.push(error(
            "areas.empty",
            "at least one area is required".into(),
            EntityRef::Root,
        ));
        return;
    }

    let mut area_total: u128 = 0;
    for area in &design.areas {
        area_total += area.population as u128;
        let at = || EntityRef::Area(area.id.clone());

        if area.population == 0 {
            issues.push(error(
                "area.population",
                format!("area {} has zero population", area.id),
                at(),
            ));
        }
        if let Some(center) = &area.center {
            let report = coordinate_report(center.lat, center.lng);
            for msg in report.errors {
                issues.push(error("area.center.range", format!("area {}: {msg}", area.id), at()));
            }
        }
        if let Some(radius) = area.radius_m {
            if !radius.is_finite() || radius <= 0.0 {
                issues.push(error(
                    "area.radius",
                    format!("area {} has a non-positive collection radius", area.id),
                    at(),
                ));
            }
        }
    }

    // Consistency hint: a declared finite population that disagrees with the
    // sum of area populations usually means a stale design.
    if let Some(declared) = design.population_size {
        if declared != 0 && area_total != 0 && declared as u128 != area_total {
            issues.push(warning(
                "population.mismatch",
                format!(
                    "population_size ({declared}) differs from the sum of area populations ({area_total})"
                ),
                EntityRef::Param("population_size"),
            ));
        }
    }
}

/// Advisory preview of the quota allocation: areas whose proportional share of
/// the derived sample lands below the 30-interview minimum get a warning up
/// front, before any plan is built. Skipped while Error-severity findings
/// exist (the derivation inputs are not trustworthy then).
fn check_expected_quotas(design: &SurveyDesign, issues: &mut Vec<ValidationIssue>) {
    if issues.iter().any(|i| i.severity == Severity::Error) {
        return;
    }
    let Ok(params) = design.sample_parameters() else {
        return;
    };
    let Ok(sample) = calculate_sample_size(&params) else {
        return;
    };

    let total_population: u128 = design.areas.iter().map(|a| a.population as u128).sum();
    if total_population == 0 {
        return;
    }
    for area in &design.areas {
        let share = area.population as f64 / total_population as f64;
        let expected = round_half_up(sample.final_sample as f64 * share);
        if expected < MIN_VALID_QUOTA {
            issues.push(warning(
                "area.quota.small",
                format!(
                    "area {} expects roughly {expected} interviews, below the \
                     {MIN_VALID_QUOTA} minimum for reliable estimates",
                    area.id
                ),
                EntityRef::Area(area.id.clone()),
            ));
        }
    }
}
