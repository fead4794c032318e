// crates/svy_cli/src/main.rs
//
// Wires: CLI parsing → design load/validate → plan artifact → optional
// response analysis → optional geofence probe. Exit codes are stable so
// scripts and harnesses can branch on them.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const RUNTIME: i32 = 1;
    pub const VALIDATION: i32 = 2;
    pub const OUTSIDE_FENCE: i32 = 3;
}

use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};

use svy_io::canonical::write_canonical_file;
use svy_io::design::{load_design, SurveyDesign};
use svy_io::responses::load_responses;
use svy_pipeline::{
    analyze_responses, build_survey_plan, check_interview_location, validate_design,
    PipelineError, Severity,
};

const PLAN_FILE: &str = "survey_plan.json";
const ANALYSIS_FILE: &str = "survey_analysis.json";

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("svy: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = match run(&args) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("svy: error: {e}");
            match e {
                PipelineError::Validation(report) => {
                    print_report_findings(&report);
                    exitcodes::VALIDATION
                }
                _ => exitcodes::RUNTIME,
            }
        }
    };

    ExitCode::from(rc as u8)
}

fn run(args: &Args) -> Result<i32, PipelineError> {
    let design = load_design(&args.design)?;

    if args.validate_only {
        return Ok(validate_only(args, &design));
    }

    let plan = build_survey_plan(&design)?;
    write_canonical_file(&args.out.join(PLAN_FILE), &plan)?;

    if !args.quiet {
        println!(
            "plan: base sample {}, final sample {}{}",
            plan.sample.base_sample,
            plan.sample.final_sample,
            if plan.sample.correction_applied {
                " (finite-population correction applied)"
            } else {
                ""
            }
        );
        for quota in &plan.quotas {
            match &quota.warning {
                Some(w) => println!("quota: {} = {} [warning: {w}]", quota.name, quota.quota),
                None => println!("quota: {} = {}", quota.name, quota.quota),
            }
        }
        println!(
            "workload: {:.2}/researcher/day ({})",
            plan.workload.interviews_per_researcher,
            plan.workload.level.message()
        );
        println!("wrote {}", args.out.join(PLAN_FILE).display());
    }

    if let Some(responses_path) = &args.responses {
        let batch = load_responses(responses_path)?;
        let analysis = analyze_responses(&batch)?;
        write_canonical_file(&args.out.join(ANALYSIS_FILE), &analysis)?;
        if !args.quiet {
            println!("wrote {}", args.out.join(ANALYSIS_FILE).display());
        }
    }

    if let Some(probe) = &args.probe {
        return probe_area(&design, probe, args.quiet);
    }

    Ok(exitcodes::OK)
}

/// Validate-only path: print every finding, exit 2 on errors.
fn validate_only(args: &Args, design: &SurveyDesign) -> i32 {
    let report = validate_design(design);
    print_report_findings(&report);
    if report.pass {
        if !args.quiet {
            eprintln!("validate-only: design OK");
        }
        exitcodes::OK
    } else {
        exitcodes::VALIDATION
    }
}

fn print_report_findings(report: &svy_pipeline::ValidationReport) {
    for issue in &report.issues {
        let tag = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        eprintln!("{tag}[{}]: {}", issue.code, issue.message);
    }
}

/// Resolve the probed area and print the geofence verdict.
fn probe_area(design: &SurveyDesign, probe: &args::Probe, quiet: bool) -> Result<i32, PipelineError> {
    let area = design
        .area(&probe.area_id)
        .ok_or_else(|| PipelineError::UnknownArea(probe.area_id.clone()))?;
    let verdict = check_interview_location(area, &probe.position)?;

    if !quiet {
        println!(
            "probe: {} is {:.2} m from {} (allowed {:.0} m): {}",
            probe.position,
            verdict.distance_from_center_m,
            area.name,
            verdict.max_allowed_distance_m,
            if verdict.is_valid { "inside" } else { "outside" }
        );
    }

    Ok(if verdict.is_valid {
        exitcodes::OK
    } else {
        exitcodes::OUTSIDE_FENCE
    })
}
