//! End-to-end: design file on disk → plan artifact → response analysis.

use std::io::Write;

use svy_pipeline::{analyze_responses, plan_from_path, PipelineError};

const DESIGN_JSON: &str = r#"{
  "id": "svy-e2e",
  "title": "Municipal household survey",
  "confidence_level": 95,
  "margin_error": 5.0,
  "population_size": 5000,
  "field_days": 10,
  "researcher_count": 3,
  "areas": [
    { "id": "north",  "name": "North",  "population": 2000,
      "center": { "lat": -23.5505, "lng": -46.6333 }, "radius_m": 150.0 },
    { "id": "center", "name": "Centre", "population": 1500 },
    { "id": "south",  "name": "South",  "population": 1500 }
  ]
}"#;

#[test]
fn plan_from_disk_matches_the_worked_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.json");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(DESIGN_JSON.as_bytes())
        .unwrap();

    let plan = plan_from_path(&path).unwrap();

    // 95/5/0.5 → base 385; N=5000 → ceil(385 / 1.0768) = 358.
    assert_eq!(plan.sample.base_sample, 385);
    assert_eq!(plan.sample.final_sample, 358);
    assert!(plan.sample.correction_applied);
    assert_eq!(plan.sample.z_score, 1.96);

    // 358 over [2000,1500,1500]: raw [143.2, 107.4, 107.4] → [143,107,107]
    // (sum 357), +1 remainder onto the largest quota.
    let values: Vec<i64> = plan.quotas.iter().map(|q| q.quota).collect();
    assert_eq!(values, vec![144, 107, 107]);
    assert_eq!(values.iter().sum::<i64>(), 358);
    assert!(plan.quotas.iter().all(|q| q.is_valid));

    // 358 interviews / 10 days / 3 researchers ≈ 11.93 per researcher per day.
    assert_eq!(plan.workload.interviews_per_day, 35.8);
    assert_eq!(plan.workload.interviews_per_researcher, 11.93);
}

#[test]
fn invalid_design_reports_every_finding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.json");
    let bad = DESIGN_JSON
        .replace("\"margin_error\": 5.0", "\"margin_error\": 0.2")
        .replace("\"researcher_count\": 3", "\"researcher_count\": 0");
    std::fs::write(&path, bad).unwrap();

    match plan_from_path(&path) {
        Err(PipelineError::Validation(report)) => {
            assert_eq!(report.error_count(), 2);
            let codes: Vec<_> = report.issues.iter().map(|i| i.code).collect();
            assert!(codes.contains(&"margin.range"));
            assert!(codes.contains(&"schedule.researchers"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn analysis_round_trips_through_io_types() {
    let batch = svy_io::responses::parse_responses(
        br#"{
          "confidence_level": 95,
          "questions": [
            { "id": "q1", "options": ["keep", "change"],
              "answers": ["keep", "keep", "change", "keep"] }
          ]
        }"#,
    )
    .unwrap();

    let doc = analyze_responses(&batch).unwrap();
    assert_eq!(doc.questions[0].realized_n, 4);
    assert_eq!(doc.questions[0].options[0].count, 3);
    assert_eq!(doc.questions[0].options[0].percentage, 75.0);
}
