//! Survey design wire types and loader.
//!
//! The design file is the hand-authored input an administrator writes:
//! confidence/margin parameters, the collection schedule, and the geographic
//! areas (strata) with optional collection centres. Shape violations surface
//! as JSON errors; domain violations (ranges, duplicates) surface as
//! `IoError::Design` with the offending field spelled out. Deeper semantic
//! validation lives in the pipeline's validation report.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use svy_core::entities::{GeoPoint, SampleParameters, Stratum};
use svy_core::ConfidenceLevel;

use crate::canonical::read_local_file;
use crate::{IoError, IoResult};

/// External survey design accepted by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyDesign {
    /// Optional caller-side identifier (echoed into artifacts, never parsed).
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,

    /// Confidence level in percent; only 90/95/99 are valid.
    pub confidence_level: u8,
    /// Margin of error in percent, [1, 10].
    pub margin_error: f64,
    /// Expected proportion as a fraction, [0.01, 0.99]. Defaults to the
    /// conventional worst case 0.5.
    #[serde(default = "default_proportion")]
    pub expected_proportion: f64,
    /// Finite population size, when known and enumerable.
    #[serde(default)]
    pub population_size: Option<u64>,

    pub field_days: u32,
    pub researcher_count: u32,

    pub areas: Vec<AreaDesign>,
}

fn default_proportion() -> f64 {
    0.5
}

/// One geographic collection area (stratum).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaDesign {
    pub id: String,
    pub name: String,
    pub population: u64,
    /// Collection centre; required before geofence checks can run for the area.
    #[serde(default)]
    pub center: Option<LatLngWire>,
    /// Allowed collection radius in metres; engine default applies when absent.
    #[serde(default)]
    pub radius_m: Option<f64>,
}

/// Bare coordinate pair as written in design files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatLngWire {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLngWire> for GeoPoint {
    fn from(w: LatLngWire) -> Self {
        GeoPoint::new(w.lat, w.lng)
    }
}

impl SurveyDesign {
    /// The design's confidence level as the closed core domain.
    pub fn confidence(&self) -> IoResult<ConfidenceLevel> {
        ConfidenceLevel::from_percent(self.confidence_level)
            .map_err(|_| IoError::Design(format!(
                "confidence_level must be 90, 95 or 99 (got {})",
                self.confidence_level
            )))
    }

    /// Sampling parameters for the sample-size derivation.
    pub fn sample_parameters(&self) -> IoResult<SampleParameters> {
        Ok(SampleParameters {
            confidence: self.confidence()?,
            margin_error: self.margin_error,
            expected_proportion: self.expected_proportion,
            population_size: self.population_size,
        })
    }

    /// The areas as plain strata for quota allocation.
    pub fn strata(&self) -> Vec<Stratum> {
        self.areas
            .iter()
            .map(|a| Stratum {
                id: a.id.clone(),
                name: a.name.clone(),
                population: a.population,
            })
            .collect()
    }

    /// Look up an area by id.
    pub fn area(&self, id: &str) -> Option<&AreaDesign> {
        self.areas.iter().find(|a| a.id == id)
    }
}

/// Parse a design from raw JSON bytes and run the load-time domain checks.
pub fn parse_design(bytes: &[u8]) -> IoResult<SurveyDesign> {
    let design: SurveyDesign = serde_json::from_slice(bytes)?;
    check_design_basics(&design)?;
    Ok(design)
}

/// Load a design file from a local path (offline only).
pub fn load_design(path: &Path) -> IoResult<SurveyDesign> {
    parse_design(&read_local_file(path)?)
}

/// Load-time checks: the structural minimum for the engine to run at all.
/// (Range/consistency findings beyond these are the pipeline's job.)
fn check_design_basics(design: &SurveyDesign) -> IoResult<()> {
    if design.title.trim().is_empty() {
        return Err(IoError::Design("title must not be empty".into()));
    }
    if design.areas.is_empty() {
        return Err(IoError::Design("areas must not be empty".into()));
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for area in &design.areas {
        if area.id.trim().is_empty() {
            return Err(IoError::Design("area id must not be empty".into()));
        }
        if !seen.insert(area.id.as_str()) {
            return Err(IoError::Design(format!("duplicate area id: {}", area.id)));
        }
    }
    Ok(())
}
