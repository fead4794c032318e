//! Sample-size derivation.
//!
//! Contract:
//! - Base sample: `n = ceil(Z² · p · (1-p) / e²)` with `e = margin/100`;
//!   Z comes from the fixed three-entry table, no interpolation.
//! - Finite-population correction: `ceil(n / (1 + (n-1)/N))`, applied only
//!   when `N <= 10_000`. One-sided: the correction can only shrink a sample.
//! - Composition additionally treats `N <= 10` as "no correction"; this is
//!   a deliberate floor, not a formula artifact.

use svy_core::entities::{SampleParameters, SampleResult};
use svy_core::errors::CoreError;
use svy_core::rounding::ceil_sample;
use svy_core::ConfidenceLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Populations above this size gain nothing from the correction.
pub const MAX_POPULATION_FOR_CORRECTION: u64 = 10_000;

/// Populations at or below this size skip the correction entirely when
/// composing via [`calculate_sample_size`] (guards against degenerate
/// divisions on near-empty populations).
pub const MIN_POPULATION_FOR_CORRECTION: u64 = 11;

/// Required sample size for an infinite population.
pub fn calculate_base_sample(
    confidence: ConfidenceLevel,
    margin_error: f64,
    expected_proportion: f64,
) -> Result<u64, CoreError> {
    if !margin_error.is_finite() || !(1.0..=10.0).contains(&margin_error) {
        return Err(CoreError::InvalidParameter("marginError"));
    }
    if !expected_proportion.is_finite() || !(0.01..=0.99).contains(&expected_proportion) {
        return Err(CoreError::InvalidParameter("expectedProportion"));
    }

    let z = confidence.z_score();
    let e = margin_error / 100.0;
    let p = expected_proportion;

    Ok(ceil_sample(z * z * p * (1.0 - p) / (e * e)))
}

/// Outcome of the finite-population correction step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrectionOutcome {
    pub final_sample: u64,
    /// The divisor `1 + (n-1)/N`; 1.0 when the correction is skipped.
    pub factor: f64,
    pub applied: bool,
}

/// Apply the finite-population correction when the population is small
/// enough to matter (`N <= 10_000`); otherwise return the base unchanged.
pub fn apply_finite_population_correction(
    base_sample: u64,
    population_size: u64,
) -> Result<CorrectionOutcome, CoreError> {
    if base_sample == 0 {
        return Err(CoreError::InvalidParameter("baseSample"));
    }
    if population_size == 0 {
        return Err(CoreError::InvalidParameter("populationSize"));
    }

    if population_size > MAX_POPULATION_FOR_CORRECTION {
        return Ok(CorrectionOutcome {
            final_sample: base_sample,
            factor: 1.0,
            applied: false,
        });
    }

    let factor = 1.0 + (base_sample as f64 - 1.0) / population_size as f64;
    Ok(CorrectionOutcome {
        final_sample: ceil_sample(base_sample as f64 / factor),
        factor,
        applied: true,
    })
}

/// Compose base derivation and correction into a [`SampleResult`].
pub fn calculate_sample_size(params: &SampleParameters) -> Result<SampleResult, CoreError> {
    let base_sample = calculate_base_sample(
        params.confidence,
        params.margin_error,
        params.expected_proportion,
    )?;

    let (final_sample, correction_applied) = match params.population_size {
        None => (base_sample, false),
        Some(0) => return Err(CoreError::InvalidParameter("populationSize")),
        Some(n) if n < MIN_POPULATION_FOR_CORRECTION => (base_sample, false),
        Some(n) if n <= MAX_POPULATION_FOR_CORRECTION => {
            let outcome = apply_finite_population_correction(base_sample, n)?;
            (outcome.final_sample, true)
        }
        Some(_) => (base_sample, false),
    };

    Ok(SampleResult {
        base_sample,
        final_sample,
        z_score: params.confidence.z_score(),
        correction_applied,
    })
}
