//! Wald confidence interval for an observed proportion.
//!
//! `SE = sqrt(p(1-p)/n)`, `margin = Z·SE`; bounds are clamped to the [0, 1]
//! proportion domain **before** converting to percent with 1 decimal, so the
//! published interval always satisfies `0 <= lower <= upper <= 100`.

use svy_core::entities::ConfidenceInterval;
use svy_core::errors::CoreError;
use svy_core::rounding::percent_1dp;
use svy_core::ConfidenceLevel;

/// Compute the interval for `observed_proportion` at realized sample size `n`.
pub fn calculate_confidence_interval(
    observed_proportion: f64,
    sample_size: u64,
    confidence: ConfidenceLevel,
) -> Result<ConfidenceInterval, CoreError> {
    if sample_size == 0 {
        return Err(CoreError::InvalidParameter("sampleSize"));
    }
    if !observed_proportion.is_finite() || !(0.0..=1.0).contains(&observed_proportion) {
        return Err(CoreError::InvalidParameter("observedProportion"));
    }

    let p = observed_proportion;
    let n = sample_size as f64;
    let standard_error = (p * (1.0 - p) / n).sqrt();
    let margin = confidence.z_score() * standard_error;

    let lower = (p - margin).max(0.0);
    let upper = (p + margin).min(1.0);

    Ok(ConfidenceInterval {
        lower_pct: percent_1dp(lower),
        upper_pct: percent_1dp(upper),
        margin_error_pct: percent_1dp(margin),
    })
}
