//! Decimal rounding policy, isolated in one place.
//!
//! Every numeric edge-case rule of the engine lives here so that callers never
//! re-implement (and subtly diverge on) rounding:
//!
//! - Sample sizes are **ceiling**-rounded, never truncated.
//! - Quotas round **half-up** to the nearest integer.
//! - Metre distances and workload rates report 2 decimals.
//! - Percentages report 1 decimal.

/// Ceiling of a non-negative value as an integer sample size.
#[inline]
pub fn ceil_sample(x: f64) -> u64 {
    x.ceil() as u64
}

/// Round half-up to the nearest integer (0.5 always rounds up).
///
/// Inputs are non-negative in practice (raw quotas); the half-up direction is
/// a fixed, tested policy because alternative apportionment rounding would
/// change quota tables.
#[inline]
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Round to 2 decimal places (metres, interviews/day rates).
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round a percentage to 1 decimal place.
#[inline]
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Convert a proportion in [0, 1] to a percent with 1 decimal place.
#[inline]
pub fn percent_1dp(proportion: f64) -> f64 {
    (proportion * 1000.0).round() / 10.0
}
