//! Minimal error set for core-domain validation.
//!
//! Both variants are programming/configuration errors: validation happens
//! eagerly at the start of each operation and no partial computation is
//! returned on invalid input. Degenerate-but-valid inputs (zero responses,
//! sub-minimum quotas) are **not** errors; they produce well-defined results.

use core::fmt;

/// Core error taxonomy shared by the sampling engine and geofence validator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    /// Out-of-range input (margin error, proportion, population, field days,
    /// researcher count, coordinate ranges, radius). Carries the offending
    /// parameter name.
    InvalidParameter(&'static str),
    /// Input present but insufficient to compute anything meaningful
    /// (empty stratum list, zero total population).
    InsufficientData(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidParameter(p) => write!(f, "invalid parameter: {p}"),
            CoreError::InsufficientData(w) => write!(f, "insufficient data: {w}"),
        }
    }
}

impl std::error::Error for CoreError {}
