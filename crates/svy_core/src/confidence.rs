//! Closed confidence-level domain with the fixed Z table.
//!
//! Only 90 / 95 / 99 are valid levels; there is no interpolation. The Z values
//! are policy constants, not derived at runtime.

use crate::errors::CoreError;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Confidence level for sample-size and interval computations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum ConfidenceLevel {
    P90,
    P95,
    P99,
}

impl ConfidenceLevel {
    /// Fixed Z-score table: {90 → 1.645, 95 → 1.96, 99 → 2.576}.
    pub fn z_score(self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 1.645,
            ConfidenceLevel::P95 => 1.96,
            ConfidenceLevel::P99 => 2.576,
        }
    }

    /// The level as an integer percent (90, 95, 99).
    pub fn as_percent(self) -> u8 {
        match self {
            ConfidenceLevel::P90 => 90,
            ConfidenceLevel::P95 => 95,
            ConfidenceLevel::P99 => 99,
        }
    }

    /// Parse from an integer percent; anything outside the closed set fails.
    pub fn from_percent(pct: u8) -> Result<Self, CoreError> {
        match pct {
            90 => Ok(ConfidenceLevel::P90),
            95 => Ok(ConfidenceLevel::P95),
            99 => Ok(ConfidenceLevel::P99),
            _ => Err(CoreError::InvalidParameter("confidenceLevel")),
        }
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = CoreError;
    fn try_from(pct: u8) -> Result<Self, Self::Error> {
        ConfidenceLevel::from_percent(pct)
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> u8 {
        level.as_percent()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_table_is_fixed() {
        assert_eq!(ConfidenceLevel::P90.z_score(), 1.645);
        assert_eq!(ConfidenceLevel::P95.z_score(), 1.96);
        assert_eq!(ConfidenceLevel::P99.z_score(), 2.576);
    }

    #[test]
    fn percent_round_trip() {
        for pct in [90u8, 95, 99] {
            let level = ConfidenceLevel::from_percent(pct).unwrap();
            assert_eq!(level.as_percent(), pct);
        }
    }

    #[test]
    fn no_interpolation() {
        for pct in [0u8, 50, 89, 91, 94, 96, 98, 100, 255] {
            assert_eq!(
                ConfidenceLevel::from_percent(pct),
                Err(CoreError::InvalidParameter("confidenceLevel"))
            );
        }
    }
}
