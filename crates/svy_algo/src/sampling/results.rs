//! Per-option analysis of multi-choice question results.
//!
//! Counts exact string matches among the collected answers and computes each
//! option's percentage and confidence interval against the **realized**
//! response count, not the planned sample size; field collection rarely hits
//! the target exactly, and intervals must reflect the n actually achieved.
//!
//! Zero responses is the documented empty-data policy, not an error: every
//! option reports a zero count, zero percentage, and a zero-width interval.

use svy_core::entities::ConfidenceInterval;
use svy_core::rounding::round1;
use svy_core::ConfidenceLevel;

use crate::sampling::interval::calculate_confidence_interval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics for one answer option.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionStats {
    pub option: String,
    pub count: u64,
    /// Share of realized responses, in percent with 1 decimal.
    pub percentage: f64,
    pub interval: ConfidenceInterval,
}

/// Analyze one question's responses against its defined option set.
pub fn analyze_question_results(
    responses: &[String],
    options: &[String],
    confidence: ConfidenceLevel,
) -> Vec<OptionStats> {
    let realized_n = responses.len() as u64;

    options
        .iter()
        .map(|option| {
            if realized_n == 0 {
                return OptionStats {
                    option: option.clone(),
                    count: 0,
                    percentage: 0.0,
                    interval: ConfidenceInterval::zero(),
                };
            }

            let count = responses.iter().filter(|r| *r == option).count() as u64;
            let proportion = count as f64 / realized_n as f64;
            let interval = calculate_confidence_interval(proportion, realized_n, confidence)
                .expect("proportion in [0,1] and realized n >= 1");

            OptionStats {
                option: option.clone(),
                count,
                percentage: round1(proportion * 100.0),
                interval,
            }
        })
        .collect()
}
