//! Proportional stratified quota allocation.
//!
//! Contract:
//! - Raw quota per stratum: `total × (pop_i / Σpop)`, rounded half-up.
//! - Independent rounding can land the sum at `total ± k`; a surplus is
//!   assigned **entirely to the single largest quota**, first occurrence
//!   winning on ties. A deficit is shaved off one interview at a time, each
//!   step taken from the current first-largest quota, so no quota can drop
//!   below zero. Postconditions: `Σ quota_i == total` exactly and every
//!   `quota_i >= 0`.
//! - Quotas below [`MIN_VALID_QUOTA`] are flagged invalid with a warning but
//!   are never auto-corrected upward (validity is advisory).
//!
//! Determinism: no RNG; the tie-break is the fixed first-max policy. Changing
//! it (e.g. to a largest-remainder or Sainte-Laguë apportionment) would change
//! published quota tables, so it is treated as a tested policy.

use svy_core::entities::{Stratum, StratumQuota, MIN_VALID_QUOTA};
use svy_core::errors::CoreError;
use svy_core::rounding::round_half_up;

/// Allocate integer quotas across strata, proportional to population.
pub fn calculate_stratified_quotas(
    total_sample: u64,
    strata: &[Stratum],
) -> Result<Vec<StratumQuota>, CoreError> {
    if total_sample == 0 {
        return Err(CoreError::InvalidParameter("totalSample"));
    }
    if strata.is_empty() {
        return Err(CoreError::InsufficientData("empty stratum list"));
    }
    if strata.iter().any(|s| s.population == 0) {
        return Err(CoreError::InvalidParameter("stratum population"));
    }

    let total_population: u128 = strata.iter().map(|s| s.population as u128).sum();
    if total_population == 0 {
        return Err(CoreError::InsufficientData("zero total population"));
    }

    // Independent half-up rounding first; fix the sum afterwards.
    let mut quotas: Vec<i64> = Vec::with_capacity(strata.len());
    let mut shares: Vec<f64> = Vec::with_capacity(strata.len());
    for s in strata {
        let share = s.population as f64 / total_population as f64;
        quotas.push(round_half_up(total_sample as f64 * share));
        shares.push(share);
    }

    let allocated: i64 = quotas.iter().sum();
    let remainder = total_sample as i64 - allocated;
    if remainder > 0 {
        let largest = largest_quota_index(&quotas);
        quotas[largest] += remainder;
    } else {
        // Deficit: take one interview per step from the current largest quota.
        // The running sum stays at `total >= 1`, so the maximum is always
        // positive before each decrement and no quota goes negative.
        for _ in 0..-remainder {
            let largest = largest_quota_index(&quotas);
            quotas[largest] -= 1;
        }
    }

    debug_assert_eq!(quotas.iter().sum::<i64>(), total_sample as i64);
    debug_assert!(quotas.iter().all(|&q| q >= 0));

    Ok(strata
        .iter()
        .zip(quotas)
        .zip(shares)
        .map(|((s, quota), share)| {
            let is_valid = quota >= MIN_VALID_QUOTA;
            let warning = (!is_valid).then(|| {
                format!(
                    "stratum allocated fewer than {MIN_VALID_QUOTA} interviews ({quota}); \
                     estimates for this area will be unreliable"
                )
            });
            StratumQuota {
                stratum_id: s.id.clone(),
                name: s.name.clone(),
                population: s.population,
                quota,
                percentage_of_population: share * 100.0,
                is_valid,
                warning,
            }
        })
        .collect())
}

/// Index of the largest quota; first occurrence wins on ties.
fn largest_quota_index(quotas: &[i64]) -> usize {
    let mut max_ix = 0;
    for (ix, &q) in quotas.iter().enumerate().skip(1) {
        if q > quotas[max_ix] {
            max_ix = ix;
        }
    }
    max_ix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stratum(id: &str, population: u64) -> Stratum {
        Stratum {
            id: id.into(),
            name: format!("Area {id}"),
            population,
        }
    }

    #[test]
    fn canonical_three_strata_scenario() {
        // 359 over [4000, 3000, 3000]: raw [143.6, 107.7, 107.7] rounds to
        // [144, 108, 108] (sum 360); the -1 remainder lands on the first
        // largest quota.
        let strata = [stratum("a", 4000), stratum("b", 3000), stratum("c", 3000)];
        let quotas = calculate_stratified_quotas(359, &strata).unwrap();
        let values: Vec<i64> = quotas.iter().map(|q| q.quota).collect();
        assert_eq!(values, vec![143, 108, 108]);
        assert_eq!(values.iter().sum::<i64>(), 359);
    }

    #[test]
    fn sum_is_exact_even_split() {
        let strata = [stratum("a", 1000), stratum("b", 1000), stratum("c", 1000)];
        let quotas = calculate_stratified_quotas(100, &strata).unwrap();
        let values: Vec<i64> = quotas.iter().map(|q| q.quota).collect();
        // raw 33.333 each → 33 each → remainder 1 to the first stratum
        assert_eq!(values, vec![34, 33, 33]);
    }

    #[test]
    fn first_max_wins_on_tie() {
        // Two equally-largest quotas: the remainder goes to the first.
        let strata = [stratum("a", 500), stratum("b", 500)];
        let quotas = calculate_stratified_quotas(101, &strata).unwrap();
        let values: Vec<i64> = quotas.iter().map(|q| q.quota).collect();
        // raw 50.5 each → 51 each (half-up) → sum 102 → -1 onto index 0
        assert_eq!(values, vec![50, 51]);
        assert_eq!(values.iter().sum::<i64>(), 101);
    }

    #[test]
    fn small_quotas_flagged_not_corrected() {
        let strata = [stratum("big", 9500), stratum("small", 500)];
        let quotas = calculate_stratified_quotas(400, &strata).unwrap();
        assert!(quotas[0].is_valid);
        assert!(quotas[0].warning.is_none());
        assert_eq!(quotas[1].quota, 20);
        assert!(!quotas[1].is_valid);
        assert!(quotas[1].warning.as_deref().unwrap().contains("20"));
        // Advisory only: the allocation itself still sums exactly.
        assert_eq!(quotas.iter().map(|q| q.quota).sum::<i64>(), 400);
    }

    #[test]
    fn mass_tie_deficit_never_goes_negative() {
        // Six equal strata at total 3: raw 0.5 each rounds up to 1 each
        // (sum 6). The 3-interview deficit is shaved one step at a time off
        // the current largest quota instead of being dumped on one stratum.
        let strata: Vec<Stratum> = (0..6).map(|i| stratum(&i.to_string(), 100)).collect();
        let quotas = calculate_stratified_quotas(3, &strata).unwrap();
        let values: Vec<i64> = quotas.iter().map(|q| q.quota).collect();
        assert_eq!(values, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(values.iter().sum::<i64>(), 3);
        assert!(values.iter().all(|&q| q >= 0));
        assert!(quotas.iter().all(|q| !q.is_valid));
    }

    #[test]
    fn percentage_reflects_population_share() {
        let strata = [stratum("a", 4000), stratum("b", 6000)];
        let quotas = calculate_stratified_quotas(200, &strata).unwrap();
        assert!((quotas[0].percentage_of_population - 40.0).abs() < 1e-9);
        assert!((quotas[1].percentage_of_population - 60.0).abs() < 1e-9);
    }

    #[test]
    fn empty_and_zero_inputs_rejected() {
        assert_eq!(
            calculate_stratified_quotas(100, &[]),
            Err(CoreError::InsufficientData("empty stratum list"))
        );
        assert_eq!(
            calculate_stratified_quotas(0, &[stratum("a", 10)]),
            Err(CoreError::InvalidParameter("totalSample"))
        );
        assert_eq!(
            calculate_stratified_quotas(100, &[stratum("a", 0)]),
            Err(CoreError::InvalidParameter("stratum population"))
        );
    }
}
