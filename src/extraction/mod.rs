//! Period extraction and verification.
//!
//! Two independent extraction routes over a phase histogram:
//!
//! - **Continued-fraction convergents** ([`continued_fraction`]): recover
//!   small denominators from the most frequent phase values.
//! - **Direct divisor testing** ([`divisor_scan`]): walk ascending divisors
//!   of `φ(n)` and test whether histogram mass concentrates near the
//!   expected rational phases `k/r`.
//!
//! Every candidate from either route must pass the verification identity
//! `base^r ≡ 1 (mod n)` before it can be accepted. Unverified candidates
//! are discarded silently; they are a frequent, expected occurrence, not
//! a fault.

mod continued_fraction;
mod divisor_scan;

pub use continued_fraction::{candidates_from_histogram, convergent};
pub use divisor_scan::divisor_scan;

use std::collections::BTreeMap;

use log::trace;

use crate::config::Config;
use crate::numtheory::mod_pow;
use crate::types::DomainParams;

/// Extract the period from a phase histogram, or `None` when neither route
/// produces a verified candidate.
///
/// Smaller periods are strictly preferred when multiple candidates pass:
/// they require fewer measurements to detect reliably, and any multiple of
/// the true order also satisfies the verification identity.
pub fn extract_period(
    histogram: &BTreeMap<u64, u64>,
    params: &DomainParams,
    config: &Config,
) -> Option<u64> {
    let mut candidates: Vec<u64> = candidates_from_histogram(histogram, params, config)
        .into_keys()
        .collect();
    if let Some(r) = divisor_scan(histogram, params) {
        candidates.push(r);
    }
    candidates.sort_unstable();
    candidates.dedup();
    trace!("verified period candidates: {:?}", candidates);

    // Routes verify their own candidates; this gate is the final authority.
    candidates
        .into_iter()
        .find(|&r| mod_pow(params.base, r, params.n) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_six_histogram() -> BTreeMap<u64, u64> {
        [0u64, 42, 85, 128, 170, 213]
            .iter()
            .map(|&v| (v, 100))
            .collect()
    }

    #[test]
    fn recovers_order_six() {
        let params = DomainParams::new(21, 2, 8);
        let r = extract_period(&order_six_histogram(), &params, &Config::default());
        assert_eq!(r, Some(6));
    }

    #[test]
    fn empty_histogram_yields_nothing() {
        let params = DomainParams::new(21, 2, 8);
        let r = extract_period(&BTreeMap::new(), &params, &Config::default());
        assert_eq!(r, None);
    }

    #[test]
    fn extracted_period_always_verifies() {
        let params = DomainParams::new(21, 2, 8);
        // Histogram concentrated at phases of the *wrong* structure
        // (multiples of 1/5; 5 does not divide phi(21))
        let hist: BTreeMap<u64, u64> =
            [0u64, 51, 102, 154, 205].iter().map(|&v| (v, 100)).collect();
        if let Some(r) = extract_period(&hist, &params, &Config::default()) {
            assert_eq!(mod_pow(2, r, 21), 1);
        }
    }
}
