//! Continued-fraction convergents over measured phases.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::numtheory::mod_pow;
use crate::types::DomainParams;

/// Best rational approximation `p/q` to `value/denom` with `q <= max_denom`,
/// via the continued-fraction convergent recurrence.
///
/// Satisfies the standard convergent bound
/// `|p/q − value/denom| < 1/(q · max_denom)` whenever the expansion was
/// truncated. Returns `None` for a zero denominator or when no convergent
/// fits under `max_denom`.
pub fn convergent(value: u64, denom: u64, max_denom: u64) -> Option<(u64, u64)> {
    if denom == 0 || max_denom == 0 {
        return None;
    }

    // h_{-2}/k_{-2} and h_{-1}/k_{-1} seed the recurrence
    let (mut h2, mut k2) = (0u128, 1u128);
    let (mut h1, mut k1) = (1u128, 0u128);
    let (mut n, mut d) = (value as u128, denom as u128);

    while d != 0 {
        let a = n / d;
        let h = a * h1 + h2;
        let k = a * k1 + k2;
        if k > max_denom as u128 {
            break;
        }
        h2 = h1;
        k2 = k1;
        h1 = h;
        k1 = k;
        let r = n % d;
        n = d;
        d = r;
    }

    if k1 == 0 {
        return None;
    }
    Some((h1 as u64, k1 as u64))
}

/// Period candidates from the top-K most frequent phase values, mapped to
/// their total measurement support.
///
/// For each frequent value, the convergent denominator of `value / 2^bits`
/// (truncated below `n`) is a period candidate, along with its small
/// integer multiples: a measured phase `k/r` with `gcd(k, r) > 1` yields a
/// proper divisor of the period, which a small multiple repairs. Every
/// candidate is independently verified via `base^r ≡ 1 (mod n)` before it
/// is admitted; unverified candidates are dropped regardless of apparent
/// frequency support.
pub fn candidates_from_histogram(
    histogram: &BTreeMap<u64, u64>,
    params: &DomainParams,
    config: &Config,
) -> BTreeMap<u64, u64> {
    let mut ranked: Vec<(u64, u64)> = histogram
        .iter()
        .filter(|(_, &c)| c > 0)
        .map(|(&v, &c)| (v, c))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let m = params.phase_space();
    let mut support: BTreeMap<u64, u64> = BTreeMap::new();

    for &(value, count) in ranked.iter().take(config.top_k_phases) {
        let Some((_, q)) = convergent(value, m, params.n.saturating_sub(1)) else {
            continue;
        };
        for mult in 1..=config.max_multiple {
            let candidate = q * mult;
            if candidate <= 1 || candidate >= params.n {
                continue;
            }
            if mod_pow(params.base, candidate, params.n) == 1 {
                *support.entry(candidate).or_insert(0) += count;
            }
        }
    }

    support
}
