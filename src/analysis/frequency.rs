//! Frequency-analysis scoring.
//!
//! For each hypothesis, measures the overlap between its expected phase
//! distribution and the observed measurement histogram via the
//! Bhattacharyya coefficient `Σ √(expected(v) · observed(v))` over observed
//! values. Expected lookups tolerate ±1 phase bin, since `k · 2^bits / r`
//! rarely lands on an integer and the histogram quantizes to bins.

use std::collections::BTreeMap;

use crate::hypothesis::HypothesisSpace;
use crate::measurement::histogram;
use crate::types::Measurement;

/// Per-candidate frequency scores, normalized to sum 1 when any overlap
/// exists. All-zero scores mean the observed histogram matches no
/// hypothesis's structure.
pub fn frequency_scores(
    space: &HypothesisSpace,
    measurements: &[Measurement],
) -> BTreeMap<u64, f64> {
    let observed = histogram(measurements);
    let total: u64 = observed.values().sum();
    let mut scores: BTreeMap<u64, f64> = BTreeMap::new();

    if total == 0 {
        for h in space.hypotheses() {
            scores.insert(h.period, 0.0);
        }
        return scores;
    }

    let m = space.params().phase_space();
    for h in space.hypotheses() {
        let expected = space.expected_distribution(h);
        let mut overlap = 0.0;
        for (&value, &count) in &observed {
            let obs = count as f64 / total as f64;
            let exp = expected_near(&expected, value, m);
            overlap += (exp * obs).sqrt();
        }
        scores.insert(h.period, overlap);
    }

    let sum: f64 = scores.values().sum();
    if sum > 0.0 {
        for s in scores.values_mut() {
            *s /= sum;
        }
    }
    scores
}

/// Expected mass at `value`, tolerating ±1 bin with wraparound.
fn expected_near(expected: &BTreeMap<u64, f64>, value: u64, m: u64) -> f64 {
    let lo = (value + m - 1) % m;
    let hi = (value + 1) % m;
    [lo, value, hi]
        .iter()
        .filter_map(|v| expected.get(v))
        .fold(0.0, |acc, &e| acc.max(e))
}
