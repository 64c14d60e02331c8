//! Recurrence-analysis scoring.
//!
//! Looks at the gaps between prominent observed values: under a true period
//! `r`, high-mass phases sit near multiples of `2^bits / r`, so the gaps
//! between them are themselves close to multiples of that spacing. Each
//! candidate is scored by the fraction of observed gaps consistent with its
//! spacing.
//!
//! This is the weakest of the three consensus signals (weight 0.15) and
//! degrades gracefully: with fewer than two prominent values all scores are
//! zero and the combiner simply ignores the method.

use std::collections::BTreeMap;

use crate::constants::{PHASE_TOLERANCE, RECURRENCE_PROMINENCE};
use crate::hypothesis::HypothesisSpace;
use crate::measurement::histogram;
use crate::types::Measurement;

/// Per-candidate recurrence scores, normalized to sum 1 when any gap
/// evidence exists.
pub fn recurrence_scores(
    space: &HypothesisSpace,
    measurements: &[Measurement],
) -> BTreeMap<u64, f64> {
    let mut scores: BTreeMap<u64, f64> = space
        .hypotheses()
        .iter()
        .map(|h| (h.period, 0.0))
        .collect();

    let gaps = prominent_gaps(measurements);
    if gaps.is_empty() {
        return scores;
    }

    let m = space.params().phase_space() as f64;
    for h in space.hypotheses() {
        let spacing = m / h.period as f64;
        if spacing < 1.0 {
            continue;
        }
        let consistent = gaps
            .iter()
            .filter(|&&g| {
                let multiples = g as f64 / spacing;
                (multiples - multiples.round()).abs() * spacing <= PHASE_TOLERANCE * m
            })
            .count();
        scores.insert(h.period, consistent as f64 / gaps.len() as f64);
    }

    let total: f64 = scores.values().sum();
    if total > 0.0 {
        for s in scores.values_mut() {
            *s /= total;
        }
    }
    scores
}

/// Gaps between consecutive prominent values, sorted by value.
///
/// A value is prominent when its count reaches [`RECURRENCE_PROMINENCE`] of
/// the top count.
fn prominent_gaps(measurements: &[Measurement]) -> Vec<u64> {
    let observed = histogram(measurements);
    let top = observed.values().copied().max().unwrap_or(0);
    if top == 0 {
        return Vec::new();
    }
    let floor = ((top as f64) * RECURRENCE_PROMINENCE).ceil() as u64;
    let prominent: Vec<u64> = observed
        .iter()
        .filter(|(_, &c)| c >= floor)
        .map(|(&v, _)| v)
        .collect();
    prominent.windows(2).map(|w| w[1] - w[0]).collect()
}
