//! Consensus combiner.
//!
//! Blends the Bayesian posterior (weight 0.6) with frequency-analysis
//! (0.25) and recurrence-analysis (0.15) scores into one ranked
//! distribution, and reports an agreement score: the fraction of the three
//! individual methods whose top pick matches the blended top pick (0, 1/3,
//! 2/3, or 1).
//!
//! The agreement score communicates robustness to model misspecification
//! and is reported alongside confidence, never folded into it.

use std::collections::BTreeMap;

use crate::analysis::bayes::normalize;
use crate::analysis::{frequency_scores, recurrence_scores};
use crate::constants::{BAYES_WEIGHT, FREQUENCY_WEIGHT, RECURRENCE_WEIGHT};
use crate::hypothesis::HypothesisSpace;
use crate::result::Posterior;
use crate::types::Measurement;

/// Output of the consensus combiner.
#[derive(Debug, Clone)]
pub struct ConsensusOutcome {
    /// Blended, renormalized distribution over candidates.
    pub blended: Posterior,
    /// Fraction of methods agreeing with the blended top pick.
    pub agreement: f64,
}

/// Blend the three scoring methods into one ranked distribution.
pub fn combine(
    posterior: &Posterior,
    space: &HypothesisSpace,
    measurements: &[Measurement],
) -> ConsensusOutcome {
    let freq = frequency_scores(space, measurements);
    let rec = recurrence_scores(space, measurements);

    let mut blended: Posterior = Posterior::new();
    for h in space.hypotheses() {
        let r = h.period;
        let p = posterior.get(&r).copied().unwrap_or(0.0);
        let f = freq.get(&r).copied().unwrap_or(0.0);
        let g = rec.get(&r).copied().unwrap_or(0.0);
        blended.insert(r, BAYES_WEIGHT * p + FREQUENCY_WEIGHT * f + RECURRENCE_WEIGHT * g);
    }
    normalize(&mut blended);

    let combined_top = top_pick(&blended);
    let agreement = match combined_top {
        None => 0.0,
        Some(winner) => {
            let votes = [top_pick(posterior), top_pick(&freq), top_pick(&rec)]
                .iter()
                .filter(|pick| **pick == Some(winner))
                .count();
            votes as f64 / 3.0
        }
    };

    ConsensusOutcome { blended, agreement }
}

/// Argmax over a score map; `None` when all scores are zero. Ties break
/// toward the smaller candidate.
fn top_pick(scores: &BTreeMap<u64, f64>) -> Option<u64> {
    scores
        .iter()
        .filter(|(_, &s)| s > 0.0)
        .max_by(|a, b| a.1.total_cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(&r, _)| r)
}
