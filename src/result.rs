//! Inference result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::shannon_entropy;

/// Probability mass over period candidates.
///
/// Keyed by the candidate value itself (structural equality, deterministic
/// iteration order), always renormalized to sum 1 after every update, or
/// left at zero total in the degenerate "no signal" state.
pub type Posterior = BTreeMap<u64, f64>;

/// Final output of one inference call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Best verified candidate, or `None` when no hypothesis both validates
    /// and carries positive mass.
    pub best: Option<u64>,
    /// Probability mass of `best` in the final distribution, in `[0, 1]`.
    pub confidence: f64,
    /// Shannon entropy of the final distribution, in `[0, log2(k)]` bits.
    pub entropy: f64,
    /// The final distribution over all candidates.
    pub posterior: Posterior,
    /// Total measurement count consumed (sum of counts, not batch count).
    pub measurements_used: u64,
    /// Number of batches consumed.
    pub batches_used: usize,
    /// Whether the adaptive stop rule halted the progressive controller;
    /// `false` when the input ran out first. Always `false` for one-shot
    /// inference.
    pub early_stop: bool,
    /// Agreement fraction of the three scoring methods with the final top
    /// pick (0, 1/3, 2/3, or 1). `None` when the consensus combiner was not
    /// applied (progressive mode).
    pub consensus: Option<f64>,
}

impl InferenceResult {
    /// A result carrying no signal: no best candidate, zero confidence.
    ///
    /// The entropy reflects whatever distribution is carried, typically the
    /// untouched priors.
    pub fn degenerate(posterior: Posterior) -> Self {
        let entropy = shannon_entropy(&posterior);
        Self {
            best: None,
            confidence: 0.0,
            entropy,
            posterior,
            measurements_used: 0,
            batches_used: 0,
            early_stop: false,
            consensus: None,
        }
    }

    /// True when all posterior mass collapsed to zero and no candidate was
    /// supported.
    pub fn is_degenerate(&self) -> bool {
        self.best.is_none() && self.confidence == 0.0
    }

    /// Candidates ranked by descending mass.
    pub fn ranked(&self) -> Vec<(u64, f64)> {
        let mut out: Vec<(u64, f64)> = self
            .posterior
            .iter()
            .map(|(&r, &p)| (r, p))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        out
    }
}
