//! State maintained during the progressive batch loop.

use crate::analysis::bayes::{init_posterior, shannon_entropy, update};
use crate::hypothesis::HypothesisSpace;
use crate::result::Posterior;
use crate::types::{Measurement, NoiseModel};

/// Accumulator for the progressive loop: running posterior plus measurement
/// bookkeeping.
///
/// Owned exclusively by one inference call; nothing here crosses calls.
#[derive(Debug, Clone)]
pub struct ProgressiveState {
    posterior: Posterior,
    measurements_used: u64,
    batch_count: usize,
}

impl ProgressiveState {
    /// Initialize from the space's normalized priors.
    pub fn new(space: &HypothesisSpace) -> Self {
        Self {
            posterior: init_posterior(space),
            measurements_used: 0,
            batch_count: 0,
        }
    }

    /// Consume one batch: accumulate its counts and run the posterior
    /// update.
    pub fn ingest(
        &mut self,
        batch: &[Measurement],
        space: &HypothesisSpace,
        noise: &NoiseModel,
        strength: f64,
    ) {
        self.measurements_used += batch.iter().map(|m| m.count).sum::<u64>();
        self.batch_count += 1;
        update(&mut self.posterior, batch, space, noise, strength);
    }

    /// The running posterior.
    pub fn posterior(&self) -> &Posterior {
        &self.posterior
    }

    /// Take ownership of the posterior, ending the loop.
    pub fn into_posterior(self) -> Posterior {
        self.posterior
    }

    /// Total measurement count consumed so far.
    pub fn measurements_used(&self) -> u64 {
        self.measurements_used
    }

    /// Number of batches consumed so far.
    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Entropy of the running posterior, in bits.
    pub fn entropy(&self) -> f64 {
        shannon_entropy(&self.posterior)
    }
}
