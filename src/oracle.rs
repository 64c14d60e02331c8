//! Main `PeriodOracle` entry point and builder.

use log::debug;

use crate::adaptive::{run_progressive, run_streaming};
use crate::analysis::bayes::{init_posterior, shannon_entropy, update};
use crate::analysis::consensus;
use crate::config::Config;
use crate::error::InferenceError;
use crate::hypothesis::HypothesisSpace;
use crate::measurement::MeasurementSource;
use crate::result::InferenceResult;
use crate::types::{DomainParams, Measurement, NoiseModel};

/// Main entry point for period inference.
///
/// Use the builder pattern to configure and run inference calls. Each call
/// builds its own hypothesis space and posterior; nothing is shared across
/// calls, so independent calls may run concurrently.
///
/// # Example
///
/// ```
/// use period_oracle::{DomainParams, Measurement, NoiseModel, PeriodOracle};
///
/// let measurements: Vec<Measurement> = [0u64, 42, 85, 128, 170, 213]
///     .iter()
///     .map(|&v| Measurement::new(v, 100))
///     .collect();
///
/// let result = PeriodOracle::quick()
///     .infer(&DomainParams::new(21, 2, 8), &measurements, &NoiseModel::default())
///     .unwrap();
/// assert_eq!(result.best, Some(6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PeriodOracle {
    config: Config,
}

impl PeriodOracle {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with the quick preset.
    pub fn quick() -> Self {
        Self {
            config: Config::quick(),
        }
    }

    /// Create with the thorough preset.
    pub fn thorough() -> Self {
        Self {
            config: Config::thorough(),
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the multiplicative update strength.
    pub fn update_strength(mut self, strength: f64) -> Self {
        self.config = self.config.update_strength(strength);
        self
    }

    /// Set the minimum batches before the progressive stop check.
    pub fn min_batches(mut self, batches: usize) -> Self {
        self.config = self.config.min_batches(batches);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One-shot inference over a flat measurement list.
    ///
    /// Runs a single posterior pass over the whole list, then applies the
    /// consensus combiner (Bayesian + frequency + recurrence) to rank the
    /// final distribution. The result's `consensus` field reports method
    /// agreement.
    ///
    /// An empty or zero-count measurement list is not an error: the result
    /// is degenerate (`best = None`, zero confidence, zero measurements).
    pub fn infer(
        &self,
        params: &DomainParams,
        measurements: &[Measurement],
        noise: &NoiseModel,
    ) -> Result<InferenceResult, InferenceError> {
        let space = self.prepare(params, noise)?;

        let total: u64 = measurements.iter().map(|m| m.count).sum();
        if total == 0 {
            debug!("no measurements supplied; returning degenerate result");
            return Ok(InferenceResult::degenerate(init_posterior(&space)));
        }

        let mut posterior = init_posterior(&space);
        update(
            &mut posterior,
            measurements,
            &space,
            noise,
            self.config.update_strength,
        );

        let outcome = consensus::combine(&posterior, &space, measurements);
        let best = crate::analysis::bayes::best_validated(&outcome.blended, &space);
        let entropy = shannon_entropy(&outcome.blended);

        Ok(InferenceResult {
            best: best.map(|(r, _)| r),
            confidence: best.map(|(_, p)| p).unwrap_or(0.0),
            entropy,
            posterior: outcome.blended,
            measurements_used: total,
            batches_used: 1,
            early_stop: false,
            consensus: Some(outcome.agreement),
        })
    }

    /// Progressive inference over an ordered batch sequence with adaptive
    /// early stopping.
    pub fn infer_progressive(
        &self,
        params: &DomainParams,
        batches: &[Vec<Measurement>],
        noise: &NoiseModel,
    ) -> Result<InferenceResult, InferenceError> {
        let space = self.prepare(params, noise)?;
        Ok(run_progressive(&self.config, &space, batches, noise))
    }

    /// Streaming variant of [`PeriodOracle::infer_progressive`]: batches
    /// are pulled from the source on demand, and pulling stops once the
    /// stop condition is met.
    pub fn infer_streaming<S>(
        &self,
        params: &DomainParams,
        source: &mut S,
    ) -> Result<InferenceResult, InferenceError>
    where
        S: MeasurementSource,
    {
        let noise = source.noise();
        let space = self.prepare(params, &noise)?;
        let stream = std::iter::from_fn(|| source.next_batch());
        Ok(run_streaming(&self.config, &space, stream, &noise))
    }

    fn prepare(
        &self,
        params: &DomainParams,
        noise: &NoiseModel,
    ) -> Result<HypothesisSpace, InferenceError> {
        noise
            .validate()
            .map_err(InferenceError::InvalidNoiseModel)?;
        let space = HypothesisSpace::build(params)?;
        debug!(
            "hypothesis space for n={}: {} candidates, phi={}",
            params.n,
            space.hypotheses().len(),
            space.phi()
        );
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_six_measurements() -> Vec<Measurement> {
        [0u64, 42, 85, 128, 170, 213]
            .iter()
            .map(|&v| Measurement::new(v, 100))
            .collect()
    }

    #[test]
    fn one_shot_recovers_order() {
        let result = PeriodOracle::new()
            .infer(
                &DomainParams::new(21, 2, 8),
                &order_six_measurements(),
                &NoiseModel::default(),
            )
            .unwrap();
        assert_eq!(result.best, Some(6));
        assert!(result.consensus.is_some());
        assert!(!result.early_stop);
        assert_eq!(result.measurements_used, 600);
    }

    #[test]
    fn empty_input_degenerate() {
        let result = PeriodOracle::new()
            .infer(&DomainParams::new(21, 2, 8), &[], &NoiseModel::default())
            .unwrap();
        assert_eq!(result.best, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.measurements_used, 0);
    }

    #[test]
    fn invalid_params_rejected() {
        let err = PeriodOracle::new()
            .infer(&DomainParams::new(21, 6, 8), &[], &NoiseModel::default())
            .unwrap_err();
        assert!(matches!(err, InferenceError::InvalidParameters(_)));
    }

    #[test]
    fn invalid_noise_rejected() {
        let err = PeriodOracle::new()
            .infer(
                &DomainParams::new(21, 2, 8),
                &[],
                &NoiseModel::new(2.0, 5.0),
            )
            .unwrap_err();
        assert!(matches!(err, InferenceError::InvalidNoiseModel(_)));
    }

    #[test]
    fn builder_carries_config() {
        let oracle = PeriodOracle::new().min_batches(7).update_strength(1.25);
        assert_eq!(oracle.config().min_batches, 7);
        assert_eq!(oracle.config().update_strength, 1.25);
    }
}
