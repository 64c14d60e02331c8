//! Adaptive stop thresholds.
//!
//! The confidence and entropy thresholds are not fixed: they are computed
//! from the hypothesis space's average metadata. Higher average complexity
//! lowers the confidence bar and raises the entropy bar (be more lenient on
//! hard problems); higher average richness raises the confidence bar
//! (demand more certainty when structure is abundant). Both are clamped to
//! configured safe ranges.

use crate::config::Config;
use crate::hypothesis::HypothesisSpace;

/// Resolved stop thresholds for one progressive run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopThresholds {
    /// Best candidate's probability must exceed this to stop.
    pub confidence: f64,
    /// Posterior entropy (bits) must fall below this to stop.
    pub entropy: f64,
}

impl StopThresholds {
    /// Derive thresholds from the space's mean complexity and richness.
    pub fn from_space(space: &HypothesisSpace, config: &Config) -> Self {
        let complexity = space.mean_complexity();
        let richness = space.mean_richness();

        let confidence = (config.base_confidence_threshold
            - config.complexity_leniency * complexity
            + config.richness_demand * richness)
            .clamp(config.confidence_clamp.0, config.confidence_clamp.1);

        let entropy = (config.base_entropy_threshold + config.entropy_slack * complexity)
            .clamp(config.entropy_clamp.0, config.entropy_clamp.1);

        Self {
            confidence,
            entropy,
        }
    }

    /// The stop condition: confident AND concentrated.
    pub fn met(&self, confidence: f64, entropy: f64) -> bool {
        confidence > self.confidence && entropy < self.entropy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DomainParams;

    #[test]
    fn thresholds_inside_clamp_ranges() {
        let config = Config::default();
        for n in [15u64, 21, 35, 77, 221, 437] {
            let params = DomainParams::new(n, 2, 8);
            if params.validate().is_err() {
                continue;
            }
            let space = HypothesisSpace::build(&params).unwrap();
            let t = StopThresholds::from_space(&space, &config);
            assert!(
                t.confidence >= config.confidence_clamp.0
                    && t.confidence <= config.confidence_clamp.1
            );
            assert!(t.entropy >= config.entropy_clamp.0 && t.entropy <= config.entropy_clamp.1);
        }
    }

    #[test]
    fn clamping_handles_extreme_settings() {
        let mut config = Config::default();
        config.complexity_leniency = 100.0;
        config.entropy_slack = 100.0;
        let space = HypothesisSpace::build(&DomainParams::new(21, 2, 8)).unwrap();
        let t = StopThresholds::from_space(&space, &config);
        assert_eq!(t.confidence, config.confidence_clamp.0);
        assert_eq!(t.entropy, config.entropy_clamp.1);
    }

    #[test]
    fn stop_condition_requires_both() {
        let t = StopThresholds {
            confidence: 0.5,
            entropy: 1.5,
        };
        assert!(t.met(0.6, 1.0));
        assert!(!t.met(0.6, 2.0));
        assert!(!t.met(0.4, 1.0));
    }
}
