//! Configuration for the adaptive period-inference pipeline.

/// Configuration options for [`crate::PeriodOracle`].
///
/// Controls the multiplicative update strength, progressive stopping
/// behavior, and extraction limits. Presets cover the common trade-offs;
/// builder methods tune individual fields.
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Posterior update
    // =========================================================================
    /// Scale factor on likelihood evidence in the multiplicative update
    /// `p ← p·(1 + weight·likelihood·strength)`.
    ///
    /// Larger values concentrate the posterior faster but amplify noise.
    /// Default: 2.0.
    pub update_strength: f64,

    // =========================================================================
    // Progressive stopping
    // =========================================================================
    /// Minimum number of batches before the stop condition is evaluated.
    /// Default: 3.
    pub min_batches: usize,

    /// Base confidence threshold before complexity/richness adjustment.
    /// Default: 0.5.
    pub base_confidence_threshold: f64,

    /// How much mean hypothesis complexity lowers the confidence bar
    /// (leniency on hard problems). Default: 0.2.
    pub complexity_leniency: f64,

    /// How much mean hypothesis richness raises the confidence bar
    /// (demand more certainty when structure is abundant). Default: 0.15.
    pub richness_demand: f64,

    /// Safe range the adapted confidence threshold is clamped to.
    /// Default: (0.25, 0.9).
    pub confidence_clamp: (f64, f64),

    /// Base entropy threshold (bits) before complexity adjustment.
    /// Default: 1.0.
    pub base_entropy_threshold: f64,

    /// How much mean hypothesis complexity raises the entropy bar.
    /// Default: 1.0.
    pub entropy_slack: f64,

    /// Safe range the adapted entropy threshold is clamped to.
    /// Default: (0.5, 3.0).
    pub entropy_clamp: (f64, f64),

    // =========================================================================
    // Extraction
    // =========================================================================
    /// How many of the most frequent phase values feed the
    /// continued-fraction route. Default: 5.
    pub top_k_phases: usize,

    /// Largest integer multiple of a convergent denominator tried as a
    /// period candidate. Default: 4.
    pub max_multiple: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_strength: 2.0,
            min_batches: 3,
            base_confidence_threshold: 0.5,
            complexity_leniency: 0.2,
            richness_demand: 0.15,
            confidence_clamp: (0.25, 0.9),
            base_entropy_threshold: 1.0,
            entropy_slack: 1.0,
            entropy_clamp: (0.5, 3.0),
            top_k_phases: 5,
            max_multiple: 4,
        }
    }
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick preset: stop as soon as possible, inspect fewer phases.
    pub fn quick() -> Self {
        Self {
            min_batches: 2,
            top_k_phases: 3,
            ..Default::default()
        }
    }

    /// Balanced preset; identical to the defaults.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Thorough preset: more batches before stopping, gentler updates,
    /// wider extraction search.
    pub fn thorough() -> Self {
        Self {
            update_strength: 1.5,
            min_batches: 5,
            top_k_phases: 8,
            max_multiple: 6,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the multiplicative update strength.
    pub fn update_strength(mut self, strength: f64) -> Self {
        assert!(
            strength > 0.0 && strength.is_finite(),
            "update_strength must be positive and finite"
        );
        self.update_strength = strength;
        self
    }

    /// Set the minimum batches before the stop check.
    pub fn min_batches(mut self, batches: usize) -> Self {
        assert!(batches > 0, "min_batches must be positive");
        self.min_batches = batches;
        self
    }

    /// Set the base confidence threshold.
    pub fn base_confidence_threshold(mut self, threshold: f64) -> Self {
        assert!(
            threshold > 0.0 && threshold < 1.0,
            "base_confidence_threshold must be in (0, 1)"
        );
        self.base_confidence_threshold = threshold;
        self
    }

    /// Set the base entropy threshold in bits.
    pub fn base_entropy_threshold(mut self, threshold: f64) -> Self {
        assert!(threshold > 0.0, "base_entropy_threshold must be positive");
        self.base_entropy_threshold = threshold;
        self
    }

    /// Set how many top phases feed continued-fraction extraction.
    pub fn top_k_phases(mut self, k: usize) -> Self {
        assert!(k > 0, "top_k_phases must be positive");
        self.top_k_phases = k;
        self
    }

    /// Set the largest candidate multiple tried during extraction.
    pub fn max_multiple(mut self, mult: u64) -> Self {
        assert!(mult >= 1, "max_multiple must be at least 1");
        self.max_multiple = mult;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.update_strength > 0.0 && self.update_strength.is_finite()) {
            return Err("update_strength must be positive and finite".to_string());
        }
        if self.min_batches == 0 {
            return Err("min_batches must be positive".to_string());
        }
        if !(0.0..1.0).contains(&self.base_confidence_threshold)
            || self.base_confidence_threshold == 0.0
        {
            return Err("base_confidence_threshold must be in (0, 1)".to_string());
        }
        if self.confidence_clamp.0 >= self.confidence_clamp.1 {
            return Err("confidence_clamp must be an ordered range".to_string());
        }
        if self.entropy_clamp.0 >= self.entropy_clamp.1 {
            return Err("entropy_clamp must be an ordered range".to_string());
        }
        if self.base_entropy_threshold <= 0.0 {
            return Err("base_entropy_threshold must be positive".to_string());
        }
        if self.top_k_phases == 0 {
            return Err("top_k_phases must be positive".to_string());
        }
        if self.max_multiple == 0 {
            return Err("max_multiple must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_batches, 3);
        assert_eq!(config.update_strength, 2.0);
    }

    #[test]
    fn presets_are_valid() {
        assert!(Config::quick().validate().is_ok());
        assert!(Config::balanced().validate().is_ok());
        assert!(Config::thorough().validate().is_ok());
        assert_eq!(Config::quick().min_batches, 2);
        assert_eq!(Config::thorough().min_batches, 5);
    }

    #[test]
    fn builder_methods() {
        let config = Config::new()
            .update_strength(1.0)
            .min_batches(10)
            .base_confidence_threshold(0.7)
            .top_k_phases(2);
        assert_eq!(config.update_strength, 1.0);
        assert_eq!(config.min_batches, 10);
        assert_eq!(config.base_confidence_threshold, 0.7);
        assert_eq!(config.top_k_phases, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let mut config = Config::default();
        config.confidence_clamp = (0.9, 0.25);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.update_strength = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    #[should_panic]
    fn builder_rejects_zero_strength() {
        Config::new().update_strength(0.0);
    }

    #[test]
    #[should_panic]
    fn builder_rejects_zero_batches() {
        Config::new().min_batches(0);
    }
}
