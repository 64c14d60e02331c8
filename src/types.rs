//! Core value types shared across the inference pipeline.

use serde::{Deserialize, Serialize};

use crate::numtheory::gcd;

/// A single discrete measurement outcome.
///
/// `value` is an integer phase reading in `[0, 2^phase_bits)`; `count` is
/// how many times that outcome was observed. Measurements are produced
/// externally and consumed immediately; the core never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// The observed outcome value.
    pub value: u64,
    /// Number of times this outcome was observed.
    pub count: u64,
}

impl Measurement {
    /// Create a new measurement.
    pub fn new(value: u64, count: u64) -> Self {
        Self { value, count }
    }
}

/// Declared noise characteristics of the measurement source.
///
/// Immutable per inference call; the core passes it through to the
/// likelihood model and never mutates it. How the noise was actually
/// produced is the measurement source's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Probability that an observation is pure noise, in `[0, 1]`.
    pub error_rate: f64,
    /// Coherence time of the source. Shorter coherence widens the phase
    /// kernel (coarser effective resolution). Must be positive.
    pub coherence_time: f64,
    /// Optional per-gate error rate; inflates the kernel width when present.
    pub gate_error_rate: Option<f64>,
}

impl NoiseModel {
    /// Create a noise model with the given error rate and coherence time.
    pub fn new(error_rate: f64, coherence_time: f64) -> Self {
        Self {
            error_rate,
            coherence_time,
            gate_error_rate: None,
        }
    }

    /// Attach a per-gate error rate.
    pub fn with_gate_error(mut self, rate: f64) -> Self {
        self.gate_error_rate = Some(rate);
        self
    }

    /// Check that all fields are inside their declared ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(format!(
                "error_rate must be in [0, 1], got {}",
                self.error_rate
            ));
        }
        if !self.coherence_time.is_finite() || self.coherence_time <= 0.0 {
            return Err(format!(
                "coherence_time must be positive and finite, got {}",
                self.coherence_time
            ));
        }
        if let Some(g) = self.gate_error_rate {
            if !(0.0..=1.0).contains(&g) {
                return Err(format!("gate_error_rate must be in [0, 1], got {}", g));
            }
        }
        Ok(())
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            error_rate: 0.1,
            coherence_time: 5.0,
            gate_error_rate: None,
        }
    }
}

/// Problem parameters for the period-finding instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParams {
    /// The modulus whose multiplicative structure is being probed.
    pub n: u64,
    /// The base whose multiplicative order mod `n` is sought.
    pub base: u64,
    /// Phase resolution: measurement values live in `[0, 2^phase_bits)`.
    pub phase_bits: u32,
}

impl DomainParams {
    /// Create domain parameters. Call [`DomainParams::validate`] before use;
    /// the oracle does so at its boundary.
    pub fn new(n: u64, base: u64, phase_bits: u32) -> Self {
        Self {
            n,
            base,
            phase_bits,
        }
    }

    /// The size of the phase space, `2^phase_bits`.
    pub fn phase_space(&self) -> u64 {
        1u64 << self.phase_bits
    }

    /// Check parameter sanity: `n >= 4`, `2 <= base < n`,
    /// `gcd(base, n) == 1`, `1 <= phase_bits <= 32`.
    pub fn validate(&self) -> Result<(), String> {
        if self.n < 4 {
            return Err(format!("n must be at least 4, got {}", self.n));
        }
        if self.base < 2 || self.base >= self.n {
            return Err(format!(
                "base must be in [2, n), got base={} n={}",
                self.base, self.n
            ));
        }
        if gcd(self.base, self.n) != 1 {
            return Err(format!(
                "base {} shares a factor with n {}; order is undefined",
                self.base, self.n
            ));
        }
        if self.phase_bits == 0 || self.phase_bits > 32 {
            return Err(format!(
                "phase_bits must be in [1, 32], got {}",
                self.phase_bits
            ));
        }
        Ok(())
    }
}

/// Fixed numeric metadata attached to each hypothesis.
///
/// A closed struct rather than an open string-keyed map: only these three
/// fields are ever read by the adaptive-threshold logic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HypothesisMeta {
    /// How hard this candidate is to resolve, normalized to `[0, 1]`
    /// (`log2(r) / log2(n)`).
    pub complexity: f64,
    /// Divisor richness relative to the richest candidate in the space,
    /// in `[0, 1]`.
    pub richness: f64,
    /// Smoothness in `(0, 1]`: `1 / (1 + ln(largest prime factor))`.
    pub smoothness: f64,
}
