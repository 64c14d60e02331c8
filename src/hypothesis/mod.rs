//! Hypothesis space construction.
//!
//! The candidate set is constrained by domain structure, never uniform over
//! an unconstrained range: by Euler's theorem the multiplicative order of
//! `a` mod `n` divides `φ(n)` whenever `gcd(a, n) = 1`, so candidates are
//! exactly `{ r : r | φ(n), 1 < r < n }`. An empty constrained set is a
//! hard error ([`crate::InferenceError::NoValidHypotheses`]), not a silent
//! fallback to unconstrained search.
//!
//! Each candidate's prior combines three independent weights (see
//! [`priors`]), multiplied together and renormalized.

mod priors;

pub use priors::{occam_weight, smoothness_weight, structure_weight};

use std::collections::BTreeMap;

use crate::constants::KERNEL_WIDTH;
use crate::error::InferenceError;
use crate::numtheory::{divisors, euler_totient, largest_prime_factor, mod_pow};
use crate::types::{DomainParams, HypothesisMeta, NoiseModel};

/// A single period hypothesis: candidate value, normalized prior, and the
/// fixed metadata read by the adaptive-threshold logic.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    /// The candidate period.
    pub period: u64,
    /// Prior probability, normalized over the full space.
    pub prior: f64,
    /// Numeric metadata (complexity, richness, smoothness).
    pub meta: HypothesisMeta,
}

/// The full hypothesis space for one inference call.
///
/// Built once from problem parameters, read-only thereafter. Owns the
/// domain-specific likelihood, validation, and expected-distribution logic
/// so the posterior engine stays domain-agnostic.
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    params: DomainParams,
    phi: u64,
    hypotheses: Vec<Hypothesis>,
}

impl HypothesisSpace {
    /// Build the constrained hypothesis space for the given parameters.
    ///
    /// # Errors
    ///
    /// [`InferenceError::InvalidParameters`] if the parameters fail boundary
    /// validation; [`InferenceError::NoValidHypotheses`] if `φ(n)` has no
    /// divisor in `(1, n)`.
    pub fn build(params: &DomainParams) -> Result<Self, InferenceError> {
        params
            .validate()
            .map_err(InferenceError::InvalidParameters)?;

        let phi = euler_totient(params.n);
        let candidates: Vec<u64> = divisors(phi)
            .into_iter()
            .filter(|&r| r > 1 && r < params.n)
            .collect();

        if candidates.is_empty() {
            return Err(InferenceError::NoValidHypotheses { n: params.n, phi });
        }

        let divisor_counts: Vec<usize> =
            candidates.iter().map(|&r| divisors(r).len()).collect();
        let max_divisors = divisor_counts.iter().copied().max().unwrap_or(1).max(1);
        let log_n = (params.n as f64).log2();

        let mut hypotheses: Vec<Hypothesis> = candidates
            .iter()
            .zip(divisor_counts.iter())
            .map(|(&r, &d)| {
                let lpf = largest_prime_factor(r);
                let weight = occam_weight(r) * structure_weight(d) * smoothness_weight(lpf);
                let meta = HypothesisMeta {
                    complexity: ((r as f64).log2() / log_n).clamp(0.0, 1.0),
                    richness: d as f64 / max_divisors as f64,
                    smoothness: 1.0 / (1.0 + (lpf as f64).ln()),
                };
                Hypothesis {
                    period: r,
                    prior: weight,
                    meta,
                }
            })
            .collect();

        let total: f64 = hypotheses.iter().map(|h| h.prior).sum();
        debug_assert!(total.is_finite() && total > 0.0);
        for h in &mut hypotheses {
            h.prior /= total;
        }

        Ok(Self {
            params: *params,
            phi,
            hypotheses,
        })
    }

    /// The domain parameters this space was built from.
    pub fn params(&self) -> &DomainParams {
        &self.params
    }

    /// Euler's totient of `n`, computed once at build time.
    pub fn phi(&self) -> u64 {
        self.phi
    }

    /// The hypotheses, sorted ascending by period.
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Noise-aware likelihood of observing `value` under this hypothesis.
    ///
    /// A mixture, never a clean likelihood:
    /// `(1 - e) · kernel + e · uniform`, where the kernel is a
    /// wraparound-aware Gaussian in phase distance to the nearest `k/r` and
    /// the uniform component spreads over all `2^phase_bits` outcomes. The
    /// kernel width grows with `ln r` (coarser resolution for larger
    /// candidates) and with declining coherence, and its peak height shrinks
    /// by the same `1 + ln r` factor so total kernel mass stays equal across
    /// candidates.
    pub fn likelihood(&self, hypothesis: &Hypothesis, value: u64, noise: &NoiseModel) -> f64 {
        let m = self.params.phase_space() as f64;
        let r = hypothesis.period as f64;

        // Wraparound distance from the observed phase to the nearest k/r,
        // as a fraction of the phase circle.
        let frac = (value as f64 / m) * r;
        let dist = (frac - frac.round()).abs() / r;

        let width_scale = 1.0 + r.ln();
        let mut sigma = KERNEL_WIDTH * width_scale / m;
        sigma *= 1.0 + 1.0 / self_coherence(noise);
        if let Some(g) = noise.gate_error_rate {
            sigma *= 1.0 + g;
        }

        // Peak height shrinks by the same factor the width grows. The
        // expected phases of the true order are a subset of any multiple's,
        // so an unnormalized wider kernel would out-score the true order at
        // every shared phase and compound under the multiplicative update.
        let kernel = (-0.5 * (dist / sigma).powi(2)).exp() / width_scale;
        let uniform = 1.0 / m;
        (1.0 - noise.error_rate) * kernel + noise.error_rate * uniform
    }

    /// Verify the hypothesis against the number-theoretic identity
    /// `base^r ≡ 1 (mod n)`. The non-negotiable correctness gate: a
    /// candidate failing this is never promoted to a result.
    pub fn validate(&self, hypothesis: &Hypothesis) -> bool {
        mod_pow(self.params.base, hypothesis.period, self.params.n) == 1
    }

    /// Expected phase distribution under this hypothesis: mass `1/r` at
    /// each `round(k · 2^bits / r)` for `k = 0..r-1`.
    ///
    /// Collisions after rounding (possible when `r` approaches `2^bits`)
    /// accumulate.
    pub fn expected_distribution(&self, hypothesis: &Hypothesis) -> BTreeMap<u64, f64> {
        let m = self.params.phase_space();
        let r = hypothesis.period;
        let mut dist = BTreeMap::new();
        for k in 0..r {
            let value = ((k as f64 / r as f64) * m as f64).round() as u64 % m;
            *dist.entry(value).or_insert(0.0) += 1.0 / r as f64;
        }
        dist
    }

    /// Mean complexity across all hypotheses; drives adaptive thresholds.
    pub fn mean_complexity(&self) -> f64 {
        let n = self.hypotheses.len() as f64;
        self.hypotheses.iter().map(|h| h.meta.complexity).sum::<f64>() / n
    }

    /// Mean richness across all hypotheses; drives adaptive thresholds.
    pub fn mean_richness(&self) -> f64 {
        let n = self.hypotheses.len() as f64;
        self.hypotheses.iter().map(|h| h.meta.richness).sum::<f64>() / n
    }

    /// Look up a hypothesis by its period.
    pub fn get(&self, period: u64) -> Option<&Hypothesis> {
        self.hypotheses
            .binary_search_by_key(&period, |h| h.period)
            .ok()
            .map(|idx| &self.hypotheses[idx])
    }
}

fn self_coherence(noise: &NoiseModel) -> f64 {
    noise.coherence_time.max(f64::EPSILON)
}
