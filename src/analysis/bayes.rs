//! Bayesian posterior engine.
//!
//! Maintains a probability distribution over period candidates and applies
//! noise-aware likelihood updates batch by batch.
//!
//! ## Update rule
//!
//! ```text
//! posterior[r] ← posterior[r] · (1 + weight · likelihood · strength)
//! ```
//!
//! where `weight` is the measurement's count share within its batch. The
//! rule is multiplicative and deliberately conservative: it is not the
//! textbook Bayesian product, but it never sets a candidate's mass to
//! exactly zero from a single low-likelihood observation, so one noisy
//! batch cannot collapse the distribution prematurely.
//!
//! After every update the distribution is renormalized to sum 1. If total
//! mass reaches zero or turns non-finite, the posterior is left degenerate
//! (all zeros): the terminal "no candidate supported" state, handled by
//! the caller as `best = None`, never as a panic.

use crate::hypothesis::HypothesisSpace;
use crate::result::Posterior;
use crate::types::{Measurement, NoiseModel};

/// Initialize a posterior from the space's normalized priors.
pub fn init_posterior(space: &HypothesisSpace) -> Posterior {
    space
        .hypotheses()
        .iter()
        .map(|h| (h.period, h.prior))
        .collect()
}

/// Apply one measurement batch to the posterior.
///
/// Empty batches and zero-count batches are no-ops. `strength` scales how
/// aggressively likelihood evidence moves the distribution.
pub fn update(
    posterior: &mut Posterior,
    batch: &[Measurement],
    space: &HypothesisSpace,
    noise: &NoiseModel,
    strength: f64,
) {
    let total: u64 = batch.iter().map(|m| m.count).sum();
    if total == 0 {
        return;
    }

    for measurement in batch {
        if measurement.count == 0 {
            continue;
        }
        let weight = measurement.count as f64 / total as f64;
        for hypothesis in space.hypotheses() {
            let likelihood = space.likelihood(hypothesis, measurement.value, noise);
            if let Some(mass) = posterior.get_mut(&hypothesis.period) {
                *mass *= 1.0 + weight * likelihood * strength;
            }
        }
    }

    normalize(posterior);
}

/// Renormalize the posterior to sum 1, or zero it out if total mass is
/// gone or non-finite.
pub fn normalize(posterior: &mut Posterior) {
    let total: f64 = posterior.values().sum();
    if total > 0.0 && total.is_finite() {
        for mass in posterior.values_mut() {
            *mass /= total;
        }
    } else {
        for mass in posterior.values_mut() {
            *mass = 0.0;
        }
    }
}

/// Shannon entropy `−Σ p·log2(p)` over nonzero masses, in bits.
///
/// Bounded by `[0, log2(k)]` for `k` candidates; 0 for a one-hot
/// distribution and for the degenerate all-zero state.
pub fn shannon_entropy(posterior: &Posterior) -> f64 {
    posterior
        .values()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Best candidate restricted to hypotheses that pass validation, together
/// with its mass. `None` when no validated hypothesis carries positive
/// mass.
pub fn best_validated(posterior: &Posterior, space: &HypothesisSpace) -> Option<(u64, f64)> {
    space
        .hypotheses()
        .iter()
        .filter(|h| space.validate(h))
        .filter_map(|h| {
            let mass = *posterior.get(&h.period)?;
            (mass > 0.0).then_some((h.period, mass))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DomainParams;

    fn space_21() -> HypothesisSpace {
        HypothesisSpace::build(&DomainParams::new(21, 2, 8)).unwrap()
    }

    fn order_six_batch(shots: u64) -> Vec<Measurement> {
        [0u64, 42, 85, 128, 170, 213]
            .iter()
            .map(|&v| Measurement::new(v, shots))
            .collect()
    }

    #[test]
    fn posterior_initialized_from_priors() {
        let space = space_21();
        let posterior = init_posterior(&space);
        let total: f64 = posterior.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(posterior.len(), space.hypotheses().len());
    }

    #[test]
    fn update_preserves_normalization() {
        let space = space_21();
        let noise = NoiseModel::default();
        let mut posterior = init_posterior(&space);
        for _ in 0..10 {
            update(&mut posterior, &order_six_batch(50), &space, &noise, 2.0);
            let total: f64 = posterior.values().sum();
            assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
        }
    }

    #[test]
    fn signal_concentrates_on_true_order() {
        let space = space_21();
        let noise = NoiseModel::default();
        let mut posterior = init_posterior(&space);
        for _ in 0..5 {
            update(&mut posterior, &order_six_batch(100), &space, &noise, 2.0);
        }
        let (best, confidence) = best_validated(&posterior, &space).unwrap();
        assert_eq!(best, 6);
        assert!(confidence > 0.4, "confidence = {}", confidence);
    }

    #[test]
    fn true_order_survives_long_jittered_run() {
        let space = space_21();
        let noise = NoiseModel::default();
        // Every value sits one bin off its ideal phase. The wider kernel of
        // 12 tolerates the jitter slightly better per shot; sixty batches of
        // compounding must still leave the true order on top.
        let jittered: Vec<Measurement> = [1u64, 44, 86, 129, 172, 214]
            .iter()
            .map(|&v| Measurement::new(v, 100))
            .collect();
        let mut posterior = init_posterior(&space);
        for _ in 0..60 {
            update(&mut posterior, &jittered, &space, &noise, 2.0);
        }
        let (best, _) = best_validated(&posterior, &space).unwrap();
        assert_eq!(best, 6);
    }

    #[test]
    fn empty_batch_is_noop() {
        let space = space_21();
        let noise = NoiseModel::default();
        let mut posterior = init_posterior(&space);
        let before = posterior.clone();
        update(&mut posterior, &[], &space, &noise, 2.0);
        update(&mut posterior, &[Measurement::new(5, 0)], &space, &noise, 2.0);
        assert_eq!(posterior, before);
    }

    #[test]
    fn single_noisy_batch_never_zeroes_mass() {
        let space = space_21();
        let noise = NoiseModel::new(0.5, 5.0);
        let mut posterior = init_posterior(&space);
        // A batch supporting no candidate in particular
        update(
            &mut posterior,
            &[Measurement::new(100, 50), Measurement::new(7, 50)],
            &space,
            &noise,
            2.0,
        );
        assert!(posterior.values().all(|&p| p > 0.0));
    }

    #[test]
    fn entropy_bounds() {
        let space = space_21();
        let k = space.hypotheses().len() as f64;
        let posterior = init_posterior(&space);
        let h = shannon_entropy(&posterior);
        assert!(h >= 0.0 && h <= k.log2() + 1e-12);

        // one-hot posterior has entropy 0
        let mut one_hot = Posterior::new();
        one_hot.insert(6, 1.0);
        assert_eq!(shannon_entropy(&one_hot), 0.0);

        // uniform posterior has entropy log2(k)
        let uniform: Posterior = space
            .hypotheses()
            .iter()
            .map(|h| (h.period, 1.0 / k))
            .collect();
        assert!((shannon_entropy(&uniform) - k.log2()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_normalization_zeroes_out() {
        let mut posterior = Posterior::new();
        posterior.insert(2, 0.0);
        posterior.insert(3, 0.0);
        normalize(&mut posterior);
        assert!(posterior.values().all(|&p| p == 0.0));
        assert_eq!(shannon_entropy(&posterior), 0.0);

        let mut bad = Posterior::new();
        bad.insert(2, f64::NAN);
        bad.insert(3, 1.0);
        normalize(&mut bad);
        assert!(bad.values().all(|&p| p == 0.0));
    }

    #[test]
    fn best_restricted_to_validated() {
        let space = space_21();
        // Force all mass onto a non-validating candidate
        let mut posterior = Posterior::new();
        for h in space.hypotheses() {
            posterior.insert(h.period, 0.0);
        }
        posterior.insert(4, 1.0); // 2^4 mod 21 = 16, fails the gate
        assert_eq!(best_validated(&posterior, &space), None);
    }
}
