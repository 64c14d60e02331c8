//! # period-oracle
//!
//! Estimate a hidden period from a stream of noisy, discrete measurement
//! outcomes, where the true period is constrained to a structured candidate
//! set rather than an arbitrary value.
//!
//! This crate provides the statistical machinery for noise-aware period
//! finding, outputting:
//! - Best period candidate with a posterior confidence (0.0-1.0)
//! - Shannon entropy of the posterior over all candidates
//! - Multi-method consensus score (Bayesian + frequency + recurrence)
//! - Early-stop decision under progressive batch feeding
//!
//! ## Model
//!
//! For a modulus `N` and base `a` with `gcd(a, N) = 1`, the multiplicative
//! order `r` of `a` divides Euler's totient `φ(N)`. The hypothesis space is
//! therefore restricted to divisors of `φ(N)`, with non-uniform priors
//! favoring small, divisor-rich, smooth candidates. Noisy phase measurements
//! update the posterior through a mixture likelihood:
//!
//! ```text
//! P(obs | r) = (1 - e) · Kernel(phase distance to nearest k/r) + e · Uniform
//! ```
//!
//! so a single noisy batch can never collapse a candidate to zero mass.
//!
//! Every candidate promoted to a result must pass the verification identity
//! `a^r ≡ 1 (mod N)`; unverified candidates are excluded regardless of how
//! much measurement support they appear to have.
//!
//! ## Quick Start
//!
//! ```
//! use period_oracle::{DomainParams, Measurement, NoiseModel, PeriodOracle};
//!
//! // Phase histogram concentrated at multiples of 256/6 (true order of
//! // 2 mod 21 is 6).
//! let measurements: Vec<Measurement> = [0u64, 42, 85, 128, 170, 213]
//!     .iter()
//!     .map(|&v| Measurement::new(v, 100))
//!     .collect();
//!
//! let params = DomainParams::new(21, 2, 8);
//! let result = PeriodOracle::new()
//!     .infer(&params, &measurements, &NoiseModel::default())
//!     .unwrap();
//!
//! assert_eq!(result.best, Some(6));
//! ```
//!
//! ## Progressive inference
//!
//! [`PeriodOracle::infer_progressive`] consumes an ordered sequence of
//! batches and stops early once the posterior is both confident (best
//! candidate above an adaptive threshold) and concentrated (entropy below an
//! adaptive threshold). Thresholds adapt to the average complexity and
//! richness of the hypothesis space: hard problems get a lower confidence
//! bar, structure-rich problems a higher one.
//!
//! The inference core is a pure function of (priors, measurement batches,
//! noise model): no global state, no internal randomness. Measurement
//! generation is injected through the [`measurement::MeasurementSource`]
//! trait; a seedable [`measurement::SyntheticSource`] is provided for
//! reproducible tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod oracle;
mod result;
mod types;

// Functional modules
pub mod adaptive;
pub mod analysis;
pub mod extraction;
pub mod hypothesis;
pub mod measurement;
pub mod numtheory;

// Re-exports for public API
pub use config::Config;
pub use constants::{BAYES_WEIGHT, FREQUENCY_WEIGHT, RECURRENCE_WEIGHT};
pub use error::InferenceError;
pub use oracle::PeriodOracle;
pub use result::{InferenceResult, Posterior};
pub use types::{DomainParams, HypothesisMeta, Measurement, NoiseModel};
