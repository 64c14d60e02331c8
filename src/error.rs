//! Error taxonomy for the inference boundary.
//!
//! Only malformed input surfaces as an error. Degenerate posteriors and
//! candidates that fail verification are recoverable return values
//! (`best = None`, silent exclusion), never errors.

use thiserror::Error;

/// Errors raised at the inference boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The structured candidate set is empty for the given parameters:
    /// `φ(n)` has no divisor in `(1, n)`. Surfaced immediately rather than
    /// falling back to an unconstrained search.
    #[error("no valid hypotheses for n={n}: phi(n)={phi} has no divisor in (1, n)")]
    NoValidHypotheses {
        /// The modulus that produced the empty candidate set.
        n: u64,
        /// Euler's totient of that modulus.
        phi: u64,
    },

    /// Domain parameters failed boundary validation.
    #[error("invalid domain parameters: {0}")]
    InvalidParameters(String),

    /// The declared noise model is outside its legal ranges.
    #[error("invalid noise model: {0}")]
    InvalidNoiseModel(String),
}
