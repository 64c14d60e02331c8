//! Analysis pipeline for period inference.
//!
//! Three independently computed views of the measurement evidence:
//!
//! 1. **Bayesian posterior** ([`bayes`]): noise-aware multiplicative updates
//!    over the hypothesis space
//! 2. **Frequency analysis** ([`frequency`]): overlap between each
//!    hypothesis's expected phase distribution and the observed histogram
//! 3. **Recurrence analysis** ([`recurrence`]): repeat-gap intervals in the
//!    observed values consistent with each candidate
//!
//! The [`consensus`] combiner blends all three into one ranked distribution
//! with an agreement score.

pub mod bayes;
pub mod consensus;
pub mod frequency;
pub mod recurrence;

pub use bayes::{init_posterior, shannon_entropy, update};
pub use consensus::{combine, ConsensusOutcome};
pub use frequency::frequency_scores;
pub use recurrence::recurrence_scores;
