//! Progressive batch controller.
//!
//! Feeds measurement batches through the posterior engine one at a time and
//! decides when the evidence is strong enough to stop:
//!
//! ```text
//! COLLECTING → (per batch) → [check] → COLLECTING | STOPPED
//! ```
//!
//! After at least `min_batches` batches, the controller stops early when the
//! best validated candidate's probability exceeds the confidence threshold
//! AND the posterior's Shannon entropy falls below the entropy threshold.
//! Both thresholds are adaptive, derived from the hypothesis space's mean
//! complexity and richness, and clamped to configured safe ranges so the
//! loop can neither never-stop nor always-stop.
//!
//! Processing is synchronous and strictly batch-ordered; the stop check at
//! batch boundaries is the only cancellation point.

mod loop_runner;
mod state;
mod thresholds;

pub use loop_runner::{run_progressive, run_streaming};
pub use state::ProgressiveState;
pub use thresholds::StopThresholds;
