//! Prior weight components for period candidates.
//!
//! Three independent weights, multiplied together then renormalized by the
//! space builder:
//!
//! - **Occam**: `1/√r`. Smaller periods need fewer measurements to detect
//!   reliably, so they get more prior mass.
//! - **Structure**: `√d(r)`. Divisor-rich candidates expose more internal
//!   structure to the downstream extraction stage.
//! - **Smoothness**: bonus when every prime factor is small, penalty
//!   proportional to any remaining large prime factor.

use crate::constants::{SMOOTH_BONUS, SMOOTH_PRIME_BOUND};

/// Occam weight `1/√r`.
pub fn occam_weight(r: u64) -> f64 {
    1.0 / (r as f64).sqrt()
}

/// Structure weight `√(number of divisors)`.
pub fn structure_weight(divisor_count: usize) -> f64 {
    (divisor_count as f64).sqrt()
}

/// Smoothness weight from the largest prime factor.
///
/// Candidates whose largest prime factor stays within
/// [`SMOOTH_PRIME_BOUND`] get the flat [`SMOOTH_BONUS`]; beyond that, the
/// weight decays proportionally to the large factor.
pub fn smoothness_weight(largest_prime_factor: u64) -> f64 {
    if largest_prime_factor <= SMOOTH_PRIME_BOUND {
        SMOOTH_BONUS
    } else {
        SMOOTH_PRIME_BOUND as f64 / largest_prime_factor as f64
    }
}
