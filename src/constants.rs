//! Fixed numerical constants for the inference pipeline.

/// Weight of the Bayesian posterior in the consensus blend.
pub const BAYES_WEIGHT: f64 = 0.6;

/// Weight of the frequency-analysis score in the consensus blend.
pub const FREQUENCY_WEIGHT: f64 = 0.25;

/// Weight of the recurrence-analysis score in the consensus blend.
pub const RECURRENCE_WEIGHT: f64 = 0.15;

/// Base width of the phase-distance kernel, in units of one phase bin.
///
/// The effective width for a candidate `r` is
/// `KERNEL_WIDTH * (1 + ln r) / 2^phase_bits`: larger candidates get a wider
/// tolerance, reflecting their coarser phase resolution.
pub const KERNEL_WIDTH: f64 = 2.0;

/// Largest prime factor still considered "smooth" for prior weighting.
pub const SMOOTH_PRIME_BOUND: u64 = 13;

/// Multiplicative prior bonus for candidates built only from small primes.
pub const SMOOTH_BONUS: f64 = 1.25;

/// Tolerance (fraction of the phase circle) for matching an observed phase
/// against an expected rational phase `k/r` during divisor scanning.
pub const PHASE_TOLERANCE: f64 = 0.02;

/// Minimum fraction of total histogram mass that must sit near expected
/// phases for a divisor-scan candidate to be accepted.
pub const EVIDENCE_THRESHOLD: f64 = 0.2;

/// Upper bound on periods examined by the direct divisor scan.
pub const DIVISOR_SCAN_LIMIT: u64 = 1000;

/// Fraction of the top observed count a value must reach to participate in
/// recurrence-gap analysis.
pub const RECURRENCE_PROMINENCE: f64 = 0.25;
