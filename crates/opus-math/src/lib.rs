//! # opus-math
//!
//! Mathematical utilities: the normal distribution (via statrs), random
//! number generation and statistics accumulators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{
    GaussianRng, InverseCumulativeNormalRng, MersenneTwisterUniformRng, StandardNormalRng,
};
pub use statistics::Statistics;
