//! # opus-methods
//!
//! Numerical methods: the recombining binomial lattice with backward
//! induction, and the Monte Carlo path simulation framework.
//!
//! # Modules
//!
//! * [`lattice`] — CRR binomial tree and backward-induction pricing
//! * [`monte_carlo`] — path generation, path pricing, simulation driver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial tree, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation, pricing, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, BinomialTree, LatticeState};
pub use monte_carlo::{
    AsianArithmeticPathPricer, EuropeanPathPricer, MonteCarloModel, Path, PathGenerator,
    PathPricer,
};
