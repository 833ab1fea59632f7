//! # opus-pricingengines
//!
//! Pricing engines for vanilla and Asian options, and the finite-difference
//! sensitivity estimator they share.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`] — Black-Scholes closed form, analytic Greeks
//! - [`BinomialEngine`] — Cox-Ross-Rubinstein lattice, European or American
//!   exercise
//! - [`MonteCarloEngine`] — risk-neutral simulation, European or Asian
//!   (arithmetic average) payoff
//!
//! Lattice and Monte Carlo Greeks come from [`sensitivity`], which bumps
//! one input at a time and re-runs the full pricer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod monte_carlo_engine;
pub mod sensitivity;

pub use analytic_european_engine::{
    black_scholes_call, black_scholes_greeks, black_scholes_price, black_scholes_put,
    AnalyticEuropeanEngine,
};
pub use binomial_engine::{binomial_call, binomial_put, BinomialEngine};
pub use monte_carlo_engine::{monte_carlo_call, monte_carlo_put, MonteCarloEngine, SimulationResult};
pub use sensitivity::{finite_difference_greeks, Bump, BumpConfig, ThetaScheme};
