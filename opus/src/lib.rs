//! # opus
//!
//! Option pricing and uncertainty sensitivities: European and American
//! vanilla options and arithmetic-average Asian options under
//! Black-Scholes dynamics, priced with a closed form, a binomial lattice or
//! Monte Carlo simulation.
//!
//! This crate is a **façade** over the workspace crates and adds a single
//! entry point, [`price`] / [`greeks`], dispatching on a [`Method`].
//!
//! ## Quick start
//!
//! ```rust
//! use opus::{ExerciseStyle, Method, OptionType, PricingRequest};
//!
//! let request = PricingRequest::new(100.0, 100.0, 1.0, 0.02, 0.2);
//!
//! let call = opus::price(&Method::Analytic, OptionType::Call, &request).unwrap();
//! assert!((call - 8.916).abs() < 0.01);
//!
//! let american = Method::Binomial { steps: 200, exercise: ExerciseStyle::American };
//! let greeks = opus::greeks(&american, OptionType::Put, &request).unwrap();
//! assert!(greeks.delta < 0.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod method;

/// Core types, aliases, and error definitions.
pub use opus_core as core;

/// Normal distribution, random number generation and statistics.
pub use opus_math as math;

/// Option types, styles, requests, Greeks and the engine trait.
pub use opus_instruments as instruments;

/// Numerical methods (binomial lattice, Monte Carlo).
pub use opus_methods as methods;

/// Pricing engines.
pub use opus_pricingengines as pricingengines;

pub use method::Method;
pub use opus_core::{Error, Result};
pub use opus_instruments::{
    ExerciseStyle, Greeks, OptionType, PathStyle, PricingEngine, PricingRequest,
};

use opus_core::Real;

/// Price a call or put with the given method.
pub fn price(
    method: &Method,
    option_type: OptionType,
    request: &PricingRequest,
) -> Result<Real> {
    method.engine().price(option_type, request)
}

/// Greeks of a call or put with the given method.
///
/// Analytic Greeks are closed-form; binomial and Monte Carlo Greeks are
/// finite differences over repeated pricings. The result carries the base
/// price for every method.
pub fn greeks(
    method: &Method,
    option_type: OptionType,
    request: &PricingRequest,
) -> Result<Greeks> {
    method.engine().greeks(option_type, request)
}
