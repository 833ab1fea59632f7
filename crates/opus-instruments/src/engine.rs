//! The pricing-engine trait.

use crate::{Greeks, OptionType, PricingRequest};
use opus_core::{errors::Result, Real};

/// A pricing method able to value a call or put and estimate its Greeks.
///
/// Engines are immutable configuration values (step counts, exercise or path
/// style, simulation size). They hold no state between calls, so one engine
/// can serve any number of concurrent requests.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// Price the option described by `option_type` and `request`.
    fn price(&self, option_type: OptionType, request: &PricingRequest) -> Result<Real>;

    /// Estimate the Greeks of the option described by `option_type` and
    /// `request`.
    fn greeks(&self, option_type: OptionType, request: &PricingRequest) -> Result<Greeks>;
}
