//! The market and contract inputs of a single pricing call.

use opus_core::{DiscountFactor, Rate, Real, Time, Volatility};

/// Spot, strike, maturity, rate and volatility of one pricing call.
///
/// Rates and volatilities are decimals (0.02 = 2 %), maturity is in years.
/// A request is a plain value: the sensitivity estimator derives bumped
/// copies through the `with_*` methods and never mutates the original.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRequest {
    /// Spot price of the underlying, `S`.
    pub spot: Real,
    /// Strike price, `K`.
    pub strike: Real,
    /// Time to maturity in years, `T`.
    pub maturity: Time,
    /// Continuously-compounded risk-free rate, `r`.
    pub rate: Rate,
    /// Volatility of the underlying, `σ`.
    pub volatility: Volatility,
}

impl PricingRequest {
    /// Create a new request.
    pub fn new(spot: Real, strike: Real, maturity: Time, rate: Rate, volatility: Volatility) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
        }
    }

    /// Copy with a different spot.
    pub fn with_spot(self, spot: Real) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a different maturity.
    pub fn with_maturity(self, maturity: Time) -> Self {
        Self { maturity, ..self }
    }

    /// Copy with a different rate.
    pub fn with_rate(self, rate: Rate) -> Self {
        Self { rate, ..self }
    }

    /// Copy with a different volatility.
    pub fn with_volatility(self, volatility: Volatility) -> Self {
        Self { volatility, ..self }
    }

    /// Discount factor to maturity, `e^(−rT)`.
    #[inline]
    pub fn discount(&self) -> DiscountFactor {
        (-self.rate * self.maturity).exp()
    }

    /// Name of the first input for which the Black-Scholes model is
    /// undefined (non-positive maturity, volatility, spot or strike), or
    /// `None` when all are valid.
    pub fn degenerate_input(&self) -> Option<&'static str> {
        if !(self.maturity > 0.0) {
            Some("maturity")
        } else if !(self.volatility > 0.0) {
            Some("volatility")
        } else if !(self.spot > 0.0) {
            Some("spot")
        } else if !(self.strike > 0.0) {
            Some("strike")
        } else {
            None
        }
    }
}
