//! Greeks calculation result.

use opus_core::Real;
use std::collections::BTreeMap;

/// First- and second-order sensitivities of an option price.
///
/// | Field | Definition |
/// |---|---|
/// | `delta` | ∂V/∂S |
/// | `gamma` | ∂²V/∂S² |
/// | `theta` | −∂V/∂T (value lost per year as maturity shortens) |
/// | `vega`  | ∂V/∂σ, per 1.0 absolute volatility |
/// | `rho`   | ∂V/∂r, per 1.0 absolute rate |
///
/// `price` carries the base valuation when the engine produced one while
/// computing the sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Base price, when reported alongside the sensitivities.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub price: Option<Real>,
    /// Delta: ∂V/∂S.
    pub delta: Real,
    /// Gamma: ∂²V/∂S².
    pub gamma: Real,
    /// Theta: −∂V/∂T.
    pub theta: Real,
    /// Vega: ∂V/∂σ.
    pub vega: Real,
    /// Rho: ∂V/∂r.
    pub rho: Real,
}

impl Greeks {
    /// Attach the base price.
    pub fn with_price(mut self, price: Real) -> Self {
        self.price = Some(price);
        self
    }

    /// Iterate over `(name, value)` pairs: `price` first when present, then
    /// `delta`, `gamma`, `theta`, `vega`, `rho`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Real)> {
        self.price
            .map(|p| ("price", p))
            .into_iter()
            .chain([
                ("delta", self.delta),
                ("gamma", self.gamma),
                ("theta", self.theta),
                ("vega", self.vega),
                ("rho", self.rho),
            ])
    }

    /// The Greeks as a name → value mapping.
    pub fn to_map(&self) -> BTreeMap<&'static str, Real> {
        self.iter().collect()
    }
}
