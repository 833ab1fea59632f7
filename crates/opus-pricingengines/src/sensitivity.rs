//! Finite-difference Greeks for any pricer.
//!
//! [`finite_difference_greeks`] bumps one input of a [`PricingRequest`] at a
//! time, re-runs the supplied pricing closure on each bumped copy and
//! combines the results with the difference formulas below. The lattice and
//! Monte Carlo engines share it and differ only in their [`BumpConfig`].
//!
//! | Greek | Formula |
//! |---|---|
//! | delta | `[f(S+δS) − f(S−δS)] / 2δS` |
//! | gamma | `[f(S+δS) − 2f(S) + f(S−δS)] / δS²` |
//! | theta | backward `[f(T⁻) − f(T)] / δT`, central `[f(T⁻) − f(T+δT)] / 2δT` |
//! | vega  | `[f(σ+δσ) − f(σ−δσ)] / 2δσ` |
//! | rho   | `[f(r+δr) − f(r−δr)] / 2δr` |
//!
//! with `T⁻ = max(T − δT, floor)`.
//!
//! Spot and volatility must stay positive. When the down-bump would take
//! either to zero or below, that Greek switches to a forward difference:
//! delta `[f(S+δS) − f(S)] / δS`, gamma `[f(S+2δS) − 2f(S+δS) + f(S)] / δS²`
//! and vega `[f(σ+δσ) − f(σ)] / δσ`.

use opus_core::{ensure, errors::Result, Real, Time};
use opus_instruments::{Greeks, PricingRequest};
use tracing::{debug, warn};

/// Size of a bump, either absolute or a fraction of the bumped value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bump {
    /// `δ = value · fraction`.
    Relative(Real),
    /// `δ` independent of the bumped value.
    Absolute(Real),
}

impl Bump {
    /// The bump width for an input currently at `value`.
    pub fn width(self, value: Real) -> Real {
        match self {
            Bump::Relative(fraction) => fraction * value,
            Bump::Absolute(width) => width,
        }
    }
}

/// Difference scheme for theta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThetaScheme {
    /// `[f(T⁻) − f(T)] / δT`: compares the shortened maturity with the base.
    Backward,
    /// `[f(T⁻) − f(T+δT)] / 2δT`: shortened against lengthened maturity.
    Central,
}

/// Bump widths and theta scheme for [`finite_difference_greeks`].
///
/// | Field | Lattice | Monte Carlo |
/// |---|---|---|
/// | `spot` | 1 % relative | 1e-4 absolute |
/// | `time` | 1/365 | 1e-4 |
/// | `time_floor` | 1e-5 | 1e-6 |
/// | `volatility` | 0.01 | 1e-4 |
/// | `rate` | 1e-4 | 1e-4 |
/// | `theta` | backward | central |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpConfig {
    /// Spot bump.
    pub spot: Bump,
    /// Maturity bump in years.
    pub time: Time,
    /// Lower bound for the shortened maturity.
    pub time_floor: Time,
    /// Absolute volatility bump.
    pub volatility: Real,
    /// Absolute rate bump.
    pub rate: Real,
    /// Theta difference scheme.
    pub theta: ThetaScheme,
}

impl BumpConfig {
    /// Settings used by the binomial engine.
    pub const fn lattice() -> Self {
        Self {
            spot: Bump::Relative(0.01),
            time: 1.0 / 365.0,
            time_floor: 1e-5,
            volatility: 0.01,
            rate: 1e-4,
            theta: ThetaScheme::Backward,
        }
    }

    /// Settings used by the Monte Carlo engine.
    pub const fn monte_carlo() -> Self {
        Self {
            spot: Bump::Absolute(1e-4),
            time: 1e-4,
            time_floor: 1e-6,
            volatility: 1e-4,
            rate: 1e-4,
            theta: ThetaScheme::Central,
        }
    }

    /// Number of pricer calls one Greeks estimate makes, base price included.
    ///
    /// Exact whenever spot and volatility both exceed their bumps. A forward
    /// volatility difference saves one call.
    pub fn evaluations(&self) -> usize {
        match self.theta {
            ThetaScheme::Backward => 8,
            ThetaScheme::Central => 9,
        }
    }
}

/// Estimate the Greeks of `price` at `request` by bump-and-revalue.
///
/// `price` is called once for the base request and once per bumped copy,
/// see [`BumpConfig::evaluations`]. The base price is attached to the
/// result. The first failing evaluation aborts the estimate.
///
/// # Errors
/// `Error::Precondition` when a bump width is not positive; otherwise any
/// error returned by `price`.
///
/// # Example
/// ```
/// use opus_instruments::PricingRequest;
/// use opus_pricingengines::{finite_difference_greeks, BumpConfig};
///
/// // V = S²: delta = 2S, gamma = 2
/// let req = PricingRequest::new(10.0, 10.0, 1.0, 0.0, 0.2);
/// let g = finite_difference_greeks(|r| Ok(r.spot * r.spot), &req, &BumpConfig::lattice())
///     .unwrap();
/// assert!((g.delta - 20.0).abs() < 1e-9);
/// assert!((g.gamma - 2.0).abs() < 1e-9);
/// ```
pub fn finite_difference_greeks<F>(
    mut price: F,
    request: &PricingRequest,
    config: &BumpConfig,
) -> Result<Greeks>
where
    F: FnMut(&PricingRequest) -> Result<Real>,
{
    let ds = config.spot.width(request.spot);
    let dt = config.time;
    let dv = config.volatility;
    let dr = config.rate;
    ensure!(ds > 0.0, "spot bump must be positive, got {ds}");
    ensure!(dt > 0.0, "maturity bump must be positive, got {dt}");
    ensure!(dv > 0.0, "volatility bump must be positive, got {dv}");
    ensure!(dr > 0.0, "rate bump must be positive, got {dr}");

    let base = price(request)?;

    let spot = request.spot;
    let spot_up = price(&request.with_spot(spot + ds))?;
    let (delta, gamma) = if spot - ds > 0.0 {
        let spot_down = price(&request.with_spot(spot - ds))?;
        (
            (spot_up - spot_down) / (2.0 * ds),
            (spot_up - 2.0 * base + spot_down) / (ds * ds),
        )
    } else {
        warn!(spot, bump = ds, "spot bump reaches zero, using forward differences");
        let spot_up2 = price(&request.with_spot(spot + 2.0 * ds))?;
        (
            (spot_up - base) / ds,
            (spot_up2 - 2.0 * spot_up + base) / (ds * ds),
        )
    };

    let shortened = request.with_maturity((request.maturity - dt).max(config.time_floor));
    let theta = match config.theta {
        ThetaScheme::Backward => (price(&shortened)? - base) / dt,
        ThetaScheme::Central => {
            let lengthened = request.with_maturity(request.maturity + dt);
            (price(&shortened)? - price(&lengthened)?) / (2.0 * dt)
        }
    };

    let vol = request.volatility;
    let vol_up = price(&request.with_volatility(vol + dv))?;
    let vega = if vol - dv > 0.0 {
        (vol_up - price(&request.with_volatility(vol - dv))?) / (2.0 * dv)
    } else {
        warn!(
            volatility = vol,
            bump = dv,
            "volatility bump reaches zero, using a forward difference"
        );
        (vol_up - base) / dv
    };

    let rate = request.rate;
    let rate_up = price(&request.with_rate(rate + dr))?;
    let rate_down = price(&request.with_rate(rate - dr))?;

    let greeks = Greeks {
        price: Some(base),
        delta,
        gamma,
        theta,
        vega,
        rho: (rate_up - rate_down) / (2.0 * dr),
    };
    debug!(?request, ?greeks, scheme = ?config.theta, "finite-difference greeks");
    Ok(greeks)
}
