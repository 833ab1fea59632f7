//! Analytic European option engine (Black-Scholes).
//!
//! Prices European vanilla options with the closed-form Black-Scholes
//! formula and computes the Greeks from their closed-form derivatives:
//!
//! $$C = S N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.

use opus_core::{errors::Result, Error, Rate, Real, Time, Volatility};
use opus_instruments::{Greeks, OptionType, PricingEngine, PricingRequest};
use opus_math::{normal_cdf, normal_pdf};
use tracing::debug;

/// Analytic pricing engine for European vanilla options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

/// `(d1, d2, σ√T)` for a non-degenerate request.
fn d1_d2(request: &PricingRequest) -> (Real, Real, Real) {
    let std_dev = request.volatility * request.maturity.sqrt();
    let d1 = ((request.spot / request.strike).ln()
        + (request.rate + 0.5 * request.volatility * request.volatility) * request.maturity)
        / std_dev;
    (d1, d1 - std_dev, std_dev)
}

/// Black-Scholes price of a European call or put.
///
/// Returns 0.0 when the model is undefined, i.e. when maturity, volatility,
/// spot or strike is not positive.
pub fn black_scholes_price(option_type: OptionType, request: &PricingRequest) -> Real {
    if request.degenerate_input().is_some() {
        return 0.0;
    }
    let (d1, d2, _) = d1_d2(request);
    let df = request.discount();
    let (s, k) = (request.spot, request.strike);
    match option_type {
        OptionType::Call => s * normal_cdf(d1) - k * df * normal_cdf(d2),
        OptionType::Put => k * df * normal_cdf(-d2) - s * normal_cdf(-d1),
    }
}

/// Black-Scholes call price; 0.0 on degenerate input.
pub fn black_scholes_call(
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
) -> Real {
    let request = PricingRequest::new(spot, strike, maturity, rate, volatility);
    black_scholes_price(OptionType::Call, &request)
}

/// Black-Scholes put price; 0.0 on degenerate input.
pub fn black_scholes_put(
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
) -> Real {
    let request = PricingRequest::new(spot, strike, maturity, rate, volatility);
    black_scholes_price(OptionType::Put, &request)
}

/// Closed-form Black-Scholes Greeks, with the price attached.
///
/// Theta is per year and vega/rho are per 1.0 absolute move.
///
/// # Errors
/// `Error::DegenerateInput` naming the offending input when maturity,
/// volatility, spot or strike is not positive: the derivatives divide by
/// `S·σ·√T` there.
pub fn black_scholes_greeks(option_type: OptionType, request: &PricingRequest) -> Result<Greeks> {
    if let Some(input) = request.degenerate_input() {
        return Err(Error::DegenerateInput(format!(
            "{input} must be positive for Black-Scholes Greeks"
        )));
    }

    let (d1, d2, std_dev) = d1_d2(request);
    let (s, k, t, r) = (request.spot, request.strike, request.maturity, request.rate);
    let sqrt_t = t.sqrt();
    let df = request.discount();
    let npd1 = normal_pdf(d1);

    // Shared by both option types
    let gamma = npd1 / (s * std_dev);
    let vega = s * npd1 * sqrt_t;
    let decay = -s * npd1 * request.volatility / (2.0 * sqrt_t);

    let greeks = match option_type {
        OptionType::Call => Greeks {
            price: None,
            delta: normal_cdf(d1),
            gamma,
            theta: decay - r * k * df * normal_cdf(d2),
            vega,
            rho: k * t * df * normal_cdf(d2),
        },
        OptionType::Put => Greeks {
            price: None,
            delta: normal_cdf(d1) - 1.0,
            gamma,
            theta: decay + r * k * df * normal_cdf(-d2),
            vega,
            rho: -k * t * df * normal_cdf(-d2),
        },
    };
    Ok(greeks.with_price(black_scholes_price(option_type, request)))
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn price(&self, option_type: OptionType, request: &PricingRequest) -> Result<Real> {
        let price = black_scholes_price(option_type, request);
        debug!(%option_type, ?request, price, "black-scholes price");
        Ok(price)
    }

    fn greeks(&self, option_type: OptionType, request: &PricingRequest) -> Result<Greeks> {
        black_scholes_greeks(option_type, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn reference() -> PricingRequest {
        PricingRequest::new(100.0, 100.0, 1.0, 0.02, 0.2)
    }

    #[test]
    fn bs_reference_prices() {
        let call = black_scholes_call(100.0, 100.0, 1.0, 0.02, 0.2);
        let put = black_scholes_put(100.0, 100.0, 1.0, 0.02, 0.2);
        assert_abs_diff_eq!(call, 8.916, epsilon = 0.01);
        assert_abs_diff_eq!(put, 6.935, epsilon = 0.01);
    }

    #[test]
    fn bs_textbook_call() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let call = black_scholes_call(100.0, 100.0, 1.0, 0.05, 0.2);
        assert_abs_diff_eq!(call, 10.4506, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_inputs_price_to_zero() {
        assert_eq!(black_scholes_call(100.0, 100.0, 0.0, 0.02, 0.2), 0.0);
        assert_eq!(black_scholes_put(100.0, 100.0, -1.0, 0.02, 0.2), 0.0);
        assert_eq!(black_scholes_call(100.0, 100.0, 1.0, 0.02, 0.0), 0.0);
        assert_eq!(black_scholes_call(0.0, 100.0, 1.0, 0.02, 0.2), 0.0);
        assert_eq!(black_scholes_put(100.0, -5.0, 1.0, 0.02, 0.2), 0.0);
    }

    #[test]
    fn degenerate_inputs_fail_for_greeks() {
        let flat = reference().with_volatility(0.0);
        let err = black_scholes_greeks(OptionType::Call, &flat).unwrap_err();
        assert_eq!(
            err,
            Error::DegenerateInput("volatility must be positive for Black-Scholes Greeks".into())
        );
        assert!(black_scholes_greeks(OptionType::Put, &reference().with_maturity(0.0)).is_err());
    }

    #[test]
    fn call_greeks_reference() {
        let g = black_scholes_greeks(OptionType::Call, &reference()).unwrap();
        // d1 = 0.2, d2 = 0
        let npd1 = normal_pdf(0.2);
        assert_abs_diff_eq!(g.delta, normal_cdf(0.2), epsilon = 1e-12);
        assert_abs_diff_eq!(g.gamma, npd1 / 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.vega, 100.0 * npd1, epsilon = 1e-10);
        let df = (-0.02_f64).exp();
        let theta = -100.0 * npd1 * 0.1 - 0.02 * 100.0 * df * 0.5;
        assert_abs_diff_eq!(g.theta, theta, epsilon = 1e-10);
        assert_abs_diff_eq!(g.rho, 100.0 * df * 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(g.price.unwrap(), 8.916, epsilon = 0.01);
    }

    #[test]
    fn put_greeks_mirror_call_greeks() {
        let call = black_scholes_greeks(OptionType::Call, &reference()).unwrap();
        let put = black_scholes_greeks(OptionType::Put, &reference()).unwrap();
        assert_abs_diff_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(call.gamma, put.gamma, epsilon = 1e-15);
        assert_abs_diff_eq!(call.vega, put.vega, epsilon = 1e-12);
        // rho_c − rho_p = K·T·e^(−rT)
        assert_abs_diff_eq!(call.rho - put.rho, 100.0 * (-0.02_f64).exp(), epsilon = 1e-10);
        assert!(put.delta < 0.0 && put.rho < 0.0);
    }

    #[test]
    fn deep_in_and_out_of_the_money_delta() {
        let itm = black_scholes_greeks(OptionType::Call, &reference().with_spot(150.0)).unwrap();
        let otm = black_scholes_greeks(OptionType::Call, &reference().with_spot(50.0)).unwrap();
        assert!(itm.delta > 0.9, "ITM delta = {}", itm.delta);
        assert!(otm.delta < 0.1, "OTM delta = {}", otm.delta);
    }

    #[test]
    fn analytic_delta_matches_finite_difference() {
        let req = reference();
        let h = 1e-4;
        let up = black_scholes_price(OptionType::Call, &req.with_spot(100.0 + h));
        let down = black_scholes_price(OptionType::Call, &req.with_spot(100.0 - h));
        let g = black_scholes_greeks(OptionType::Call, &req).unwrap();
        assert_abs_diff_eq!(g.delta, (up - down) / (2.0 * h), epsilon = 1e-6);
    }

    #[test]
    fn engine_trait_dispatch() {
        let engine = AnalyticEuropeanEngine;
        let price = engine.price(OptionType::Put, &reference()).unwrap();
        assert_abs_diff_eq!(price, 6.935, epsilon = 0.01);
        assert_eq!(
            engine.price(OptionType::Put, &reference().with_maturity(0.0)).unwrap(),
            0.0
        );
    }

    proptest! {
        #[test]
        fn put_call_parity(
            spot in 10.0f64..300.0,
            strike in 10.0f64..300.0,
            maturity in 0.01f64..5.0,
            rate in -0.05f64..0.15,
            vol in 0.01f64..1.0,
        ) {
            let req = PricingRequest::new(spot, strike, maturity, rate, vol);
            let call = black_scholes_price(OptionType::Call, &req);
            let put = black_scholes_price(OptionType::Put, &req);
            let forward_value = spot - strike * req.discount();
            assert_relative_eq!(call - put, forward_value, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
