//! End-to-end checks through the `opus::price` / `opus::greeks` entry points.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use opus::pricingengines::{black_scholes_call, MonteCarloEngine};
use opus::{Error, ExerciseStyle, Method, OptionType, PathStyle, PricingRequest};
use proptest::prelude::*;

fn reference() -> PricingRequest {
    PricingRequest::new(100.0, 100.0, 1.0, 0.02, 0.2)
}

fn binomial(steps: usize, exercise: ExerciseStyle) -> Method {
    Method::Binomial { steps, exercise }
}

fn seeded_monte_carlo(simulations: usize, style: PathStyle, seed: u64) -> Method {
    Method::MonteCarlo {
        simulations,
        steps: 100,
        style,
        seed: Some(seed),
    }
}

// ─── Reference values ─────────────────────────────────────────────────────────

#[test]
fn test_reference_prices() {
    let req = reference();
    let call = opus::price(&Method::Analytic, OptionType::Call, &req).unwrap();
    let put = opus::price(&Method::Analytic, OptionType::Put, &req).unwrap();
    assert_abs_diff_eq!(call, 8.916, epsilon = 0.01);
    assert_abs_diff_eq!(put, 6.935, epsilon = 0.01);
}

#[test]
fn test_every_method_prices_the_reference_call() {
    let req = reference();
    let methods = [
        Method::Analytic,
        Method::binomial(),
        binomial(2_000, ExerciseStyle::European),
        seeded_monte_carlo(50_000, PathStyle::European, 8),
    ];
    for method in methods {
        let price = opus::price(&method, OptionType::Call, &req).unwrap();
        assert!((price - 8.916).abs() < 0.25, "{method}: {price}");
    }
}

#[test]
fn test_lattice_converges_to_black_scholes() {
    let req = reference();
    let lattice = opus::price(&binomial(2_000, ExerciseStyle::European), OptionType::Call, &req)
        .unwrap();
    let exact = opus::price(&Method::Analytic, OptionType::Call, &req).unwrap();
    assert_abs_diff_eq!(lattice, exact, epsilon = 1e-2);
}

#[test]
fn test_monte_carlo_within_three_standard_errors() {
    let req = reference();
    let exact = black_scholes_call(100.0, 100.0, 1.0, 0.02, 0.2);
    let result = MonteCarloEngine::new(200_000, 1, PathStyle::European)
        .with_seed(123)
        .simulate(OptionType::Call, &req)
        .unwrap();
    assert!(
        (result.price - exact).abs() < 3.0 * result.std_error,
        "{} vs {exact} (se {})",
        result.price,
        result.std_error
    );
}

// ─── Greeks ───────────────────────────────────────────────────────────────────

#[test]
fn test_deep_in_and_out_of_the_money_delta() {
    let itm = opus::greeks(&Method::Analytic, OptionType::Call, &reference().with_spot(150.0))
        .unwrap();
    let otm = opus::greeks(&Method::Analytic, OptionType::Call, &reference().with_spot(50.0))
        .unwrap();
    assert!(itm.delta > 0.9);
    assert!(otm.delta < 0.1);
}

#[test]
fn test_greeks_carry_the_base_price() {
    let req = reference();
    for method in [
        Method::Analytic,
        binomial(100, ExerciseStyle::American),
        seeded_monte_carlo(5_000, PathStyle::European, 1),
    ] {
        let greeks = opus::greeks(&method, OptionType::Put, &req).unwrap();
        let price = opus::price(&method, OptionType::Put, &req).unwrap();
        assert_eq!(greeks.price, Some(price), "{method}");
        assert_eq!(greeks.iter().count(), 6);
    }
}

#[test]
fn test_asian_greeks_are_unsupported() {
    let method = seeded_monte_carlo(1_000, PathStyle::Asian, 1);
    let err = opus::greeks(&method, OptionType::Call, &reference()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("Asian")), "{err}");
    // Pricing the same method works.
    assert!(opus::price(&method, OptionType::Call, &reference()).unwrap() > 0.0);
}

// ─── Degenerate and invalid input ─────────────────────────────────────────────

#[test]
fn test_degenerate_analytic_input() {
    for req in [
        reference().with_maturity(0.0),
        reference().with_volatility(0.0),
        reference().with_spot(-1.0),
        PricingRequest { strike: 0.0, ..reference() },
    ] {
        assert_eq!(opus::price(&Method::Analytic, OptionType::Call, &req).unwrap(), 0.0);
        let err = opus::greeks(&Method::Analytic, OptionType::Call, &req).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput(_)), "{err}");
    }
}

#[test]
fn test_style_names() {
    let err = "Bermudan".parse::<PathStyle>().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("Bermudan")));
    assert_eq!("asian".parse::<PathStyle>().unwrap(), PathStyle::Asian);
    assert_eq!("American".parse::<ExerciseStyle>().unwrap(), ExerciseStyle::American);
    assert!("straddle".parse::<OptionType>().is_err());
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_put_call_parity(
        spot in 20.0f64..200.0,
        strike in 20.0f64..200.0,
        maturity in 0.05f64..3.0,
        rate in -0.02f64..0.10,
        vol in 0.05f64..0.8,
    ) {
        let req = PricingRequest::new(spot, strike, maturity, rate, vol);
        let call = opus::price(&Method::Analytic, OptionType::Call, &req).unwrap();
        let put = opus::price(&Method::Analytic, OptionType::Put, &req).unwrap();
        assert_relative_eq!(
            call - put,
            spot - strike * req.discount(),
            epsilon = 1e-9,
            max_relative = 1e-9
        );
    }

    #[test]
    fn prop_american_put_dominates_european(
        spot in 60.0f64..140.0,
        strike in 60.0f64..140.0,
        maturity in 0.1f64..2.0,
        rate in 0.0f64..0.08,
        vol in 0.15f64..0.5,
        steps in 10usize..150,
    ) {
        let req = PricingRequest::new(spot, strike, maturity, rate, vol);
        let european = opus::price(&binomial(steps, ExerciseStyle::European), OptionType::Put, &req)
            .unwrap();
        let american = opus::price(&binomial(steps, ExerciseStyle::American), OptionType::Put, &req)
            .unwrap();
        prop_assert!(american >= european - 1e-12);
    }
}
