//! Monte Carlo engine for European and arithmetic-average Asian options.
//!
//! Paths follow risk-neutral geometric Brownian motion. European payoffs
//! need only the terminal level, so they are simulated as one-step paths;
//! Asian payoffs average every observation of a `steps`-step path.

use opus_core::{ensure, errors::Result, Error, Rate, Real, Size, Time, Volatility};
use opus_instruments::{
    Greeks, OptionType, PathStyle, PlainVanillaPayoff, PricingEngine, PricingRequest,
};
use opus_math::{GaussianRng, InverseCumulativeNormalRng};
use opus_methods::{AsianArithmeticPathPricer, EuropeanPathPricer, MonteCarloModel, PathPricer};
use tracing::debug;

use crate::sensitivity::{finite_difference_greeks, BumpConfig};

/// Outcome of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Mean discounted payoff.
    pub price: Real,
    /// Standard error of the mean; 0.0 for a single sample.
    pub std_error: Real,
    /// Number of simulated paths.
    pub samples: Size,
}

/// Monte Carlo pricing engine.
///
/// Every pricing call draws from a fresh Mersenne-Twister generator: seeded
/// with `seed` when one is set, from system entropy otherwise. A seeded
/// engine is therefore deterministic, and its bump-and-revalue Greeks reuse
/// the same normal draws for every bumped evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEngine {
    simulations: Size,
    steps: Size,
    style: PathStyle,
    seed: Option<u64>,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self {
            simulations: 10_000,
            steps: 100,
            style: PathStyle::European,
            seed: None,
        }
    }
}

impl MonteCarloEngine {
    /// Unseeded engine simulating `simulations` paths.
    ///
    /// `steps` is the number of averaging dates of an Asian path; European
    /// paths always take a single step.
    pub fn new(simulations: Size, steps: Size, style: PathStyle) -> Self {
        Self {
            simulations,
            steps,
            style,
            seed: None,
        }
    }

    /// Fix the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of simulated paths.
    pub fn simulations(&self) -> Size {
        self.simulations
    }

    /// Time steps per Asian path.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Payoff style.
    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Generator seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> InverseCumulativeNormalRng {
        match self.seed {
            Some(seed) => InverseCumulativeNormalRng::new(seed),
            None => InverseCumulativeNormalRng::from_entropy(),
        }
    }

    /// Run the simulation with the engine's own generator.
    pub fn simulate(
        &self,
        option_type: OptionType,
        request: &PricingRequest,
    ) -> Result<SimulationResult> {
        self.simulate_with_rng(option_type, request, self.rng())
    }

    /// Run the simulation drawing normals from `rng`.
    ///
    /// # Errors
    /// `Error::Precondition` unless there is at least one simulation and one
    /// step, spot is positive, and maturity and volatility are non-negative.
    pub fn simulate_with_rng<G: GaussianRng>(
        &self,
        option_type: OptionType,
        request: &PricingRequest,
        rng: G,
    ) -> Result<SimulationResult> {
        ensure!(self.simulations >= 1, "at least one simulation is required");
        ensure!(self.steps >= 1, "at least one time step is required");
        ensure!(request.spot > 0.0, "spot must be positive, got {}", request.spot);
        ensure!(
            request.maturity >= 0.0,
            "maturity must be non-negative, got {}",
            request.maturity
        );
        ensure!(
            request.volatility >= 0.0,
            "volatility must be non-negative, got {}",
            request.volatility
        );

        let vanilla = PlainVanillaPayoff::new(option_type, request.strike);
        let payoff = move |s: Real| vanilla.value(s);
        let discount = request.discount();

        let european;
        let asian;
        let (pricer, steps): (&dyn PathPricer, Size) = match self.style {
            PathStyle::European => {
                european = EuropeanPathPricer::new(payoff, discount);
                (&european, 1)
            }
            PathStyle::Asian => {
                asian = AsianArithmeticPathPricer::new(payoff, discount);
                (&asian, self.steps)
            }
        };

        let model = MonteCarloModel::new(
            request.spot,
            request.rate,
            request.volatility,
            request.maturity,
            steps,
        );
        let stats = model.simulate(pricer, self.simulations, rng);
        let result = SimulationResult {
            price: stats.mean().unwrap_or(0.0),
            std_error: stats.error_estimate().unwrap_or(0.0),
            samples: stats.samples(),
        };
        debug!(
            %option_type,
            style = %self.style,
            simulations = self.simulations,
            steps,
            ?request,
            price = result.price,
            std_error = result.std_error,
            "monte carlo price"
        );
        Ok(result)
    }

    /// Price drawing normals from `rng` instead of the engine's generator.
    pub fn price_with_rng<G: GaussianRng>(
        &self,
        option_type: OptionType,
        request: &PricingRequest,
        rng: G,
    ) -> Result<Real> {
        Ok(self.simulate_with_rng(option_type, request, rng)?.price)
    }
}

impl PricingEngine for MonteCarloEngine {
    fn price(&self, option_type: OptionType, request: &PricingRequest) -> Result<Real> {
        Ok(self.simulate(option_type, request)?.price)
    }

    /// Bump-and-revalue Greeks with [`BumpConfig::monte_carlo`].
    ///
    /// # Errors
    /// `Error::InvalidArgument` for the Asian path style.
    fn greeks(&self, option_type: OptionType, request: &PricingRequest) -> Result<Greeks> {
        if self.style != PathStyle::European {
            return Err(Error::InvalidArgument(format!(
                "Monte Carlo Greeks support European options only, got {}",
                self.style
            )));
        }
        finite_difference_greeks(
            |bumped| self.price(option_type, bumped),
            request,
            &BumpConfig::monte_carlo(),
        )
    }
}

/// Monte Carlo call price with an unseeded generator.
#[allow(clippy::too_many_arguments)]
pub fn monte_carlo_call(
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
    simulations: Size,
    steps: Size,
    style: PathStyle,
) -> Result<Real> {
    let request = PricingRequest::new(spot, strike, maturity, rate, volatility);
    MonteCarloEngine::new(simulations, steps, style).price(OptionType::Call, &request)
}

/// Monte Carlo put price with an unseeded generator.
#[allow(clippy::too_many_arguments)]
pub fn monte_carlo_put(
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
    simulations: Size,
    steps: Size,
    style: PathStyle,
) -> Result<Real> {
    let request = PricingRequest::new(spot, strike, maturity, rate, volatility);
    MonteCarloEngine::new(simulations, steps, style).price(OptionType::Put, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::{black_scholes_greeks, black_scholes_price};
    use approx::assert_abs_diff_eq;
    use opus_math::StandardNormalRng;
    use rand::{rngs::StdRng, SeedableRng};

    fn reference() -> PricingRequest {
        PricingRequest::new(100.0, 100.0, 1.0, 0.02, 0.2)
    }

    #[test]
    fn defaults() {
        let engine = MonteCarloEngine::default();
        assert_eq!(engine.simulations(), 10_000);
        assert_eq!(engine.steps(), 100);
        assert_eq!(engine.style(), PathStyle::European);
        assert_eq!(engine.seed(), None);
    }

    #[test]
    fn european_within_three_standard_errors() {
        let req = reference();
        let engine = MonteCarloEngine::new(200_000, 1, PathStyle::European).with_seed(42);
        for option_type in [OptionType::Call, OptionType::Put] {
            let result = engine.simulate(option_type, &req).unwrap();
            let exact = black_scholes_price(option_type, &req);
            assert_eq!(result.samples, 200_000);
            assert!(
                (result.price - exact).abs() < 3.0 * result.std_error,
                "{option_type}: {} vs {exact} (se {})",
                result.price,
                result.std_error
            );
        }
    }

    #[test]
    fn seeded_engine_is_reproducible() {
        let engine = MonteCarloEngine::new(5_000, 20, PathStyle::Asian).with_seed(7);
        let a = engine.price(OptionType::Call, &reference()).unwrap();
        let b = engine.price(OptionType::Call, &reference()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn caller_supplied_rng() {
        let engine = MonteCarloEngine::new(50_000, 1, PathStyle::European);
        let rng = StandardNormalRng::new(StdRng::seed_from_u64(11));
        let price = engine.price_with_rng(OptionType::Call, &reference(), rng).unwrap();
        assert_abs_diff_eq!(price, 8.916, epsilon = 0.25);
    }

    #[test]
    fn asian_is_cheaper_than_european() {
        let req = reference();
        let asian = MonteCarloEngine::new(20_000, 100, PathStyle::Asian)
            .with_seed(1)
            .price(OptionType::Call, &req)
            .unwrap();
        let european = black_scholes_price(OptionType::Call, &req);
        assert!(asian > 0.0 && asian < european, "asian {asian}, european {european}");
    }

    #[test]
    fn zero_volatility_and_maturity_are_deterministic() {
        let engine = MonteCarloEngine::new(100, 10, PathStyle::Asian).with_seed(3);
        // σ = 0: S_t = S·e^(rt), deterministic average
        let req = reference().with_volatility(0.0).with_rate(0.0);
        assert_abs_diff_eq!(engine.price(OptionType::Call, &req).unwrap(), 0.0, epsilon = 1e-12);
        // T = 0: payoff on the spot
        let req = reference().with_spot(110.0).with_maturity(0.0);
        let r = MonteCarloEngine::new(10, 1, PathStyle::European)
            .simulate(OptionType::Call, &req)
            .unwrap();
        assert_abs_diff_eq!(r.price, 10.0, epsilon = 1e-12);
        assert_eq!(r.std_error, 0.0);
    }

    #[test]
    fn single_simulation_has_zero_error() {
        let r = MonteCarloEngine::new(1, 1, PathStyle::European)
            .with_seed(5)
            .simulate(OptionType::Put, &reference())
            .unwrap();
        assert_eq!(r.samples, 1);
        assert_eq!(r.std_error, 0.0);
    }

    #[test]
    fn invalid_configuration_fails_preconditions() {
        let req = reference();
        let cases = [
            (MonteCarloEngine::new(0, 1, PathStyle::European), req),
            (MonteCarloEngine::new(10, 0, PathStyle::Asian), req),
            (MonteCarloEngine::default(), req.with_spot(0.0)),
            (MonteCarloEngine::default(), req.with_maturity(-1.0)),
            (MonteCarloEngine::default(), req.with_volatility(-0.1)),
        ];
        for (engine, req) in cases {
            let err = engine.price(OptionType::Call, &req).unwrap_err();
            assert!(matches!(err, Error::Precondition(_)), "{err}");
        }
    }

    #[test]
    fn seeded_greeks_track_analytic_greeks() {
        let req = reference();
        let engine = MonteCarloEngine::new(100_000, 1, PathStyle::European).with_seed(2024);
        let mc = engine.greeks(OptionType::Call, &req).unwrap();
        let analytic = black_scholes_greeks(OptionType::Call, &req).unwrap();

        assert_eq!(mc.price, Some(engine.price(OptionType::Call, &req).unwrap()));
        assert_abs_diff_eq!(mc.delta, analytic.delta, epsilon = 0.015);
        assert_abs_diff_eq!(mc.theta, analytic.theta, epsilon = 0.2);
        assert_abs_diff_eq!(mc.vega, analytic.vega, epsilon = 1.5);
        assert_abs_diff_eq!(mc.rho, analytic.rho, epsilon = 1.5);
        assert!(mc.gamma.is_finite());
    }

    #[test]
    fn greeks_near_zero_volatility_and_spot() {
        let engine = MonteCarloEngine::new(20_000, 1, PathStyle::European).with_seed(99);

        let g = engine.greeks(OptionType::Call, &reference().with_volatility(5e-5)).unwrap();
        for value in [g.delta, g.gamma, g.theta, g.vega, g.rho] {
            assert!(value.is_finite(), "{g:?}");
        }
        // every path finishes in the money
        assert_abs_diff_eq!(g.delta, 1.0, epsilon = 1e-3);

        let g = engine.greeks(OptionType::Put, &reference().with_spot(5e-5)).unwrap();
        for value in [g.delta, g.gamma, g.theta, g.vega, g.rho] {
            assert!(value.is_finite(), "{g:?}");
        }
        assert_abs_diff_eq!(g.delta, -1.0, epsilon = 0.01);
    }

    #[test]
    fn asian_greeks_are_rejected() {
        let err = MonteCarloEngine::new(100, 10, PathStyle::Asian)
            .greeks(OptionType::Call, &reference())
            .unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("Asian"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
