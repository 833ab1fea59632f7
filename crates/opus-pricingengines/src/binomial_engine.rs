//! Cox-Ross-Rubinstein binomial engine for European and American options.

use opus_core::{errors::Result, Rate, Real, Size, Time, Volatility};
use opus_instruments::{
    ExerciseStyle, Greeks, OptionType, PlainVanillaPayoff, PricingEngine, PricingRequest,
};
use opus_methods::{price_american, price_european, BinomialTree};
use tracing::{debug, warn};

use crate::sensitivity::{finite_difference_greeks, BumpConfig};

/// Binomial lattice engine.
///
/// Builds a CRR tree with `steps` time steps for every pricing call and
/// rolls the terminal payoff back to the root, checking for early exercise
/// at every node when `exercise` is American. Greeks are bump-and-revalue
/// with [`BumpConfig::lattice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialEngine {
    steps: Size,
    exercise: ExerciseStyle,
}

impl Default for BinomialEngine {
    fn default() -> Self {
        Self {
            steps: 100,
            exercise: ExerciseStyle::European,
        }
    }
}

impl BinomialEngine {
    /// Engine with `steps` time steps and the given exercise style.
    pub fn new(steps: Size, exercise: ExerciseStyle) -> Self {
        Self { steps, exercise }
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Exercise style.
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }
}

impl PricingEngine for BinomialEngine {
    fn price(&self, option_type: OptionType, request: &PricingRequest) -> Result<Real> {
        let tree = BinomialTree::cox_ross_rubinstein(
            request.spot,
            request.rate,
            request.volatility,
            request.maturity,
            self.steps,
        )?;
        if !tree.is_risk_neutral() {
            warn!(
                steps = self.steps,
                p_up = tree.probability(1),
                "risk-neutral probability outside [0, 1]; increase the number of steps"
            );
        }

        let vanilla = PlainVanillaPayoff::new(option_type, request.strike);
        let payoff = |s: Real| vanilla.value(s);
        let discount = (-request.rate * tree.dt()).exp();
        let price = match self.exercise {
            ExerciseStyle::European => price_european(&tree, &payoff, discount),
            ExerciseStyle::American => price_american(&tree, &payoff, discount),
        };
        debug!(
            %option_type,
            exercise = %self.exercise,
            steps = self.steps,
            ?request,
            price,
            "binomial price"
        );
        Ok(price)
    }

    fn greeks(&self, option_type: OptionType, request: &PricingRequest) -> Result<Greeks> {
        finite_difference_greeks(
            |bumped| self.price(option_type, bumped),
            request,
            &BumpConfig::lattice(),
        )
    }
}

/// CRR binomial call price.
pub fn binomial_call(
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
    steps: Size,
    exercise: ExerciseStyle,
) -> Result<Real> {
    let request = PricingRequest::new(spot, strike, maturity, rate, volatility);
    BinomialEngine::new(steps, exercise).price(OptionType::Call, &request)
}

/// CRR binomial put price.
pub fn binomial_put(
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
    steps: Size,
    exercise: ExerciseStyle,
) -> Result<Real> {
    let request = PricingRequest::new(spot, strike, maturity, rate, volatility);
    BinomialEngine::new(steps, exercise).price(OptionType::Put, &request)
}
