//! Pricing method selection.

use std::fmt;
use std::str::FromStr;

use opus_core::{Error, Size};
use opus_instruments::{ExerciseStyle, PathStyle, PricingEngine};
use opus_pricingengines::{AnalyticEuropeanEngine, BinomialEngine, MonteCarloEngine};

/// A pricing method together with its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "method", rename_all = "kebab-case")
)]
pub enum Method {
    /// Black-Scholes closed form.
    #[default]
    Analytic,
    /// Cox-Ross-Rubinstein binomial lattice.
    Binomial {
        /// Number of time steps.
        steps: Size,
        /// European or American exercise.
        exercise: ExerciseStyle,
    },
    /// Risk-neutral Monte Carlo simulation.
    MonteCarlo {
        /// Number of simulated paths.
        simulations: Size,
        /// Time steps per Asian path.
        steps: Size,
        /// European or Asian payoff.
        style: PathStyle,
        /// Generator seed; fresh entropy when absent.
        seed: Option<u64>,
    },
}

impl Method {
    /// Binomial lattice with the default settings (100 steps, European).
    pub fn binomial() -> Self {
        let engine = BinomialEngine::default();
        Method::Binomial {
            steps: engine.steps(),
            exercise: engine.exercise(),
        }
    }

    /// Monte Carlo with the default settings (10 000 European paths,
    /// 100 steps for Asian paths, unseeded).
    pub fn monte_carlo() -> Self {
        let engine = MonteCarloEngine::default();
        Method::MonteCarlo {
            simulations: engine.simulations(),
            steps: engine.steps(),
            style: engine.style(),
            seed: engine.seed(),
        }
    }

    /// The engine implementing this method.
    pub fn engine(&self) -> Box<dyn PricingEngine> {
        match *self {
            Method::Analytic => Box::new(AnalyticEuropeanEngine),
            Method::Binomial { steps, exercise } => Box::new(BinomialEngine::new(steps, exercise)),
            Method::MonteCarlo {
                simulations,
                steps,
                style,
                seed,
            } => {
                let engine = MonteCarloEngine::new(simulations, steps, style);
                Box::new(match seed {
                    Some(seed) => engine.with_seed(seed),
                    None => engine,
                })
            }
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Analytic => write!(f, "Black-Scholes"),
            Method::Binomial { steps, exercise } => {
                write!(f, "Binomial ({exercise}, {steps} steps)")
            }
            Method::MonteCarlo {
                simulations,
                steps,
                style,
                ..
            } => match style {
                PathStyle::European => write!(f, "Monte Carlo ({style}, {simulations} paths)"),
                PathStyle::Asian => {
                    write!(f, "Monte Carlo ({style}, {simulations} paths x {steps} steps)")
                }
            },
        }
    }
}

/// Parses a method name into the method with its default settings.
impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analytic" | "black-scholes" | "bs" => Ok(Method::Analytic),
            "binomial" | "lattice" | "crr" => Ok(Method::binomial()),
            "monte-carlo" | "montecarlo" | "mc" => Ok(Method::monte_carlo()),
            _ => Err(Error::InvalidArgument(format!("unsupported method: {s}"))),
        }
    }
}
