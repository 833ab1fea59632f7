//! CLI command implementations
//!
//! `price` and `greeks` share one set of market and method arguments.

pub mod greeks;
pub mod price;

use clap::{Args, ValueEnum};
use opus::{ExerciseStyle, Method, OptionType, PathStyle, PricingRequest};

/// Pricing method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodKind {
    /// Black-Scholes closed form
    Analytic,
    /// Cox-Ross-Rubinstein binomial tree
    Binomial,
    /// Monte Carlo simulation
    MonteCarlo,
}

/// Market inputs and method settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct PricingArgs {
    /// Pricing method
    #[arg(short, long, value_enum, default_value = "analytic")]
    pub method: MethodKind,

    /// Option type (call, put)
    #[arg(short = 't', long, default_value = "call")]
    pub option_type: OptionType,

    /// Spot price
    #[arg(long, default_value_t = 100.0)]
    pub spot: f64,

    /// Strike price
    #[arg(long, default_value_t = 100.0)]
    pub strike: f64,

    /// Time to maturity in years
    #[arg(long, default_value_t = 1.0)]
    pub maturity: f64,

    /// Risk-free rate in percent
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub rate: f64,

    /// Volatility in percent
    #[arg(long, default_value_t = 20.0)]
    pub vol: f64,

    /// Binomial steps, or averaging steps of an Asian path
    #[arg(long, default_value_t = 100)]
    pub steps: usize,

    /// Binomial exercise style (european, american)
    #[arg(long, default_value = "european")]
    pub exercise: ExerciseStyle,

    /// Number of Monte Carlo paths
    #[arg(long, default_value_t = 10_000)]
    pub simulations: usize,

    /// Monte Carlo payoff style (european, asian)
    #[arg(long, default_value = "european")]
    pub style: PathStyle,

    /// Monte Carlo seed; fresh entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PricingArgs {
    /// The selected method with its settings.
    pub fn method(&self) -> Method {
        match self.method {
            MethodKind::Analytic => Method::Analytic,
            MethodKind::Binomial => Method::Binomial {
                steps: self.steps,
                exercise: self.exercise,
            },
            MethodKind::MonteCarlo => Method::MonteCarlo {
                simulations: self.simulations,
                steps: self.steps,
                style: self.style,
                seed: self.seed,
            },
        }
    }

    /// The pricing request, with rate and volatility converted to decimals.
    pub fn request(&self) -> PricingRequest {
        PricingRequest::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate / 100.0,
            self.vol / 100.0,
        )
    }
}
