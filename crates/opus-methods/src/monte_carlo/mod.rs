//! Monte Carlo simulation framework.
//!
//! * [`PathGenerator`] — generates sample paths of a geometric Brownian
//!   motion under the risk-neutral measure
//! * [`PathPricer`] — trait for evaluating discounted payoffs on paths
//! * [`MonteCarloModel`] — drives path generation and collects statistics
//! * [`Path`] — a single realisation of the process

use opus_core::{DiscountFactor, Rate, Real, Size, Time, Volatility};
use opus_math::{GaussianRng, Statistics};

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A single sample path: the asset level at `steps + 1` equally spaced
/// observation times, starting with the spot at `t = 0`.
#[derive(Debug, Clone, Default)]
pub struct Path {
    /// Process values at each time point.
    pub values: Vec<Real>,
}

impl Path {
    /// Number of time steps (= len − 1).
    pub fn steps(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// The final value, if any.
    pub fn back(&self) -> Option<Real> {
        self.values.last().copied()
    }

    /// Arithmetic mean over every observation, the initial value included.
    pub fn average(&self) -> Option<Real> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<Real>() / self.values.len() as Real)
        }
    }

    /// Length of the path (number of points including initial).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates sample paths of `dS = rS dt + σS dW` on a uniform grid.
///
/// Each step applies the exact log-normal increment
/// `S_t = S_{t−1}·exp[(r − σ²/2)Δt + σ√Δt·Z_t]` with one fresh normal draw
/// `Z_t` from the generator's random source. Paths are written into one
/// reused buffer.
pub struct PathGenerator<G> {
    x0: Real,
    steps: Size,
    drift: Real,
    diffusion: Real,
    rng: G,
    path: Path,
}

impl<G: GaussianRng> PathGenerator<G> {
    /// Create a new path generator.
    ///
    /// # Arguments
    /// * `spot` — initial asset level
    /// * `rate` — risk-free rate (the risk-neutral drift)
    /// * `volatility` — lognormal volatility
    /// * `maturity` — total time horizon
    /// * `steps` — number of time steps
    /// * `rng` — source of standard-normal draws
    pub fn new(
        spot: Real,
        rate: Rate,
        volatility: Volatility,
        maturity: Time,
        steps: Size,
        rng: G,
    ) -> Self {
        assert!(steps > 0, "steps must be > 0");
        let dt = maturity / steps as Real;
        Self {
            x0: spot,
            steps,
            drift: (rate - 0.5 * volatility * volatility) * dt,
            diffusion: volatility * dt.sqrt(),
            rng,
            path: Path {
                values: Vec::with_capacity(steps + 1),
            },
        }
    }

    /// Generate the next sample path.
    pub fn next_path(&mut self) -> &Path {
        let values = &mut self.path.values;
        values.clear();

        let mut x = self.x0;
        values.push(x);
        for _ in 0..self.steps {
            let dw = self.rng.next_gaussian();
            x *= (self.drift + self.diffusion * dw).exp();
            values.push(x);
        }

        &self.path
    }
}

// ─── PathPricer ───────────────────────────────────────────────────────────────

/// A trait for computing the discounted payoff from a sample path.
pub trait PathPricer: Send + Sync {
    /// Evaluate the discounted payoff for a given path.
    fn value(&self, path: &Path) -> Real;
}

/// A European payoff pricer: evaluates `payoff(S_T) * discount`.
pub struct EuropeanPathPricer<F> {
    payoff: F,
    discount: DiscountFactor,
}

impl<F: Fn(Real) -> Real + Send + Sync> EuropeanPathPricer<F> {
    /// Create a European pricer with payoff function and discount factor.
    pub fn new(payoff: F, discount: DiscountFactor) -> Self {
        Self { payoff, discount }
    }
}

impl<F: Fn(Real) -> Real + Send + Sync> PathPricer for EuropeanPathPricer<F> {
    fn value(&self, path: &Path) -> Real {
        path.back().map_or(0.0, |s| (self.payoff)(s) * self.discount)
    }
}

/// An arithmetic-average Asian payoff pricer.
///
/// The average runs over every observation of the path, the initial spot
/// included.
pub struct AsianArithmeticPathPricer<F> {
    payoff: F,
    discount: DiscountFactor,
}

impl<F: Fn(Real) -> Real + Send + Sync> AsianArithmeticPathPricer<F> {
    /// Create an Asian arithmetic-average pricer.
    pub fn new(payoff: F, discount: DiscountFactor) -> Self {
        Self { payoff, discount }
    }
}

impl<F: Fn(Real) -> Real + Send + Sync> PathPricer for AsianArithmeticPathPricer<F> {
    fn value(&self, path: &Path) -> Real {
        path.average()
            .map_or(0.0, |avg| (self.payoff)(avg) * self.discount)
    }
}

// ─── MonteCarloModel ──────────────────────────────────────────────────────────

/// A Monte Carlo simulation driver.
///
/// Combines a path generator with a pricer and collects statistics across
/// many simulated paths. Paths are generated and priced one at a time; only
/// the running statistics survive a path.
#[derive(Debug, Clone)]
pub struct MonteCarloModel {
    spot: Real,
    rate: Rate,
    volatility: Volatility,
    maturity: Time,
    steps: Size,
}

impl MonteCarloModel {
    /// Create a new Monte Carlo model.
    pub fn new(
        spot: Real,
        rate: Rate,
        volatility: Volatility,
        maturity: Time,
        steps: Size,
    ) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
            steps,
        }
    }

    /// Run `n_paths` simulations drawing from `rng` and return the gathered
    /// statistics of the discounted payoffs.
    pub fn simulate<G: GaussianRng>(
        &self,
        pricer: &dyn PathPricer,
        n_paths: Size,
        rng: G,
    ) -> Statistics {
        let mut gen = PathGenerator::new(
            self.spot,
            self.rate,
            self.volatility,
            self.maturity,
            self.steps,
            rng,
        );
        let mut stats = Statistics::new();

        for _ in 0..n_paths {
            let path = gen.next_path();
            stats.add(pricer.value(path));
        }

        stats
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
