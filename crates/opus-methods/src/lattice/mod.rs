//! Lattice methods for option pricing.
//!
//! * [`BinomialTree`] — recombining Cox-Ross-Rubinstein binomial tree
//! * [`LatticeState`] — the (asset price, option value) layer rolled back
//!   through the tree
//! * [`price_european`] / [`price_american`] — backward-induction pricing

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use opus_core::{DiscountFactor, Real};

// ─── LatticeState ─────────────────────────────────────────────────────────────

/// One time layer of a binomial lattice during backward induction.
///
/// Holds `len` pairs of (asset price, option value) indexed by the number of
/// up-moves. Both buffers are allocated once with `steps + 1` slots; every
/// [`roll_back`](Self::roll_back) shrinks the live prefix by exactly one
/// node, updating in place, until a single node (the root) remains.
#[derive(Debug, Clone)]
pub struct LatticeState {
    prices: Vec<Real>,
    values: Vec<Real>,
    len: usize,
}

impl LatticeState {
    /// The terminal layer of `tree`: prices `S·u^j·d^(n−j)` and their payoffs.
    pub fn at_maturity(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real) -> Self {
        let n = tree.steps();
        let prices: Vec<Real> = (0..tree.size(n)).map(|j| tree.underlying(n, j)).collect();
        let values = prices.iter().map(|&s| payoff(s)).collect();
        Self {
            len: prices.len(),
            prices,
            values,
        }
    }

    /// Time step index of the live layer; it holds `step() + 1` nodes.
    pub fn step(&self) -> usize {
        self.len - 1
    }

    /// Asset prices of the live layer.
    pub fn prices(&self) -> &[Real] {
        &self.prices[..self.len]
    }

    /// Option values of the live layer.
    pub fn values(&self) -> &[Real] {
        &self.values[..self.len]
    }

    /// Step back one layer: each parent takes the discounted risk-neutral
    /// expectation of its two children, and its asset price is that of its
    /// up-child divided by `u`.
    ///
    /// Must not be called once the state has reached the root; debug builds
    /// panic if it is.
    pub fn roll_back(&mut self, pu: Real, pd: Real, discount: DiscountFactor, up: Real) {
        debug_assert!(self.len > 1, "lattice already rolled back to the root");
        self.len -= 1;
        // Ascending order reads k+1 before it is overwritten.
        for k in 0..self.len {
            self.prices[k] = self.prices[k + 1] / up;
            self.values[k] = discount * (pu * self.values[k + 1] + pd * self.values[k]);
        }
    }

    /// Replace every live value by `max(value, exercise(price))`.
    pub fn apply_early_exercise(&mut self, exercise: &dyn Fn(Real) -> Real) {
        let n = self.len;
        for (value, &price) in self.values[..n].iter_mut().zip(&self.prices[..n]) {
            *value = value.max(exercise(price));
        }
    }
}

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Price a European option by backward induction on a binomial tree.
///
/// # Arguments
/// * `tree` — the binomial tree (already constructed)
/// * `payoff` — payoff function `S → value` (e.g. `|s| (s - K).max(0.0)`)
/// * `discount` — per-step discount factor, typically `exp(−r · Δt)`
pub fn price_european(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
) -> Real {
    roll_back_to_root(tree, payoff, discount, None)
}

/// Price an American option by backward induction on a binomial tree.
///
/// Same as European pricing, but at every node the continuation value is
/// replaced by the exercise value when the latter is larger.
pub fn price_american(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
) -> Real {
    roll_back_to_root(tree, payoff, discount, Some(payoff))
}

fn roll_back_to_root(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
    exercise: Option<&dyn Fn(Real) -> Real>,
) -> Real {
    let (pu, pd) = (tree.probability(1), tree.probability(0));
    let mut state = LatticeState::at_maturity(tree, payoff);
    while state.step() > 0 {
        state.roll_back(pu, pd, discount, tree.up());
        if let Some(exercise) = exercise {
            state.apply_early_exercise(exercise);
        }
    }
    state.values()[0]
}

// ─── Tests ────────────────────────────────────────────────────────────────────
