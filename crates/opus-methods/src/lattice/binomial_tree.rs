//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! Node `(i, j)` is the state after `j` up-moves and `i − j` down-moves:
//! `S·u^j·d^(i−j)` with `u = e^(σ√Δt)` and `d = 1/u`, so an up-move followed
//! by a down-move returns to the same level and layer `i` has `i + 1` nodes.

use opus_core::{ensure, errors::Result, Rate, Real, Size, Time, Volatility};

/// A recombining binomial tree for a geometric Brownian motion.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: Size,
    up: Real,
    down: Real,
    pu: Real,
    pd: Real,
}

impl BinomialTree {
    /// Cox-Ross-Rubinstein tree (equal and opposite log-jumps).
    ///
    /// `Δt = T/steps`, `u = e^(σ√Δt)`, `d = 1/u`,
    /// `p_up = (e^(rΔt) − d) / (u − d)`.
    ///
    /// # Errors
    /// `Error::Precondition` unless `1 ≤ steps ≤ i32::MAX` and spot, maturity
    /// and volatility are all positive.
    pub fn cox_ross_rubinstein(
        spot: Real,
        rate: Rate,
        volatility: Volatility,
        maturity: Time,
        steps: Size,
    ) -> Result<Self> {
        ensure!(steps >= 1, "binomial tree needs at least one step, got {steps}");
        ensure!(
            i32::try_from(steps).is_ok(),
            "binomial tree supports at most {} steps, got {steps}",
            i32::MAX
        );
        ensure!(spot > 0.0, "spot must be positive, got {spot}");
        ensure!(maturity > 0.0, "maturity must be positive, got {maturity}");
        ensure!(volatility > 0.0, "volatility must be positive, got {volatility}");

        let dt = maturity / steps as Real;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let pu = ((rate * dt).exp() - down) / (up - down);
        Ok(Self {
            x0: spot,
            dt,
            steps,
            up,
            down,
            pu,
            pd: 1.0 - pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Initial underlying value (spot price).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Number of nodes at time step `i` (always `i + 1`).
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, branch: usize) -> Real {
        if branch == 1 {
            self.pu
        } else {
            self.pd
        }
    }

    /// Whether the up-probability lies in `[0, 1]`.
    ///
    /// Fails when `|r|·√Δt` is large compared with `σ`, i.e. too few steps
    /// for the drift; the tree then admits arbitrage.
    pub fn is_risk_neutral(&self) -> bool {
        (0.0..=1.0).contains(&self.pu)
    }

    /// Underlying value at node `(i, index)`: `x0·u^index·d^(i − index)`.
    pub fn underlying(&self, i: Size, index: Size) -> Real {
        debug_assert!(index <= i);
        // i ≤ steps ≤ i32::MAX, checked at construction.
        self.x0 * self.up.powi(index as i32) * self.down.powi((i - index) as i32)
    }
}
