//! Random number generators.
//!
//! Provides wrappers around the `rand`, `rand_distr` and `rand_mt` crates.
//! Every generator here is an explicit handle owned by its caller; there is
//! no process-wide random state.

use opus_core::Real;
use rand::Rng;
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;

/// A source of independent standard-normal deviates.
///
/// The Monte Carlo engine draws every Brownian increment through this trait,
/// so any generator can be plugged in by the caller.
pub trait GaussianRng {
    /// Draw the next standard-normal deviate.
    fn next_gaussian(&mut self) -> Real;
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        let u: u64 = self.rng.next_u64();
        // Top 53 bits give every representable multiple of 2^-53 in [0, 1).
        (u >> 11) as Real / (1u64 << 53) as Real
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a Mersenne Twister uniform generator and transforms its output
/// through the inverse CDF of the standard normal distribution.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Create a generator seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // Avoid exact 0, which would produce -∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

impl GaussianRng for InverseCumulativeNormalRng {
    #[inline]
    fn next_gaussian(&mut self) -> Real {
        self.next_real()
    }
}

/// Adapter drawing standard normals from any `rand` generator through
/// `rand_distr::StandardNormal` (Ziggurat).
pub struct StandardNormalRng<R> {
    rng: R,
}

impl<R: Rng> StandardNormalRng<R> {
    /// Wrap a `rand` generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> GaussianRng for StandardNormalRng<R> {
    #[inline]
    fn next_gaussian(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}

impl<G: GaussianRng + ?Sized> GaussianRng for &mut G {
    #[inline]
    fn next_gaussian(&mut self) -> Real {
        (**self).next_gaussian()
    }
}
