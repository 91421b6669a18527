//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded once at construction and advanced
//! once per fault check.  The tick engine visits vehicles in a fixed order, so
//! the same seed and configuration always reproduce the same fault sequence.
//!
//! When no seed is configured the generator is seeded from the operating
//! system's entropy source.  The resolved seed is kept so that an entropy-
//! seeded run can be reported and replayed.

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, RngCore, SeedableRng};

use crate::EvResult;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG: fleet composition and fault sampling.
///
/// Used only from the tick engine's single thread of control.  Replicate
/// runs each derive their own `SimRng` via [`SimRng::child`].
pub struct SimRng {
    inner: SmallRng,
    seed:  u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng {
            inner: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system's entropy source.
    ///
    /// Fails only if the platform RNG is unavailable; callers treat that as a
    /// fatal startup error.
    pub fn from_entropy() -> EvResult<Self> {
        let mut bytes = [0u8; 8];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(SimRng::new(u64::from_le_bytes(bytes)))
    }

    /// Use `seed` when given, otherwise fall back to [`from_entropy`](Self::from_entropy).
    pub fn from_seed_or_entropy(seed: Option<u64>) -> EvResult<Self> {
        match seed {
            Some(s) => Ok(SimRng::new(s)),
            None    => SimRng::from_entropy(),
        }
    }

    /// The seed this generator was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child `SimRng` with a different seed offset, for
    /// seeding independent sub-streams deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.inner.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng::new(child_seed)
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Draw one uniform sample in `[0, 1)` and report whether it fell below
    /// `threshold`.  Always consumes exactly one draw, even for thresholds of
    /// 0 or 1, so the stream position never depends on the threshold.
    #[inline]
    pub fn below(&mut self, threshold: f64) -> bool {
        self.inner.r#gen::<f64>() < threshold
    }
}
