//! Per-tick fault hazard.
//!
//! A category is configured with the probability `p` of at least one fault
//! per simulated hour.  With `n` independent checks per hour, the per-tick
//! trigger probability `q` must satisfy
//!
//! ```text
//! (1 - q)^n = 1 - p        ⇒        q = 1 - (1 - p)^(1/n)
//! ```
//!
//! `q` is evaluated as `-expm1(ln_1p(-p) / n)`, which stays accurate when
//! `q` is tiny (hundreds of thousands of ticks per hour) where the naive form
//! rounds to zero.

use ev_core::{SimClock, SimRng};

use crate::{FleetError, FleetResult, VehicleSpec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaultModel {
    per_hour: f64,
    per_tick: f64,
}

impl FaultModel {
    /// Derive the per-tick hazard for `ticks_per_hour` checks per hour.
    pub fn new(per_hour: f64, ticks_per_hour: f64) -> FleetResult<Self> {
        if !(0.0..=1.0).contains(&per_hour) {
            return Err(FleetError::InvalidProbability(per_hour));
        }
        if !(ticks_per_hour.is_finite() && ticks_per_hour > 0.0) {
            return Err(FleetError::Core(ev_core::EvError::Config(format!(
                "ticks per hour must be positive, got {ticks_per_hour}"
            ))));
        }
        let per_tick = if per_hour >= 1.0 {
            1.0
        } else {
            -((-per_hour).ln_1p() / ticks_per_hour).exp_m1()
        };
        Ok(Self { per_hour, per_tick })
    }

    /// Hazard model for `spec` at the clock's tick length.
    pub fn for_spec(spec: &VehicleSpec, clock: &SimClock) -> FleetResult<Self> {
        Self::new(spec.fault_probability_per_hour, clock.ticks_per_hour())
    }

    /// Configured probability of at least one fault per hour.
    #[inline]
    pub fn per_hour(&self) -> f64 {
        self.per_hour
    }

    /// Derived trigger probability for a single tick.
    #[inline]
    pub fn per_tick(&self) -> f64 {
        self.per_tick
    }

    /// Probability of at least one fault across `ticks` checks.
    pub fn probability_within(&self, ticks: u64) -> f64 {
        -((-self.per_tick).ln_1p() * ticks as f64).exp_m1()
    }

    /// One fault check: draws exactly one sample from `rng`.
    #[inline]
    pub fn check(&self, rng: &mut SimRng) -> bool {
        rng.below(self.per_tick)
    }
}
