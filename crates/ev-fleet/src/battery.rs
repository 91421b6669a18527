//! Per-tick battery arithmetic.
//!
//! A `Battery` stores energy in kWh and never caches its state of charge:
//! the percentage is recomputed from `charge_kwh` on every read so the two
//! can never disagree.
//!
//! Both rates are fixed at construction and expressed per tick.  The charge
//! rate is `capacity / time_to_full_hr` scaled to the tick length, so a
//! battery charged from empty without interruption is full after
//! `ceil(time_to_full_hr / tick_hours)` steps.

use ev_core::SimClock;

use crate::{FleetError, FleetResult, VehicleSpec};

/// Relative tolerance for snapping to the full / empty boundary.  Repeated
/// float additions of a rate that divides the capacity exactly can land a
/// few ULPs short; without the snap the battery would need one extra tick.
const SNAP_FRACTION: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct Battery {
    capacity_kwh:        f64,
    charge_kwh:          f64,
    drain_per_tick_kwh:  f64,
    charge_per_tick_kwh: f64,
    charging:            bool,
}

impl Battery {
    /// A full battery with the given per-tick rates.
    ///
    /// Rejects non-positive or non-finite capacity and charge rate, and a
    /// negative or non-finite drain rate.
    pub fn full(
        capacity_kwh:        f64,
        drain_per_tick_kwh:  f64,
        charge_per_tick_kwh: f64,
    ) -> FleetResult<Self> {
        if !(capacity_kwh.is_finite() && capacity_kwh > 0.0) {
            return Err(FleetError::InvalidBattery(format!(
                "capacity must be positive, got {capacity_kwh} kWh"
            )));
        }
        if !(drain_per_tick_kwh.is_finite() && drain_per_tick_kwh >= 0.0) {
            return Err(FleetError::InvalidBattery(format!(
                "drain rate must be non-negative, got {drain_per_tick_kwh} kWh/tick"
            )));
        }
        if !(charge_per_tick_kwh.is_finite() && charge_per_tick_kwh > 0.0) {
            return Err(FleetError::InvalidBattery(format!(
                "charge rate must be positive, got {charge_per_tick_kwh} kWh/tick"
            )));
        }
        Ok(Self {
            capacity_kwh,
            charge_kwh: capacity_kwh,
            drain_per_tick_kwh,
            charge_per_tick_kwh,
            charging: false,
        })
    }

    /// A full battery sized and rated for `spec` at the clock's tick length.
    pub fn for_spec(spec: &VehicleSpec, clock: &SimClock) -> FleetResult<Self> {
        let tick_hours = clock.tick_hours();
        Self::full(
            spec.battery_capacity_kwh,
            spec.energy_use_kwh_per_hour() * tick_hours,
            spec.battery_capacity_kwh / spec.time_to_full_hr * tick_hours,
        )
    }

    /// Same battery holding `charge_kwh`, clamped to `[0, capacity]`.
    pub fn with_charge(mut self, charge_kwh: f64) -> Self {
        self.set_charge(charge_kwh);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity_kwh(&self) -> f64 {
        self.capacity_kwh
    }

    #[inline]
    pub fn charge_kwh(&self) -> f64 {
        self.charge_kwh
    }

    #[inline]
    pub fn drain_per_tick_kwh(&self) -> f64 {
        self.drain_per_tick_kwh
    }

    #[inline]
    pub fn charge_per_tick_kwh(&self) -> f64 {
        self.charge_per_tick_kwh
    }

    /// Charge as a percentage of capacity, derived on every call.
    #[inline]
    pub fn state_of_charge(&self) -> f64 {
        self.charge_kwh / self.capacity_kwh * 100.0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.charge_kwh >= self.capacity_kwh
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.charge_kwh <= 0.0
    }

    /// True only while the battery sits on a charger and is not yet full.
    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Consume `ticks` worth of flight energy, flooring at empty.
    pub fn drain(&mut self, ticks: u64) {
        debug_assert!(!self.charging, "draining a battery that is on a charger");
        let next = self.charge_kwh - self.drain_per_tick_kwh * ticks as f64;
        self.charge_kwh = if next <= self.capacity_kwh * SNAP_FRACTION { 0.0 } else { next };
    }

    /// Add `ticks` worth of charge, capping at capacity.  Reaching full
    /// clears the charging flag.
    pub fn charge_step(&mut self, ticks: u64) {
        let next = self.charge_kwh + self.charge_per_tick_kwh * ticks as f64;
        if next >= self.capacity_kwh * (1.0 - SNAP_FRACTION) {
            self.charge_kwh = self.capacity_kwh;
            self.charging = false;
        } else {
            self.charge_kwh = next;
        }
    }

    /// Mark the battery as assigned to a charger.  A full battery cannot
    /// start charging; returns whether the flag was set.
    pub fn start_charging(&mut self) -> bool {
        self.charging = !self.is_full();
        self.charging
    }

    pub fn stop_charging(&mut self) {
        self.charging = false;
    }

    /// Overwrite the stored energy, clamped to `[0, capacity]`.
    pub fn set_charge(&mut self, charge_kwh: f64) {
        self.charge_kwh = charge_kwh.clamp(0.0, self.capacity_kwh);
        if self.is_full() {
            self.charging = false;
        }
    }

    // ── Projections ───────────────────────────────────────────────────────

    /// Charge steps needed to reach full from the current level.
    pub fn ticks_to_full(&self) -> u64 {
        let missing = self.capacity_kwh - self.charge_kwh;
        steps_for(missing, self.charge_per_tick_kwh, self.capacity_kwh).unwrap_or(0)
    }

    /// Flight ticks until empty, or `None` if the battery never drains.
    pub fn ticks_to_empty(&self) -> Option<u64> {
        steps_for(self.charge_kwh, self.drain_per_tick_kwh, self.capacity_kwh)
    }
}

/// Whole steps of `rate` needed to cover `amount`, honoring the snap
/// tolerance used by `drain` / `charge_step`.
fn steps_for(amount: f64, rate: f64, capacity: f64) -> Option<u64> {
    if rate <= 0.0 {
        return None;
    }
    let exact = (amount - capacity * SNAP_FRACTION).max(0.0) / rate;
    Some(exact.ceil() as u64)
}
