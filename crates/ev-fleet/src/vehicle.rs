//! A single vehicle and its lifecycle.
//!
//! ```text
//!            battery empty              admitted to a charger
//!   Flying ───────────────▶ Queued ─────────────────────────▶ Charging
//!     ▲                                                          │
//!     └──────────────────────── battery full ────────────────────┘
//! ```
//!
//! Transitions are asserted: a transition from the wrong state means the
//! admission policy in the tick engine is broken, and continuing would
//! corrupt the statistics.

use ev_core::{CategoryId, VehicleId};

use crate::Battery;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    #[default]
    Flying,
    Queued,
    Charging,
}

#[derive(Clone, Debug)]
pub struct Vehicle {
    id:       VehicleId,
    category: CategoryId,
    battery:  Battery,
    state:    VehicleState,
    faults:   u64,
}

impl Vehicle {
    /// A new vehicle, flying.
    pub fn new(id: VehicleId, category: CategoryId, battery: Battery) -> Self {
        Self {
            id,
            category,
            battery,
            state: VehicleState::Flying,
            faults: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    #[inline]
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    #[inline]
    pub fn state(&self) -> VehicleState {
        self.state
    }

    /// Faults recorded against this vehicle.
    #[inline]
    pub fn faults(&self) -> u64 {
        self.faults
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Fly for `ticks`, draining the battery.  Returns `true` once empty.
    pub fn fly(&mut self, ticks: u64) -> bool {
        assert_eq!(self.state, VehicleState::Flying, "{} flew while not flying", self.id);
        self.battery.drain(ticks);
        self.battery.is_empty()
    }

    /// Flying → Queued.
    pub fn enqueue(&mut self) {
        assert_eq!(self.state, VehicleState::Flying, "{} queued while not flying", self.id);
        self.state = VehicleState::Queued;
    }

    /// Queued → Charging.
    pub fn begin_charging(&mut self) {
        assert_eq!(self.state, VehicleState::Queued, "{} admitted while not queued", self.id);
        self.state = VehicleState::Charging;
        self.battery.start_charging();
    }

    /// Charge for `ticks`.  Returns `true` once full.
    pub fn charge(&mut self, ticks: u64) -> bool {
        assert_eq!(self.state, VehicleState::Charging, "{} charged off a charger", self.id);
        self.battery.charge_step(ticks);
        self.battery.is_full()
    }

    /// Charging → Flying.  The battery must be full.
    pub fn finish_charging(&mut self) {
        assert_eq!(self.state, VehicleState::Charging, "{} released while not charging", self.id);
        assert!(self.battery.is_full(), "{} released before full", self.id);
        self.battery.stop_charging();
        self.state = VehicleState::Flying;
    }

    pub fn record_fault(&mut self) {
        self.faults += 1;
    }

    /// Overwrite the stored energy of a flying vehicle (scenario setup).
    pub fn set_charge_kwh(&mut self, charge_kwh: f64) {
        assert_eq!(self.state, VehicleState::Flying, "{} charge overwritten while not flying", self.id);
        self.battery.set_charge(charge_kwh);
    }
}
