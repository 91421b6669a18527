//! `Fleet` — every vehicle of a run, indexed by `VehicleId`.
//!
//! # Layout
//!
//! `vehicles[i]` has `VehicleId(i)`; ids are dense and assigned once by
//! [`FleetBuilder`](crate::FleetBuilder).  Fault models are per category and
//! live beside the vehicles so the tick engine can borrow a vehicle mutably
//! and its category's hazard immutably at the same time.

use ev_core::{SimRng, VehicleId};

use crate::{FaultModel, Vehicle};

pub struct Fleet {
    vehicles:     Vec<Vehicle>,
    fault_models: Vec<FaultModel>,
}

impl Fleet {
    pub(crate) fn new(vehicles: Vec<Vehicle>, fault_models: Vec<FaultModel>) -> Self {
        debug_assert!(vehicles.iter().enumerate().all(|(i, v)| v.id().index() == i));
        Self { vehicles, fault_models }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> &Vehicle {
        &self.vehicles[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> &mut Vehicle {
        &mut self.vehicles[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.iter().map(Vehicle::id)
    }

    /// Vehicles per category, indexed by `CategoryId`.
    pub fn count_by_category(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.fault_models.len()];
        for v in &self.vehicles {
            counts[v.category().index()] += 1;
        }
        counts
    }

    /// Run one fault check for `id` against its category's hazard.
    ///
    /// Draws exactly one sample from `rng`.  Returns whether a fault fired.
    pub fn fault_check(&mut self, id: VehicleId, rng: &mut SimRng) -> bool {
        let vehicle = &mut self.vehicles[id.index()];
        let fired = self.fault_models[vehicle.category().index()].check(rng);
        if fired {
            vehicle.record_fault();
        }
        fired
    }
}
