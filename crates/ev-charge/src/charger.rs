//! A single charger slot.

use ev_core::{ChargerId, VehicleId};

/// One charging slot with at most one occupant.
#[derive(Debug, Clone)]
pub struct Charger {
    id:       ChargerId,
    occupant: Option<VehicleId>,
}

impl Charger {
    pub fn new(id: ChargerId) -> Self {
        Self { id, occupant: None }
    }

    #[inline]
    pub fn id(&self) -> ChargerId {
        self.id
    }

    #[inline]
    pub fn occupant(&self) -> Option<VehicleId> {
        self.occupant
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Put `vehicle` on this charger.
    ///
    /// # Panics
    /// Panics if the charger is already occupied.
    pub fn assign(&mut self, vehicle: VehicleId) {
        if let Some(current) = self.occupant {
            panic!("{} already holds {current}; cannot assign {vehicle}", self.id);
        }
        self.occupant = Some(vehicle);
    }

    /// Free the slot, returning whoever was on it.
    pub fn release(&mut self) -> Option<VehicleId> {
        self.occupant.take()
    }
}
