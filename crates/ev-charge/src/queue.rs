//! `ChargeQueue` — vehicles waiting for a free charger.
//!
//! Strict FIFO with no priority classes: vehicles are admitted in the order
//! their batteries ran empty.  Membership implies the vehicle is `Queued`;
//! a vehicle appears at most once.
//!
//! # Performance note
//!
//! `VecDeque` gives O(1) push and pop.  The duplicate check in `push` is a
//! linear scan and only runs in debug builds; the queue never holds more than
//! the fleet size, which is small.

use std::collections::VecDeque;

use ev_core::VehicleId;

#[derive(Default, Debug, Clone)]
pub struct ChargeQueue {
    inner: VecDeque<VehicleId>,
}

impl ChargeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vehicle` to the tail.
    pub fn push(&mut self, vehicle: VehicleId) {
        debug_assert!(!self.contains(vehicle), "{vehicle} queued twice");
        self.inner.push_back(vehicle);
    }

    /// Remove and return the head, or `None` if nobody is waiting.
    pub fn pop(&mut self) -> Option<VehicleId> {
        self.inner.pop_front()
    }

    pub fn contains(&self, vehicle: VehicleId) -> bool {
        self.inner.contains(&vehicle)
    }

    /// Waiting vehicles, head first.
    pub fn iter(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.inner.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
