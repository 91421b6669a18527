//! `ChargingStation` — the charger pool, its queue, and admission.

use ev_core::{ChargerId, VehicleId};

use crate::{ChargeError, ChargeQueue, ChargeResult, Charger};

// ── ChargeClient ──────────────────────────────────────────────────────────────

/// Battery-side callbacks used during arbitration.
///
/// The station decides *who* occupies which slot; the client owns the
/// vehicles and applies the state changes.  Calls for a given vehicle always
/// arrive in the order `begin_charging`, `charge_tick`*, `finish_charging`.
pub trait ChargeClient {
    /// `vehicle` left the queue and now occupies a charger.
    fn begin_charging(&mut self, vehicle: VehicleId);

    /// Apply one tick of charge to `vehicle`.  Returns `true` once full.
    fn charge_tick(&mut self, vehicle: VehicleId) -> bool;

    /// `vehicle` is full and has been taken off its charger.
    fn finish_charging(&mut self, vehicle: VehicleId);
}

// ── TickActivity ──────────────────────────────────────────────────────────────

/// Slot changes made by one call to [`ChargingStation::arbitrate`], in the
/// order they happened.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickActivity {
    pub admitted: Vec<(ChargerId, VehicleId)>,
    pub released: Vec<(ChargerId, VehicleId)>,
}

impl TickActivity {
    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty() && self.released.is_empty()
    }
}

// ── ChargingStation ───────────────────────────────────────────────────────────

/// A fixed pool of chargers shared by the whole fleet, plus the FIFO queue of
/// vehicles waiting for one.
#[derive(Debug, Clone)]
pub struct ChargingStation {
    chargers: Vec<Charger>,
    queue:    ChargeQueue,
}

impl ChargingStation {
    /// A station with `charger_count` free chargers and an empty queue.
    pub fn new(charger_count: usize) -> ChargeResult<Self> {
        if charger_count == 0 {
            return Err(ChargeError::NoChargers);
        }
        let chargers = (0..charger_count)
            .map(|i| {
                ChargerId::try_from(i)
                    .map(Charger::new)
                    .map_err(|_| ChargeError::TooManyChargers(charger_count))
            })
            .collect::<ChargeResult<Vec<_>>>()?;
        Ok(Self {
            chargers,
            queue: ChargeQueue::new(),
        })
    }

    /// Append an emptied vehicle to the tail of the queue.
    pub fn enqueue(&mut self, vehicle: VehicleId) {
        self.queue.push(vehicle);
    }

    /// Run one tick of admission and charging.
    ///
    /// For each charger in id order: a free charger admits the queue head;
    /// the occupant then takes one charge step.  If that step fills it, the
    /// occupant is released and the next queued vehicle is admitted into the
    /// same slot and charged in the same tick.  Every admitted vehicle
    /// therefore receives the charge step of its admission tick, and a slot
    /// is never left idle while the queue is non-empty.
    pub fn arbitrate<C: ChargeClient>(&mut self, client: &mut C) -> TickActivity {
        let mut activity = TickActivity::default();

        for charger in self.chargers.iter_mut() {
            loop {
                if charger.is_free() {
                    let Some(next) = self.queue.pop() else {
                        break;
                    };
                    charger.assign(next);
                    client.begin_charging(next);
                    activity.admitted.push((charger.id(), next));
                }

                let Some(vehicle) = charger.occupant() else {
                    break;
                };
                if !client.charge_tick(vehicle) {
                    break;
                }
                charger.release();
                client.finish_charging(vehicle);
                activity.released.push((charger.id(), vehicle));
            }
        }

        activity
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn queue(&self) -> &ChargeQueue {
        &self.queue
    }

    pub fn chargers(&self) -> &[Charger] {
        &self.chargers
    }

    pub fn charger_count(&self) -> usize {
        self.chargers.len()
    }

    /// Vehicles currently on a charger, in charger order.
    pub fn occupants(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.chargers.iter().filter_map(Charger::occupant)
    }

    pub fn free_chargers(&self) -> usize {
        self.chargers.iter().filter(|c| c.is_free()).count()
    }

    /// The charger holding `vehicle`, if any.
    pub fn charger_of(&self, vehicle: VehicleId) -> Option<ChargerId> {
        self.chargers
            .iter()
            .find(|c| c.occupant() == Some(vehicle))
            .map(Charger::id)
    }
}
