//! The `Sim` struct and its tick loop.

use ev_charge::{ChargeClient, ChargingStation};
use ev_core::{SimClock, SimConfig, SimRng, Tick, VehicleId};
use ev_fleet::{Catalog, Fleet, VehicleState};

use crate::{FleetReport, FleetStats, SimError, SimObserver, SimResult, TickSummary};

// ── Charger callbacks ─────────────────────────────────────────────────────────

/// Applies the station's slot decisions to the fleet.  Released vehicles go
/// to the back of the flying list.
struct FleetClient<'a> {
    fleet:  &'a mut Fleet,
    flying: &'a mut Vec<VehicleId>,
}

impl ChargeClient for FleetClient<'_> {
    fn begin_charging(&mut self, vehicle: VehicleId) {
        self.fleet.get_mut(vehicle).begin_charging();
    }

    fn charge_tick(&mut self, vehicle: VehicleId) -> bool {
        self.fleet.get_mut(vehicle).charge(1)
    }

    fn finish_charging(&mut self, vehicle: VehicleId) {
        self.fleet.get_mut(vehicle).finish_charging();
        self.flying.push(vehicle);
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns every piece of run state and is the only thing that mutates a
/// battery.  Each tick runs four phases:
///
/// 1. **Faults**: every vehicle, whatever its state, draws one hazard sample
///    in `VehicleId` order.
/// 2. **Flight**: flying vehicles drain one tick.  Those that run empty leave
///    the flying list and join the charge queue in flying-list order.
/// 3. **Charging**: [`ChargingStation::arbitrate`] admits, steps and
///    releases.  Released vehicles rejoin the end of the flying list.
/// 4. **Credit**: each vehicle adds one tick to its category's totals.
///    Vehicles still flying earn flight time; vehicles on a charger, including
///    any released this tick, earn charge time; queued vehicles earn wait
///    time.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:  SimConfig,
    pub(crate) clock:   SimClock,
    pub(crate) catalog: Catalog,
    pub(crate) fleet:   Fleet,
    pub(crate) station: ChargingStation,
    /// Flying vehicles, in the order they are drained each tick.
    pub(crate) flying:  Vec<VehicleId>,
    pub(crate) stats:   FleetStats,
    pub(crate) rng:     SimRng,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()` and return the report.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> FleetReport {
        let end = self.config.end_tick();
        while self.clock.current_tick < end {
            let now = self.step(observer);
            let interval = self.config.progress_interval_ticks;
            if interval > 0 && (now.0 + 1).is_multiple_of(interval) {
                observer.on_progress(now, self.remaining_ms());
            }
        }
        observer.on_sim_end(self.clock.current_tick);
        self.report()
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  No progress or end-of-run
    /// callbacks are made.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Statistics accumulated so far, converted to hours.
    pub fn report(&self) -> FleetReport {
        self.stats.report(&self.catalog, &self.clock, self.rng.seed())
    }

    /// Verify that the flying list, the queue and the charger slots partition
    /// the fleet, that each vehicle's state matches the set holding it, and
    /// that every battery is within bounds.
    pub fn check_partition(&self) -> SimResult<()> {
        let tick = self.clock.current_tick;
        let violation = |detail: String| SimError::InvariantViolation { tick, detail };

        let mut seen = vec![false; self.fleet.len()];
        let sets = [
            (VehicleState::Flying, self.flying.clone()),
            (VehicleState::Queued, self.station.queue().iter().collect()),
            (VehicleState::Charging, self.station.occupants().collect()),
        ];
        for (state, members) in sets {
            for id in members {
                if std::mem::replace(&mut seen[id.index()], true) {
                    return Err(violation(format!("{id} is held in two places")));
                }
                let vehicle = self.fleet.get(id);
                if vehicle.state() != state {
                    return Err(violation(format!(
                        "{id} is held as {state:?} but its state is {:?}",
                        vehicle.state()
                    )));
                }
            }
        }
        if let Some(lost) = seen.iter().position(|&s| !s) {
            return Err(violation(format!("VehicleId({lost}) is in no state set")));
        }

        for vehicle in self.fleet.iter() {
            let battery = vehicle.battery();
            if !(0.0..=battery.capacity_kwh()).contains(&battery.charge_kwh()) {
                return Err(violation(format!(
                    "{} holds {} kWh of {} kWh",
                    vehicle.id(),
                    battery.charge_kwh(),
                    battery.capacity_kwh()
                )));
            }
            if vehicle.state() == VehicleState::Charging && battery.is_full() {
                return Err(violation(format!("{} is full but still on a charger", vehicle.id())));
            }
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// `true` once the configured duration has been simulated.
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.config.end_tick()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn station(&self) -> &ChargingStation {
        &self.station
    }

    /// Flying vehicles in drain order.
    pub fn flying(&self) -> &[VehicleId] {
        &self.flying
    }

    pub fn stats(&self) -> &FleetStats {
        &self.stats
    }

    /// Seed of this run's generator.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Simulated milliseconds left before the configured duration is reached.
    pub fn remaining_ms(&self) -> u64 {
        self.config.duration_ms.saturating_sub(self.clock.elapsed_ms())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process the current tick with observer hooks and advance the clock.
    /// Returns the tick that was processed.
    fn step<O: SimObserver>(&mut self, observer: &mut O) -> Tick {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick();
        self.clock.advance();

        #[cfg(debug_assertions)]
        if let Err(e) = self.check_partition() {
            panic!("{e}");
        }

        observer.on_tick_end(now, &summary);
        now
    }

    fn process_tick(&mut self) -> TickSummary {
        // ── Phase 1: faults ───────────────────────────────────────────────
        let mut faults = 0;
        for i in 0..self.fleet.len() {
            let id = VehicleId(i as u32);
            if self.fleet.fault_check(id, &mut self.rng) {
                self.stats.record_fault(self.fleet.get(id).category());
                faults += 1;
            }
        }

        // ── Phase 2: flight ───────────────────────────────────────────────
        let mut newly_queued = 0;
        let fleet = &mut self.fleet;
        let station = &mut self.station;
        self.flying.retain(|&id| {
            let vehicle = fleet.get_mut(id);
            if !vehicle.fly(1) {
                return true;
            }
            vehicle.enqueue();
            station.enqueue(id);
            newly_queued += 1;
            false
        });

        // ── Phase 3: charger arbitration ──────────────────────────────────
        // Vehicles released this tick are appended after `still_flying`.
        let still_flying = self.flying.len();
        let mut client = FleetClient {
            fleet:  &mut self.fleet,
            flying: &mut self.flying,
        };
        let activity = self.station.arbitrate(&mut client);

        // ── Phase 4: credit ───────────────────────────────────────────────
        let (flew, released) = self.flying.split_at(still_flying);
        for &id in flew {
            self.stats.credit_flight(self.fleet.get(id).category());
        }
        for id in released.iter().copied().chain(self.station.occupants()) {
            self.stats.credit_charge(self.fleet.get(id).category());
        }
        for id in self.station.queue().iter() {
            self.stats.credit_wait(self.fleet.get(id).category());
        }

        TickSummary {
            faults,
            newly_queued,
            activity,
            flying: self.flying.len(),
            queued: self.station.queue().len(),
            charging: self.station.charger_count() - self.station.free_chargers(),
        }
    }
}
