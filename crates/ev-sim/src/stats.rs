//! Per-category accumulators and the end-of-run report.
//!
//! Accumulators count ticks, not hours: every tick adds exactly one to one
//! of `flight_ticks`, `charge_ticks` or `wait_ticks` for each vehicle, so the
//! totals are exact and only ever grow.  Hours and passenger-miles are
//! derived when the report is built.

use std::fmt;

use ev_core::{CategoryId, SimClock, Tick};
use ev_fleet::Catalog;

// ── Accumulators ──────────────────────────────────────────────────────────────

/// Running totals for one category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryTally {
    pub vehicles:     u32,
    pub flight_ticks: u64,
    pub charge_ticks: u64,
    pub wait_ticks:   u64,
    pub faults:       u64,
}

impl CategoryTally {
    /// Vehicle-ticks accounted for so far.
    pub fn credited_ticks(&self) -> u64 {
        self.flight_ticks + self.charge_ticks + self.wait_ticks
    }
}

/// Category-keyed accumulators owned by one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleetStats {
    tallies: Vec<CategoryTally>,
}

impl FleetStats {
    /// Zeroed tallies; `vehicles_per_category[i]` is the fleet size of
    /// `CategoryId(i)`.
    pub fn new(vehicles_per_category: &[u32]) -> Self {
        let tallies = vehicles_per_category
            .iter()
            .map(|&vehicles| CategoryTally { vehicles, ..CategoryTally::default() })
            .collect();
        Self { tallies }
    }

    #[inline]
    pub fn tally(&self, category: CategoryId) -> &CategoryTally {
        &self.tallies[category.index()]
    }

    pub fn tallies(&self) -> &[CategoryTally] {
        &self.tallies
    }

    #[inline]
    pub fn credit_flight(&mut self, category: CategoryId) {
        self.tallies[category.index()].flight_ticks += 1;
    }

    #[inline]
    pub fn credit_charge(&mut self, category: CategoryId) {
        self.tallies[category.index()].charge_ticks += 1;
    }

    #[inline]
    pub fn credit_wait(&mut self, category: CategoryId) {
        self.tallies[category.index()].wait_ticks += 1;
    }

    #[inline]
    pub fn record_fault(&mut self, category: CategoryId) {
        self.tallies[category.index()].faults += 1;
    }

    /// Convert tick counts to hours using `clock`'s tick length.
    pub fn report(&self, catalog: &Catalog, clock: &SimClock, seed: u64) -> FleetReport {
        let categories = catalog
            .iter()
            .map(|(id, spec)| {
                let t = self.tally(id);
                let flight_hours = clock.ticks_to_hours(t.flight_ticks);
                CategoryReport {
                    name:            spec.name.clone(),
                    vehicle_count:   t.vehicles,
                    flight_hours,
                    charge_hours:    clock.ticks_to_hours(t.charge_ticks),
                    wait_hours:      clock.ticks_to_hours(t.wait_ticks),
                    faults:          t.faults,
                    passenger_miles: spec.passenger_miles_per_hour() * flight_hours,
                }
            })
            .collect();

        FleetReport {
            seed,
            ticks: clock.current_tick,
            simulated_hours: clock.ticks_to_hours(clock.current_tick.0),
            categories,
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// End-of-run figures for one category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryReport {
    pub name:            String,
    pub vehicle_count:   u32,
    pub flight_hours:    f64,
    pub charge_hours:    f64,
    pub wait_hours:      f64,
    pub faults:          u64,
    pub passenger_miles: f64,
}

impl fmt::Display for CategoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*** {} vehicle stats ***", self.name)?;
        writeln!(f, "Vehicle count:   {}", self.vehicle_count)?;
        writeln!(f, "Time flying:     {:.3} h", self.flight_hours)?;
        writeln!(f, "Time charging:   {:.3} h", self.charge_hours)?;
        writeln!(f, "Time waiting:    {:.3} h", self.wait_hours)?;
        writeln!(f, "Faults:          {}", self.faults)?;
        write!(f, "Passenger miles: {:.1}", self.passenger_miles)
    }
}

/// End-of-run report: one entry per catalog category, in catalog order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetReport {
    /// Seed the run's generator was created from (replays the run).
    pub seed:            u64,
    pub ticks:           Tick,
    pub simulated_hours: f64,
    pub categories:      Vec<CategoryReport>,
}

impl FleetReport {
    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Results for {:.2} simulated hours ({} ticks, seed {})",
            self.simulated_hours, self.ticks.0, self.seed
        )?;
        for category in &self.categories {
            writeln!(f)?;
            writeln!(f, "{category}")?;
        }
        Ok(())
    }
}
