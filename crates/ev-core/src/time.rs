//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated time is held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Using an integer tick as the canonical time unit means all accumulators
//! are exact tick counts (no floating-point drift); conversion to hours only
//! happens when a report is produced.
//!
//! Every rate in the simulator (battery drain, charge step, fault hazard) is
//! expressed per tick, so changing `tick_duration_ms` rescales all of them at
//! construction time and nowhere else.

use std::fmt;

use crate::{EvError, EvResult};

/// Milliseconds in one simulated hour.
pub const MS_PER_HOUR: u64 = 3_600_000;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated time.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated milliseconds one tick represents.
    pub tick_duration_ms: u64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(tick_duration_ms: u64) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms
    }

    /// Length of one tick in simulated hours.
    #[inline]
    pub fn tick_hours(&self) -> f64 {
        self.tick_duration_ms as f64 / MS_PER_HOUR as f64
    }

    /// Number of ticks in one simulated hour.  Fractional when the tick
    /// length does not divide an hour evenly.
    #[inline]
    pub fn ticks_per_hour(&self) -> f64 {
        MS_PER_HOUR as f64 / self.tick_duration_ms as f64
    }

    /// Convert a tick count to simulated hours.
    #[inline]
    pub fn ticks_to_hours(&self, ticks: u64) -> f64 {
        ticks as f64 * self.tick_hours()
    }

    /// How many ticks span `ms` milliseconds? (rounds up: the final partial
    /// tick is simulated in full)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms)
    }

    /// Break elapsed time into (hour, minute, second) components.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        split_hms(self.elapsed_ms())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}

/// Split a millisecond span into (hours, minutes, seconds).
pub fn split_hms(ms: u64) -> (u64, u32, u32) {
    let total_secs = ms / 1_000;
    let hours = total_secs / 3_600;
    let minutes = ((total_secs % 3_600) / 60) as u32;
    let seconds = (total_secs % 60) as u32;
    (hours, minutes, seconds)
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically filled from command-line flags by the driver and passed to the
/// simulation builder, which calls [`validate`](Self::validate) before
/// constructing anything.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of vehicles in a randomly composed fleet.
    pub fleet_size: usize,

    /// Number of single-occupancy charger slots.
    pub charger_count: usize,

    /// Total simulated time to cover, in milliseconds.
    pub duration_ms: u64,

    /// Simulated milliseconds per tick.
    pub tick_duration_ms: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    /// `None` seeds from the operating system's entropy source.
    pub seed: Option<u64>,

    /// Report progress to the observer every N ticks.  0 disables it.
    pub progress_interval_ticks: u64,
}

impl Default for SimConfig {
    /// 20 vehicles sharing 3 chargers for 3 simulated hours at 600 ms ticks.
    fn default() -> Self {
        Self {
            fleet_size:              20,
            charger_count:           3,
            duration_ms:             3 * MS_PER_HOUR,
            tick_duration_ms:        600,
            seed:                    None,
            progress_interval_ticks: 100,
        }
    }
}

impl SimConfig {
    /// Reject configurations that would divide by zero or never terminate.
    pub fn validate(&self) -> EvResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(EvError::Config("tick duration must be positive".into()));
        }
        if self.duration_ms == 0 {
            return Err(EvError::Config("simulation duration must be positive".into()));
        }
        if self.charger_count == 0 {
            return Err(EvError::Config("at least one charger is required".into()));
        }
        if self.charger_count > u16::MAX as usize {
            return Err(EvError::Config(format!(
                "charger count {} exceeds {}",
                self.charger_count,
                u16::MAX
            )));
        }
        if self.fleet_size == 0 {
            return Err(EvError::Config("fleet size must be positive".into()));
        }
        Ok(())
    }

    /// Total ticks to simulate: the loop stops once
    /// `ticks * tick_duration_ms >= duration_ms`.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.make_clock().ticks_for_ms(self.duration_ms)
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}
