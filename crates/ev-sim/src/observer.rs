//! Simulation observer trait for progress reporting and instrumentation.

use ev_charge::TickActivity;
use ev_core::Tick;

/// What happened during one tick, handed to [`SimObserver::on_tick_end`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Fault checks that fired this tick.
    pub faults:       u32,
    /// Vehicles whose battery ran empty and joined the queue this tick.
    pub newly_queued: u32,
    /// Charger admissions and releases, in the order they happened.
    pub activity:     TickActivity,
    /// End-of-tick occupancy of each state.
    pub flying:       usize,
    pub queued:       usize,
    pub charging:     usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Remaining;
///
/// impl SimObserver for Remaining {
///     fn on_progress(&mut self, _tick: Tick, remaining_ms: u64) {
///         print!("\rTime remaining: {} s", remaining_ms / 1_000);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called every `config.progress_interval_ticks` ticks with the simulated
    /// time still to run.
    fn on_progress(&mut self, _tick: Tick, _remaining_ms: u64) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
