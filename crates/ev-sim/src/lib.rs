//! `ev-sim` — tick loop orchestrator for the eVTOL fleet simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks():
//!   ① Faults:   every vehicle draws one hazard sample, in VehicleId order.
//!   ② Flight:   every flying vehicle drains one tick; vehicles that hit
//!                empty join the tail of the charge queue.
//!   ③ Charging: ChargingStation::arbitrate: free chargers admit the queue
//!                head, occupants take one step, full vehicles go back to
//!                flying and the next queued vehicle takes and charges in
//!                their slot the same tick.
//!   ④ Credit:   still flying → flight (+ passenger-miles); on a charger
//!                this tick, including those just released → charging;
//!                queued → waiting.
//! ```
//!
//! All battery mutation happens inside this loop on one thread; "charging"
//! is a state, not a background task.  Runs are reproducible from
//! `SimConfig::seed`.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replicate simulations on Rayon's thread pool.     |
//! | `serde`    | `Serialize`/`Deserialize` on reports.                  |
//!
//! # Quick-start
//!
//! ```rust
//! use ev_core::SimConfig;
//! use ev_fleet::Catalog;
//! use ev_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig { seed: Some(42), ..SimConfig::default() };
//! let mut sim = SimBuilder::new(config, Catalog::presets()).build()?;
//! let report = sim.run(&mut NoopObserver);
//! assert_eq!(report.categories.len(), 5);
//! # Ok::<(), ev_sim::SimError>(())
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod replicate;
pub mod sim;
pub mod stats;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use replicate::{CategoryMean, mean_by_category, run_replicates};
pub use sim::Sim;
pub use stats::{CategoryReport, CategoryTally, FleetReport, FleetStats};
