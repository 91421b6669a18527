//! `ev-fleet` — vehicles, their batteries, and the categories they belong to.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`battery`]   | `Battery` (per-tick drain / charge arithmetic)             |
//! | [`spec`]      | `VehicleSpec`, `Catalog` (name-indexed category table)     |
//! | [`presets`]   | The five stock categories `Alpha` … `Echo`                 |
//! | [`fault`]     | `FaultModel` (hourly probability → per-tick hazard)        |
//! | [`vehicle`]   | `Vehicle`, `VehicleState`                                  |
//! | [`store`]     | `Fleet` (all vehicles + per-category fault models)         |
//! | [`builder`]   | `FleetBuilder` (explicit or random composition)            |
//! | [`shared`]    | `SharedBattery`, `ChargeWorker` (lock-and-join charging)   |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                             |
//!
//! Categories are data, not types: every vehicle carries a [`CategoryId`]
//! into the [`Catalog`], and all per-category behavior is driven by the
//! [`VehicleSpec`] found there.
//!
//! [`CategoryId`]: ev_core::CategoryId

pub mod battery;
pub mod builder;
pub mod error;
pub mod fault;
pub mod presets;
pub mod shared;
pub mod spec;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use battery::Battery;
pub use builder::FleetBuilder;
pub use error::{FleetError, FleetResult};
pub use fault::FaultModel;
pub use shared::{BatterySnapshot, ChargeWorker, SharedBattery, WorkerExit};
pub use spec::{Catalog, VehicleSpec};
pub use store::Fleet;
pub use vehicle::{Vehicle, VehicleState};
