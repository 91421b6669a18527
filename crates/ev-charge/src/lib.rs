//! `ev-charge` — charger slots, the FIFO charge queue, and admission.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`queue`]     | `ChargeQueue` (`VecDeque<VehicleId>`, strict FIFO)        |
//! | [`charger`]   | `Charger` (single-occupancy slot)                         |
//! | [`station`]   | `ChargingStation`, `ChargeClient` trait, `TickActivity`   |
//! | [`error`]     | `ChargeError`, `ChargeResult<T>`                          |
//!
//! # Arbitration (summary)
//!
//! Each tick, for every charger in id order:
//!
//! ```text
//! free and queue non-empty → admit queue head
//! occupied                 → one charge step
//!   now full               → release to flying, admit next queue head,
//!                            give it this tick's charge step
//! ```
//!
//! The station only knows vehicle ids.  Battery state lives with the caller,
//! reached through the [`ChargeClient`] trait.

pub mod charger;
pub mod error;
pub mod queue;
pub mod station;


pub use charger::Charger;
pub use error::{ChargeError, ChargeResult};
pub use queue::ChargeQueue;
pub use station::{ChargeClient, ChargingStation, TickActivity};
