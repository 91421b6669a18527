//! Stock vehicle categories.
//!
//! | Name    | Cruise (mph) | Battery (kWh) | Full charge (h) | kWh/mi | Pax | Faults/h |
//! |---------|--------------|---------------|-----------------|--------|-----|----------|
//! | Alpha   | 120          | 320           | 0.60            | 1.6    | 4   | 0.25     |
//! | Beta    | 100          | 100           | 0.20            | 1.5    | 5   | 0.10     |
//! | Charlie | 160          | 220           | 0.80            | 2.2    | 3   | 0.05     |
//! | Delta   | 90           | 120           | 0.62            | 0.8    | 2   | 0.22     |
//! | Echo    | 30           | 150           | 0.30            | 5.8    | 2   | 0.61     |

use crate::{Catalog, VehicleSpec};

fn spec(
    name:        &str,
    cruise:      f64,
    capacity:    f64,
    time_to_full: f64,
    per_mile:    f64,
    passengers:  u32,
    fault_prob:  f64,
) -> VehicleSpec {
    VehicleSpec {
        name:                       name.to_owned(),
        cruise_speed_mph:           cruise,
        passenger_count:            passengers,
        fault_probability_per_hour: fault_prob,
        battery_capacity_kwh:       capacity,
        energy_use_kwh_per_mile:    per_mile,
        time_to_full_hr:            time_to_full,
    }
}

pub fn alpha() -> VehicleSpec {
    spec("Alpha", 120.0, 320.0, 0.6, 1.6, 4, 0.25)
}

pub fn beta() -> VehicleSpec {
    spec("Beta", 100.0, 100.0, 0.2, 1.5, 5, 0.10)
}

pub fn charlie() -> VehicleSpec {
    spec("Charlie", 160.0, 220.0, 0.8, 2.2, 3, 0.05)
}

pub fn delta() -> VehicleSpec {
    spec("Delta", 90.0, 120.0, 0.62, 0.8, 2, 0.22)
}

pub fn echo() -> VehicleSpec {
    spec("Echo", 30.0, 150.0, 0.3, 5.8, 2, 0.61)
}

/// All five stock categories, in table order.
pub fn all() -> Vec<VehicleSpec> {
    vec![alpha(), beta(), charlie(), delta(), echo()]
}

impl Catalog {
    /// Catalog of the five stock categories.
    pub fn presets() -> Catalog {
        Catalog::new(all()).expect("stock presets are valid")
    }
}
