//! Independent replicate runs over a list of seeds.
//!
//! Each seed gets its own [`Sim`](crate::Sim) built from the same
//! configuration and catalog; nothing is shared between runs.  With the
//! `parallel` feature the runs execute on Rayon's thread pool.  Output order
//! always follows `seeds`.

use ev_core::SimConfig;
use ev_fleet::Catalog;

use crate::{CategoryReport, FleetReport, NoopObserver, SimBuilder, SimResult};

/// Run one full simulation per seed and collect the reports.
pub fn run_replicates(
    config:  &SimConfig,
    catalog: &Catalog,
    seeds:   &[u64],
) -> SimResult<Vec<FleetReport>> {
    let run_one = |&seed: &u64| -> SimResult<FleetReport> {
        let config = SimConfig { seed: Some(seed), ..config.clone() };
        let mut sim = SimBuilder::new(config, catalog.clone()).build()?;
        Ok(sim.run(&mut NoopObserver))
    };

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        seeds.par_iter().map(run_one).collect()
    }
}

/// Per-category means across replicate reports.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryMean {
    pub name:            String,
    pub vehicle_count:   f64,
    pub flight_hours:    f64,
    pub charge_hours:    f64,
    pub wait_hours:      f64,
    pub faults:          f64,
    pub passenger_miles: f64,
}

/// Average each category's figures over `reports`.
///
/// Reports must come from the same catalog (categories are matched by
/// position).  Returns an empty list for no reports.
pub fn mean_by_category(reports: &[FleetReport]) -> Vec<CategoryMean> {
    let Some(first) = reports.first() else {
        return Vec::new();
    };
    let n = reports.len() as f64;

    first
        .categories
        .iter()
        .enumerate()
        .map(|(i, head)| {
            let mean = |field: fn(&CategoryReport) -> f64| {
                reports.iter().map(|r| field(&r.categories[i])).sum::<f64>() / n
            };
            CategoryMean {
                name:            head.name.clone(),
                vehicle_count:   mean(|c| c.vehicle_count as f64),
                flight_hours:    mean(|c| c.flight_hours),
                charge_hours:    mean(|c| c.charge_hours),
                wait_hours:      mean(|c| c.wait_hours),
                faults:          mean(|c| c.faults as f64),
                passenger_miles: mean(|c| c.passenger_miles),
            }
        })
        .collect()
}
