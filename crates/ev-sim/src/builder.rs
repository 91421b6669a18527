//! Fluent builder for constructing a [`Sim`].

use ev_charge::ChargingStation;
use ev_core::{CategoryId, SimConfig, SimRng, VehicleId};
use ev_fleet::{Catalog, FleetBuilder};

use crate::{FleetStats, Sim, SimError, SimResult};

/// Seed offset of the sub-stream that picks a random fleet composition.
const COMPOSITION_STREAM: u64 = 1;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: fleet size, chargers, duration, tick length, seed, …
/// - [`Catalog`]: the vehicle categories ([`Catalog::presets`] for the five
///   stock profiles)
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.composition(v)`      | One of each category, the rest uniform random  |
/// | `.initial_charge(i,e)` | Every vehicle starts full                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, Catalog::presets())
///     .composition(vec![CategoryId(0), CategoryId(0)])
///     .initial_charge(VehicleId(1), 50.0)
///     .build()?;
/// let report = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:          SimConfig,
    catalog:         Catalog,
    composition:     Option<Vec<CategoryId>>,
    initial_charges: Vec<(VehicleId, f64)>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            composition:     None,
            initial_charges: Vec::new(),
        }
    }

    /// Fix the category of every vehicle, in id order.  Its length must equal
    /// `config.fleet_size`.
    pub fn composition(mut self, composition: Vec<CategoryId>) -> Self {
        self.composition = Some(composition);
        self
    }

    /// Start `vehicle` with `charge_kwh` instead of a full battery.  Values
    /// outside `[0, capacity]` are clamped.
    pub fn initial_charge(mut self, vehicle: VehicleId, charge_kwh: f64) -> Self {
        self.initial_charges.push((vehicle, charge_kwh));
        self
    }

    /// Validate inputs, seed the generator, build the fleet and charging
    /// station, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let mut rng = SimRng::from_seed_or_entropy(self.config.seed)?;
        let mut mix_rng = rng.child(COMPOSITION_STREAM);
        let clock = self.config.make_clock();

        // ── Fleet ─────────────────────────────────────────────────────────
        let builder = match self.composition {
            Some(composition) => {
                if composition.len() != self.config.fleet_size {
                    return Err(SimError::Config(format!(
                        "composition lists {} vehicles but fleet size is {}",
                        composition.len(),
                        self.config.fleet_size
                    )));
                }
                if let Some(bad) = composition.iter().find(|c| c.index() >= self.catalog.len()) {
                    return Err(SimError::Config(format!("{bad} is not in the catalog")));
                }
                composition
                    .into_iter()
                    .fold(FleetBuilder::new(&self.catalog), |b, c| b.add(c, 1))
            }
            None => {
                FleetBuilder::new(&self.catalog).random_mix(self.config.fleet_size, &mut mix_rng)
            }
        };
        let mut fleet = builder.build(&clock)?;

        for (id, charge_kwh) in self.initial_charges {
            if id.index() >= fleet.len() {
                return Err(SimError::Config(format!(
                    "initial charge given for {id} but the fleet has {} vehicles",
                    fleet.len()
                )));
            }
            if !charge_kwh.is_finite() {
                return Err(SimError::Config(format!("initial charge for {id} is {charge_kwh}")));
            }
            fleet.get_mut(id).set_charge_kwh(charge_kwh);
        }

        // ── Station and accumulators ──────────────────────────────────────
        let station = ChargingStation::new(self.config.charger_count)?;
        let stats = FleetStats::new(&fleet.count_by_category());
        let flying = fleet.ids().collect();

        Ok(Sim {
            clock,
            config: self.config,
            catalog: self.catalog,
            fleet,
            station,
            flying,
            stats,
            rng,
        })
    }
}
