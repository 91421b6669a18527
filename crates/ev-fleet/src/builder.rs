//! Fluent builder for constructing a [`Fleet`] from a [`Catalog`].
//!
//! # Usage
//!
//! ```rust
//! use ev_core::{SimClock, SimRng};
//! use ev_fleet::{Catalog, FleetBuilder};
//!
//! let catalog = Catalog::presets();
//! let clock   = SimClock::new(600);
//! let mut rng = SimRng::new(42);
//!
//! let fleet = FleetBuilder::new(&catalog)
//!     .random_mix(20, &mut rng)
//!     .build(&clock)
//!     .unwrap();
//!
//! assert_eq!(fleet.len(), 20);
//! // Every category is represented at least once.
//! assert!(fleet.count_by_category().iter().all(|&n| n >= 1));
//! ```

use ev_core::{CategoryId, EvError, SimClock, SimRng, VehicleId};

use crate::{Battery, Catalog, FaultModel, Fleet, FleetResult, Vehicle};

/// Fluent builder for [`Fleet`].
///
/// Vehicles receive ids in the order they are added.  Every vehicle starts
/// flying with a full battery.
pub struct FleetBuilder<'a> {
    catalog:     &'a Catalog,
    composition: Vec<CategoryId>,
}

impl<'a> FleetBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            composition: Vec::new(),
        }
    }

    /// Append `count` vehicles of `category`.
    ///
    /// # Panics
    /// Panics if `category` is not part of the catalog.
    pub fn add(mut self, category: CategoryId, count: usize) -> Self {
        assert!(category.index() < self.catalog.len(), "{category} is not in the catalog");
        self.composition.extend(std::iter::repeat_n(category, count));
        self
    }

    /// Append `count` vehicles of the category called `name`.
    pub fn add_named(self, name: &str, count: usize) -> FleetResult<Self> {
        let id = self.catalog.id_of(name)?;
        Ok(self.add(id, count))
    }

    /// Append `total` vehicles: one of every category first (while `total`
    /// allows), then uniformly random categories for the remaining slots.
    pub fn random_mix(mut self, total: usize, rng: &mut SimRng) -> Self {
        let categories: Vec<CategoryId> = self.catalog.ids().collect();
        self.composition.extend(categories.iter().copied().take(total));
        for _ in categories.len()..total {
            let pick = rng.gen_range(0..categories.len());
            self.composition.push(categories[pick]);
        }
        self
    }

    /// Category of each vehicle added so far, in id order.
    pub fn composition(&self) -> &[CategoryId] {
        &self.composition
    }

    /// Size batteries and fault hazards for `clock`'s tick length and build
    /// the fleet.
    pub fn build(self, clock: &SimClock) -> FleetResult<Fleet> {
        let fault_models = self
            .catalog
            .specs()
            .iter()
            .map(|spec| FaultModel::for_spec(spec, clock))
            .collect::<FleetResult<Vec<_>>>()?;

        let mut vehicles = Vec::with_capacity(self.composition.len());
        for (i, &category) in self.composition.iter().enumerate() {
            let id = VehicleId::try_from(i).map_err(|_| {
                EvError::Config(format!("fleet holds more than {} vehicles", u32::MAX))
            })?;
            let battery = Battery::for_spec(self.catalog.get(category), clock)?;
            vehicles.push(Vehicle::new(id, category, battery));
        }

        Ok(Fleet::new(vehicles, fault_models))
    }
}
