//! Vehicle categories.
//!
//! A [`VehicleSpec`] is an immutable named profile; a [`Catalog`] is the
//! ordered set of specs available to a run.  Vehicles refer to their spec by
//! [`CategoryId`], which is the spec's position in the catalog.

use rustc_hash::FxHashMap;

use ev_core::{CategoryId, EvError};

use crate::{FleetError, FleetResult};

// ── VehicleSpec ───────────────────────────────────────────────────────────────

/// Immutable parameters shared by every vehicle of one category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    pub name:                       String,
    pub cruise_speed_mph:           f64,
    pub passenger_count:            u32,
    pub fault_probability_per_hour: f64,
    pub battery_capacity_kwh:       f64,
    pub energy_use_kwh_per_mile:    f64,
    pub time_to_full_hr:            f64,
}

impl VehicleSpec {
    /// Energy drawn per hour of cruise.
    #[inline]
    pub fn energy_use_kwh_per_hour(&self) -> f64 {
        self.energy_use_kwh_per_mile * self.cruise_speed_mph
    }

    /// Passenger-miles flown per hour of cruise at full occupancy.
    #[inline]
    pub fn passenger_miles_per_hour(&self) -> f64 {
        self.passenger_count as f64 * self.cruise_speed_mph
    }

    /// Check every field against the ranges the simulator can handle.
    pub fn validate(&self) -> FleetResult<()> {
        let fail = |reason: String| {
            Err(FleetError::InvalidSpec { name: self.name.clone(), reason })
        };
        if self.name.trim().is_empty() {
            return fail("name must not be empty".into());
        }
        if !(self.battery_capacity_kwh.is_finite() && self.battery_capacity_kwh > 0.0) {
            return fail(format!("battery capacity must be positive, got {}", self.battery_capacity_kwh));
        }
        if !(self.time_to_full_hr.is_finite() && self.time_to_full_hr > 0.0) {
            return fail(format!("time to full charge must be positive, got {}", self.time_to_full_hr));
        }
        if !(self.cruise_speed_mph.is_finite() && self.cruise_speed_mph >= 0.0) {
            return fail(format!("cruise speed must be non-negative, got {}", self.cruise_speed_mph));
        }
        if !(self.energy_use_kwh_per_mile.is_finite() && self.energy_use_kwh_per_mile >= 0.0) {
            return fail(format!("energy use must be non-negative, got {}", self.energy_use_kwh_per_mile));
        }
        if !(0.0..=1.0).contains(&self.fault_probability_per_hour) {
            return fail(format!(
                "fault probability must lie in [0, 1], got {}",
                self.fault_probability_per_hour
            ));
        }
        Ok(())
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Ordered, validated set of vehicle categories for one run.
///
/// `CategoryId(i)` always refers to the `i`-th spec passed to
/// [`Catalog::new`]; report output follows the same order.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<VehicleSpec>", into = "Vec<VehicleSpec>")
)]
pub struct Catalog {
    specs:   Vec<VehicleSpec>,
    by_name: FxHashMap<String, CategoryId>,
}

impl Catalog {
    /// Validate `specs` and index them by name.
    pub fn new(specs: Vec<VehicleSpec>) -> FleetResult<Self> {
        if specs.is_empty() {
            return Err(FleetError::EmptyCatalog);
        }
        let mut by_name = FxHashMap::default();
        for (i, spec) in specs.iter().enumerate() {
            spec.validate()?;
            let id = CategoryId::try_from(i).map_err(|_| {
                EvError::Config(format!("catalog holds more than {} categories", u16::MAX))
            })?;
            if by_name.insert(spec.name.clone(), id).is_some() {
                return Err(FleetError::DuplicateCategory(spec.name.clone()));
            }
        }
        Ok(Self { specs, by_name })
    }

    /// Look up a spec by id.
    ///
    /// # Panics
    /// Panics if `id` did not come from this catalog.
    #[inline]
    pub fn get(&self, id: CategoryId) -> &VehicleSpec {
        &self.specs[id.index()]
    }

    /// Resolve a category name.
    pub fn id_of(&self, name: &str) -> FleetResult<CategoryId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| EvError::UnknownCategory(name.to_owned()).into())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// All category ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        (0..self.specs.len()).map(|i| CategoryId(i as u16))
    }

    /// `(id, spec)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &VehicleSpec)> + '_ {
        self.ids().zip(self.specs.iter())
    }

    pub fn specs(&self) -> &[VehicleSpec] {
        &self.specs
    }
}

impl TryFrom<Vec<VehicleSpec>> for Catalog {
    type Error = FleetError;

    fn try_from(specs: Vec<VehicleSpec>) -> FleetResult<Self> {
        Catalog::new(specs)
    }
}

impl From<Catalog> for Vec<VehicleSpec> {
    fn from(catalog: Catalog) -> Self {
        catalog.specs
    }
}
