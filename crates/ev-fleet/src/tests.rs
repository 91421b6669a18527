//! Unit tests for ev-fleet.

#[cfg(test)]
fn test_spec() -> crate::VehicleSpec {
    // 100 kWh, full in 1 h, 200 kWh/h of cruise → empty after 0.5 h.
    crate::VehicleSpec {
        name:                       "Test".into(),
        cruise_speed_mph:           100.0,
        passenger_count:            2,
        fault_probability_per_hour: 0.2,
        battery_capacity_kwh:       100.0,
        energy_use_kwh_per_mile:    2.0,
        time_to_full_hr:            1.0,
    }
}

/// 225 s ticks: 1/16 h, exactly representable, so rates are exact.
#[cfg(test)]
fn sixteenth_hour_clock() -> ev_core::SimClock {
    ev_core::SimClock::new(225_000)
}

#[cfg(test)]
mod battery {
    use super::{sixteenth_hour_clock, test_spec};
    use crate::Battery;
    use ev_core::{SimClock, SimRng};

    #[test]
    fn starts_full_and_idle() {
        let b = Battery::full(100.0, 1.0, 2.0).unwrap();
        assert!(b.is_full());
        assert!(!b.is_empty());
        assert!(!b.is_charging());
        assert_eq!(b.state_of_charge(), 100.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Battery::full(0.0, 1.0, 1.0).is_err());
        assert!(Battery::full(-5.0, 1.0, 1.0).is_err());
        assert!(Battery::full(f64::NAN, 1.0, 1.0).is_err());
        assert!(Battery::full(10.0, -1.0, 1.0).is_err());
        assert!(Battery::full(10.0, 1.0, 0.0).is_err());
        assert!(Battery::full(10.0, 0.0, 1.0).is_ok(), "zero drain is allowed");
    }

    #[test]
    fn rates_follow_spec_and_tick_length() {
        let b = Battery::for_spec(&test_spec(), &sixteenth_hour_clock()).unwrap();
        assert_eq!(b.drain_per_tick_kwh(), 12.5);
        assert_eq!(b.charge_per_tick_kwh(), 6.25);
        assert_eq!(b.ticks_to_empty(), Some(8));
    }

    #[test]
    fn drain_floors_at_zero() {
        let mut b = Battery::full(10.0, 4.0, 1.0).unwrap();
        b.drain(2);
        assert_eq!(b.charge_kwh(), 2.0);
        b.drain(1);
        assert_eq!(b.charge_kwh(), 0.0);
        assert!(b.is_empty());
        assert_eq!(b.state_of_charge(), 0.0);
    }

    #[test]
    fn charge_caps_and_clears_flag() {
        let mut b = Battery::full(10.0, 1.0, 4.0).unwrap().with_charge(0.0);
        assert!(b.start_charging());
        b.charge_step(2);
        assert_eq!(b.charge_kwh(), 8.0);
        assert!(b.is_charging());
        b.charge_step(1);
        assert_eq!(b.charge_kwh(), 10.0);
        assert!(b.is_full());
        assert!(!b.is_charging(), "full battery must not stay marked charging");
    }

    #[test]
    fn full_battery_refuses_charging_flag() {
        let mut b = Battery::full(10.0, 1.0, 1.0).unwrap();
        assert!(!b.start_charging());
        assert!(!b.is_charging());
    }

    #[test]
    fn with_charge_clamps() {
        let b = Battery::full(10.0, 1.0, 1.0).unwrap();
        assert_eq!(b.clone().with_charge(25.0).charge_kwh(), 10.0);
        assert_eq!(b.with_charge(-3.0).charge_kwh(), 0.0);
    }

    #[test]
    fn empty_to_full_in_time_to_full() {
        let mut b = Battery::for_spec(&test_spec(), &sixteenth_hour_clock())
            .unwrap()
            .with_charge(0.0);
        assert_eq!(b.ticks_to_full(), 16);
        b.start_charging();
        let mut steps = 0;
        while !b.is_full() {
            b.charge_step(1);
            steps += 1;
        }
        // 16 ticks of 1/16 h = exactly 1 h.
        assert_eq!(steps, 16);
    }

    #[test]
    fn empty_to_full_within_one_tick_for_uneven_ticks() {
        // 600 ms ticks do not divide 0.62 h evenly.
        let clock = SimClock::new(600);
        for spec in crate::presets::all() {
            let mut b = Battery::for_spec(&spec, &clock).unwrap().with_charge(0.0);
            b.start_charging();
            let mut steps = 0u64;
            while !b.is_full() {
                b.charge_step(1);
                steps += 1;
            }
            let hours = clock.ticks_to_hours(steps);
            assert!(
                (hours - spec.time_to_full_hr).abs() <= clock.tick_hours(),
                "{}: full after {hours} h, expected {} h",
                spec.name,
                spec.time_to_full_hr
            );
            assert_eq!(steps, Battery::for_spec(&spec, &clock).unwrap().with_charge(0.0).ticks_to_full());
        }
    }

    #[test]
    fn charge_stays_in_bounds_under_random_operations() {
        let mut rng = SimRng::new(17);
        let mut b = Battery::full(73.0, 3.3, 5.1).unwrap();
        for _ in 0..10_000 {
            let ticks = rng.gen_range(0..5u64);
            if rng.below(0.5) {
                b.stop_charging();
                b.drain(ticks);
            } else {
                b.start_charging();
                b.charge_step(ticks);
            }
            assert!((0.0..=73.0).contains(&b.charge_kwh()), "out of bounds: {}", b.charge_kwh());
            assert!(!(b.is_full() && b.is_charging()));
        }
    }
}

#[cfg(test)]
mod catalog {
    use super::test_spec;
    use crate::{Catalog, FleetError, VehicleSpec};
    use ev_core::CategoryId;

    #[test]
    fn presets_in_order() {
        let catalog = Catalog::presets();
        assert_eq!(catalog.len(), 5);
        let names: Vec<&str> = catalog.specs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta", "Charlie", "Delta", "Echo"]);
        assert_eq!(catalog.id_of("Charlie").unwrap(), CategoryId(2));
        assert_eq!(catalog.get(CategoryId(4)).cruise_speed_mph, 30.0);
    }

    #[test]
    fn unknown_name_errors() {
        let catalog = Catalog::presets();
        assert!(catalog.id_of("Foxtrot").is_err());
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(Catalog::new(vec![]), Err(FleetError::EmptyCatalog)));
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = Catalog::new(vec![test_spec(), test_spec()]);
        assert!(matches!(result, Err(FleetError::DuplicateCategory(n)) if n == "Test"));
    }

    #[test]
    fn invalid_fields_rejected() {
        let cases: Vec<VehicleSpec> = vec![
            VehicleSpec { battery_capacity_kwh: 0.0, ..test_spec() },
            VehicleSpec { time_to_full_hr: 0.0, ..test_spec() },
            VehicleSpec { fault_probability_per_hour: 1.5, ..test_spec() },
            VehicleSpec { fault_probability_per_hour: -0.1, ..test_spec() },
            VehicleSpec { cruise_speed_mph: f64::INFINITY, ..test_spec() },
            VehicleSpec { energy_use_kwh_per_mile: -1.0, ..test_spec() },
            VehicleSpec { name: "  ".into(), ..test_spec() },
        ];
        for spec in cases {
            assert!(Catalog::new(vec![spec.clone()]).is_err(), "{spec:?} should be rejected");
        }
    }

    #[test]
    fn derived_rates() {
        let spec = test_spec();
        assert_eq!(spec.energy_use_kwh_per_hour(), 200.0);
        assert_eq!(spec.passenger_miles_per_hour(), 200.0);
    }
}

#[cfg(test)]
mod fault {
    use crate::FaultModel;
    use ev_core::SimRng;

    #[test]
    fn extremes() {
        let never = FaultModel::new(0.0, 100.0).unwrap();
        let always = FaultModel::new(1.0, 100.0).unwrap();
        assert_eq!(never.per_tick(), 0.0);
        assert_eq!(always.per_tick(), 1.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(FaultModel::new(1.01, 10.0).is_err());
        assert!(FaultModel::new(-0.01, 10.0).is_err());
        assert!(FaultModel::new(f64::NAN, 10.0).is_err());
        assert!(FaultModel::new(0.5, 0.0).is_err());
    }

    #[test]
    fn per_hour_probability_is_preserved() {
        for &p in &[0.05, 0.1, 0.22, 0.25, 0.61, 0.99] {
            for &n in &[1.0, 16.0, 6_000.0, 360_000.0] {
                let model = FaultModel::new(p, n).unwrap();
                let no_fault = (1.0 - model.per_tick()).powf(n);
                assert!(
                    (no_fault - (1.0 - p)).abs() < 1e-9,
                    "p={p} n={n}: P(no fault in an hour) = {no_fault}"
                );
                if n.fract() == 0.0 {
                    assert!((model.probability_within(n as u64) - p).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn single_check_per_hour_equals_hourly_probability() {
        let model = FaultModel::new(0.37, 1.0).unwrap();
        assert!((model.per_tick() - 0.37).abs() < 1e-12);
    }

    #[test]
    fn observed_hourly_rate_converges() {
        let p = 0.3;
        let n = 50u64;
        let hours = 20_000;
        let model = FaultModel::new(p, n as f64).unwrap();
        let mut rng = SimRng::new(2024);

        let mut hours_with_fault = 0u32;
        for _ in 0..hours {
            let mut any = false;
            for _ in 0..n {
                any |= model.check(&mut rng);
            }
            if any {
                hours_with_fault += 1;
            }
        }
        let observed = hours_with_fault as f64 / hours as f64;
        // σ = sqrt(p(1-p)/hours) ≈ 0.0032; allow ~5σ.
        assert!((observed - p).abs() < 0.016, "observed {observed}, expected {p}");
    }
}

#[cfg(test)]
mod vehicle {
    use super::{sixteenth_hour_clock, test_spec};
    use crate::{Battery, Vehicle, VehicleState};
    use ev_core::{CategoryId, VehicleId};

    fn vehicle() -> Vehicle {
        let battery = Battery::for_spec(&test_spec(), &sixteenth_hour_clock()).unwrap();
        Vehicle::new(VehicleId(0), CategoryId(0), battery)
    }

    #[test]
    fn full_cycle() {
        let mut v = vehicle();
        assert_eq!(v.state(), VehicleState::Flying);
        for tick in 1..=8 {
            let empty = v.fly(1);
            assert_eq!(empty, tick == 8, "tick {tick}");
        }
        v.enqueue();
        assert_eq!(v.state(), VehicleState::Queued);
        v.begin_charging();
        assert_eq!(v.state(), VehicleState::Charging);
        assert!(v.battery().is_charging());
        let mut steps = 0;
        while !v.charge(1) {
            steps += 1;
        }
        assert_eq!(steps + 1, 16);
        v.finish_charging();
        assert_eq!(v.state(), VehicleState::Flying);
        assert!(!v.battery().is_charging());
    }

    #[test]
    #[should_panic(expected = "admitted while not queued")]
    fn admit_from_flying_panics() {
        vehicle().begin_charging();
    }

    #[test]
    #[should_panic(expected = "released before full")]
    fn early_release_panics() {
        let mut v = vehicle();
        v.set_charge_kwh(0.0);
        v.enqueue();
        v.begin_charging();
        v.charge(1);
        v.finish_charging();
    }

    #[test]
    #[should_panic(expected = "queued while not flying")]
    fn double_enqueue_panics() {
        let mut v = vehicle();
        v.enqueue();
        v.enqueue();
    }

    #[test]
    fn faults_accumulate() {
        let mut v = vehicle();
        v.record_fault();
        v.record_fault();
        assert_eq!(v.faults(), 2);
    }
}

#[cfg(test)]
mod fleet {
    use super::sixteenth_hour_clock;
    use crate::{Catalog, FleetBuilder, VehicleState};
    use ev_core::{CategoryId, SimClock, SimRng, VehicleId};

    #[test]
    fn explicit_composition_assigns_dense_ids() {
        let catalog = Catalog::presets();
        let fleet = FleetBuilder::new(&catalog)
            .add(CategoryId(1), 2)
            .add_named("Echo", 1)
            .unwrap()
            .build(&sixteenth_hour_clock())
            .unwrap();
        let ids: Vec<VehicleId> = fleet.ids().collect();
        assert_eq!(ids, vec![VehicleId(0), VehicleId(1), VehicleId(2)]);
        assert_eq!(fleet.get(VehicleId(2)).category(), CategoryId(4));
        assert_eq!(fleet.count_by_category(), vec![0, 2, 0, 0, 1]);
    }

    #[test]
    fn unknown_category_name_errors() {
        let catalog = Catalog::presets();
        assert!(FleetBuilder::new(&catalog).add_named("Zulu", 1).is_err());
    }

    #[test]
    fn random_mix_covers_every_category() {
        let catalog = Catalog::presets();
        let mut rng = SimRng::new(5);
        let builder = FleetBuilder::new(&catalog).random_mix(20, &mut rng);
        assert_eq!(builder.composition().len(), 20);
        assert_eq!(&builder.composition()[..5], &[
            CategoryId(0), CategoryId(1), CategoryId(2), CategoryId(3), CategoryId(4)
        ]);
    }

    #[test]
    fn random_mix_smaller_than_catalog() {
        let catalog = Catalog::presets();
        let mut rng = SimRng::new(5);
        let builder = FleetBuilder::new(&catalog).random_mix(3, &mut rng);
        assert_eq!(builder.composition(), &[CategoryId(0), CategoryId(1), CategoryId(2)]);
    }

    #[test]
    fn random_mix_is_deterministic() {
        let catalog = Catalog::presets();
        let a = FleetBuilder::new(&catalog).random_mix(50, &mut SimRng::new(9)).composition().to_vec();
        let b = FleetBuilder::new(&catalog).random_mix(50, &mut SimRng::new(9)).composition().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn all_vehicles_start_flying_full() {
        let catalog = Catalog::presets();
        let fleet = FleetBuilder::new(&catalog)
            .random_mix(12, &mut SimRng::new(1))
            .build(&SimClock::new(600))
            .unwrap();
        assert!(fleet.iter().all(|v| v.state() == VehicleState::Flying && v.battery().is_full()));
        assert_eq!(fleet.ids().collect::<Vec<_>>(), (0..12).map(VehicleId).collect::<Vec<_>>());
    }

    #[test]
    fn fault_check_records_against_vehicle() {
        let mut spec = catalog_spec();
        spec.fault_probability_per_hour = 1.0;
        let catalog = Catalog::new(vec![spec]).unwrap();
        let mut fleet = FleetBuilder::new(&catalog)
            .add(CategoryId(0), 2)
            .build(&sixteenth_hour_clock())
            .unwrap();
        let mut rng = SimRng::new(0);
        assert!(fleet.fault_check(VehicleId(1), &mut rng));
        assert_eq!(fleet.get(VehicleId(1)).faults(), 1);
        assert_eq!(fleet.get(VehicleId(0)).faults(), 0);
    }

    fn catalog_spec() -> crate::VehicleSpec {
        super::test_spec()
    }
}

#[cfg(test)]
mod shared {
    use std::time::Duration;

    use crate::{Battery, ChargeWorker, SharedBattery, WorkerExit};

    fn empty_battery(charge_per_step: f64) -> Battery {
        Battery::full(10.0, 1.0, charge_per_step).unwrap().with_charge(0.0)
    }

    #[test]
    fn worker_fills_battery_and_is_joined() {
        let shared = SharedBattery::new(empty_battery(2.5));
        let worker = ChargeWorker::spawn(shared.clone(), Duration::from_millis(1));
        assert_eq!(worker.join(), WorkerExit::Full);

        let snap = shared.snapshot();
        assert!(snap.is_full());
        assert!(!snap.charging);
        assert_eq!(snap.state_of_charge(), 100.0);
        // The worker's clone is gone once joined.
        assert!(shared.try_into_inner().is_ok());
    }

    #[test]
    fn cancel_stops_early_and_clears_flag() {
        let shared = SharedBattery::new(empty_battery(1.0));
        let worker = ChargeWorker::spawn(shared.clone(), Duration::from_secs(60));
        assert_eq!(worker.cancel(), WorkerExit::Cancelled);

        let snap = shared.snapshot();
        assert!(!snap.charging);
        assert!(snap.charge_kwh < snap.capacity_kwh);
    }

    #[test]
    fn drop_joins_worker() {
        let shared = SharedBattery::new(empty_battery(1.0));
        {
            let _worker = ChargeWorker::spawn(shared.clone(), Duration::from_secs(60));
        }
        let battery = shared.try_into_inner().expect("worker released its handle on drop");
        assert!(!battery.is_charging());
    }

    #[test]
    fn full_battery_exits_immediately() {
        let shared = SharedBattery::new(Battery::full(10.0, 1.0, 1.0).unwrap());
        let worker = ChargeWorker::spawn(shared.clone(), Duration::from_secs(60));
        assert_eq!(worker.join(), WorkerExit::Full);
    }

    #[test]
    fn snapshots_are_consistent_while_charging() {
        let shared = SharedBattery::new(
            Battery::full(1_000.0, 1.0, 0.5).unwrap().with_charge(0.0),
        );
        let worker = ChargeWorker::spawn(shared.clone(), Duration::from_micros(50));
        let mut last = 0.0;
        for _ in 0..2_000 {
            let snap = shared.snapshot();
            assert!((0.0..=snap.capacity_kwh).contains(&snap.charge_kwh));
            assert!(snap.charge_kwh >= last, "charge went backwards");
            assert!(!(snap.is_full() && snap.charging));
            last = snap.charge_kwh;
        }
        drop(worker);
        // Mutation from this thread is serialized with the (stopped) worker.
        shared.with(|b| b.set_charge(1_000.0));
        assert!(shared.snapshot().is_full());
    }
}
