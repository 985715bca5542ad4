//! Integration tests for rt-fleet.

use std::collections::HashMap;

use assert_approx_eq::assert_approx_eq;
use rt_control::{Idm, RingView};
use rt_core::{AutomationClass, Limits, Placement, Population, SimConfig, SimRng, Tick, VehicleId, VehicleParams};
use rt_vehicle::{VehicleSpec, presets};

use crate::builder::{apportion, arrange};
use crate::{Fleet, FleetBuilder, FleetError, FleetObserver, NoopObserver, SnapshotRow, permeability, road_length_for_density};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        step_secs:             0.01,
        total_ticks,
        seed:                  42,
        output_interval_ticks: 10,
    }
}

/// Noise-free IDM car with no reaction delay.
fn idm_car() -> VehicleSpec {
    let params = VehicleParams {
        length:            4.5,
        width:             1.7,
        time_headway:      1.5,
        accel:             Limits::new(-2.0, 1.0),
        speed:             Limits::new(0.0, 30.0),
        stopping_distance: 1.0,
        observation_error: 0.0,
        operation_error:   0.0,
        reaction_delay:    0.0,
    };
    VehicleSpec::new("IDM", AutomationClass::Human, Idm::default(), params)
}

fn mixed_fleet(seed: u64, n: usize) -> Fleet {
    let mut config = test_config(2_000);
    config.seed = seed;
    FleetBuilder::new(config, 1_000.0)
        .vehicle_count(n)
        .placement(Placement::Uniform)
        .population(Population::Shuffled)
        .template(presets::human(), 0.5)
        .template(presets::intelligent_cacc(), 0.3)
        .template(presets::semi_automated_acc(), 0.2)
        .build()
        .unwrap()
}

/// Collects every snapshot.
#[derive(Default)]
struct Recorder {
    starts:    usize,
    ends:      usize,
    snapshots: Vec<(Tick, Vec<SnapshotRow>)>,
    finished:  Option<Tick>,
}

impl FleetObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, _tick: Tick) {
        self.ends += 1;
    }

    fn on_snapshot(&mut self, tick: Tick, rows: &[SnapshotRow]) {
        self.snapshots.push((tick, rows.to_vec()));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    fn base() -> FleetBuilder {
        FleetBuilder::new(test_config(10), 500.0).vehicle_count(10).placement(Placement::Uniform)
    }

    #[test]
    fn builds_with_defaults() {
        let fleet = base().template(idm_car(), 1.0).build().unwrap();
        assert_eq!(fleet.len(), 10);
        assert_eq!(fleet.motions.len(), 10);
        assert_eq!(fleet.rngs.len(), 10);
    }

    #[test]
    fn too_few_vehicles() {
        let err = base().vehicle_count(1).template(idm_car(), 1.0).build().err();
        assert!(matches!(err, Some(FleetError::TooFewVehicles { got: 1 })));
    }

    #[test]
    fn non_positive_road() {
        let err = FleetBuilder::new(test_config(10), 0.0).vehicle_count(4).template(idm_car(), 1.0).build().err();
        assert!(matches!(err, Some(FleetError::Config(_))));
    }

    #[test]
    fn missing_templates() {
        assert!(matches!(base().build().err(), Some(FleetError::NoTemplates)));
    }

    #[test]
    fn bad_weights() {
        let err = base().template(idm_car(), -1.0).build().err();
        assert!(matches!(err, Some(FleetError::InvalidWeight { .. })));
        let err = base().template(idm_car(), f64::NAN).build().err();
        assert!(matches!(err, Some(FleetError::InvalidWeight { .. })));
        let err = base().template(idm_car(), 0.0).build().err();
        assert!(matches!(err, Some(FleetError::Config(_))));
    }

    #[test]
    fn invalid_template() {
        let mut spec = idm_car();
        spec.params.accel = Limits::new(0.5, 1.0);
        let err = base().template(spec, 1.0).build().err();
        assert!(matches!(err, Some(FleetError::InvalidTemplate { .. })));
    }

    #[test]
    fn invalid_step() {
        let mut config = test_config(10);
        config.step_secs = 0.0;
        let err = FleetBuilder::new(config, 500.0).vehicle_count(4).template(idm_car(), 1.0).build().err();
        assert!(matches!(err, Some(FleetError::Core(_))));
    }

    #[test]
    fn packed_overlap_rejected() {
        // Nine 5.5 m steps reach 49.5 m; the seam gap is 50 - 49.5 - 4.5 < 0.
        let err = FleetBuilder::new(test_config(10), 50.0)
            .vehicle_count(10)
            .placement(Placement::Packed)
            .template(idm_car(), 1.0)
            .build()
            .err();
        assert!(matches!(err, Some(FleetError::Overlap { slot: 9, .. })));
    }

    #[test]
    fn uniform_overlap_rejected() {
        // 4 m per vehicle is less than one body length.
        let err = FleetBuilder::new(test_config(10), 40.0)
            .vehicle_count(10)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .err();
        assert!(matches!(err, Some(FleetError::Overlap { .. })));
    }

    #[test]
    fn random_overlap_rejected() {
        let err = FleetBuilder::new(test_config(10), 50.0)
            .vehicle_count(10)
            .placement(Placement::Random)
            .template(idm_car(), 1.0)
            .build()
            .err();
        assert!(matches!(err, Some(FleetError::Overlap { .. })));
    }

    #[test]
    fn display_order_must_be_permutation() {
        let mut fleet = base().template(idm_car(), 1.0).build().unwrap();
        assert!(fleet.reorder_display(vec![0, 1, 2]).is_err());
        assert!(fleet.reorder_display(vec![0; 10]).is_err());
        assert!(fleet.reorder_display((0..10).rev().collect()).is_ok());
        assert_eq!(fleet.display_order()[0], 9);
    }
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod synthesis {
    use super::*;

    #[test]
    fn apportion_floors_then_tops_up() {
        assert_eq!(apportion(&[3.0, 1.0], 8), vec![6, 2]);
        assert_eq!(apportion(&[1.0, 1.0, 1.0], 10), vec![4, 3, 3]);
        assert_eq!(apportion(&[1.0, 2.0], 10), vec![3, 7]);
        assert_eq!(apportion(&[5.0, 0.0], 7), vec![7, 0]);
    }

    #[test]
    fn apportion_always_sums_to_n() {
        for n in 2..40 {
            let counts = apportion(&[0.37, 0.21, 0.42], n);
            assert_eq!(counts.iter().sum::<usize>(), n);
        }
    }

    #[test]
    fn uniform_population_interleaves() {
        let mut rng = SimRng::new(0);
        assert_eq!(arrange(&[2, 2], Population::Uniform, &mut rng), vec![0, 1, 0, 1]);
        assert_eq!(arrange(&[3, 1], Population::Uniform, &mut rng), vec![0, 0, 1, 0]);
    }

    #[test]
    fn shuffled_population_keeps_counts() {
        let mut rng = SimRng::new(5);
        let order = arrange(&[7, 3], Population::Shuffled, &mut rng);
        assert_eq!(order.len(), 10);
        assert_eq!(order.iter().filter(|&&t| t == 1).count(), 3);
    }

    #[test]
    fn ids_are_unique() {
        let fleet = mixed_fleet(1, 30);
        let mut ids: Vec<VehicleId> = fleet.store.ids.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn timer_offsets_within_delay() {
        let fleet = mixed_fleet(3, 30);
        for (i, m) in fleet.motions.iter().enumerate() {
            let delay = fleet.store.specs[i].params.reaction_delay;
            assert!(m.reaction_timer >= 0.0 && m.reaction_timer < delay);
        }
    }

    #[test]
    fn permeability_counts_automated_weight() {
        let mix = vec![(presets::human(), 0.6), (presets::intelligent_acc(), 0.4)];
        assert_approx_eq!(permeability(&mix), 0.4, 1e-12);
        assert_eq!(permeability(&[]), 0.0);
    }

    #[test]
    fn fleet_keeps_proportion_map() {
        let fleet = mixed_fleet(4, 10);
        let names: Vec<&str> = fleet.templates().iter().map(|(spec, _)| spec.name.as_str()).collect();
        assert_eq!(names, vec!["HDC", "IDC", "SDC"]);
        assert_eq!(fleet.templates()[1].1, 0.3);
        assert_approx_eq!(permeability(fleet.templates()), 0.5, 1e-12);
    }

    #[test]
    fn density_sizing() {
        assert_approx_eq!(road_length_for_density(50, 25.0).unwrap(), 2_000.0, 1e-9);
        assert!(road_length_for_density(50, 0.0).is_err());
    }
}

// ── Topology and placement ────────────────────────────────────────────────────

#[cfg(test)]
mod topology {
    use super::*;

    #[test]
    fn ring_closes_for_all_sizes() {
        for n in 2..=12 {
            let fleet = FleetBuilder::new(test_config(1), 1_000.0)
                .vehicle_count(n)
                .placement(Placement::Uniform)
                .template(idm_car(), 1.0)
                .build()
                .unwrap();
            let store = &fleet.store;

            let mut slot = 0;
            for step in 1..=n {
                slot = store.successor(slot);
                assert_eq!(slot == 0, step == n, "n={n} step={step}");
            }

            let mut leaders: Vec<usize> = (0..n).map(|i| store.predecessor(i)).collect();
            leaders.sort();
            leaders.dedup();
            assert_eq!(leaders.len(), n);
        }
    }

    #[test]
    fn packed_spacing_is_standstill_gap() {
        let fleet = FleetBuilder::new(test_config(1), 500.0)
            .vehicle_count(10)
            .placement(Placement::Packed)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        for i in 0..9 {
            assert_approx_eq!(fleet.store.relative[i].spacing, 1.0, 1e-9);
        }
        // Seam: 500 - 9 * 5.5 - 4.5.
        assert_approx_eq!(fleet.store.relative[9].spacing, 446.0, 1e-9);
    }

    #[test]
    fn uniform_spacing_is_equal() {
        let fleet = FleetBuilder::new(test_config(1), 500.0)
            .vehicle_count(10)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        for rel in &fleet.store.relative {
            assert_approx_eq!(rel.spacing, 45.5, 1e-9);
        }
    }

    #[test]
    fn random_placement_fills_ring() {
        let build = || {
            FleetBuilder::new(test_config(1), 300.0)
                .vehicle_count(12)
                .placement(Placement::Random)
                .template(idm_car(), 1.0)
                .build()
                .unwrap()
        };
        let fleet = build();
        let mut total = 0.0;
        for (i, rel) in fleet.store.relative.iter().enumerate() {
            assert!(rel.spacing >= 1.0 - 1e-9, "slot {i} spacing {}", rel.spacing);
            total += rel.spacing + 4.5;
        }
        assert_approx_eq!(total, 300.0, 1e-9);

        let again = build();
        assert_eq!(fleet.store.committed, again.store.committed);
    }
}

// ── Dynamics ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamics {
    use super::*;

    #[test]
    fn speed_and_acceleration_contained() {
        struct Bounds;
        impl FleetObserver for Bounds {
            fn on_snapshot(&mut self, _tick: Tick, rows: &[SnapshotRow]) {
                for r in rows {
                    assert!((0.0..=presets::MAX_SPEED).contains(&r.speed), "{r:?}");
                    assert!((-2.0..=1.0).contains(&r.acceleration), "{r:?}");
                }
            }
        }
        let mut fleet = mixed_fleet(11, 40);
        fleet.run(&mut Bounds);
    }

    #[test]
    fn display_permutation_leaves_trajectories_unchanged() {
        let mut a = mixed_fleet(9, 20);
        let mut b = mixed_fleet(9, 20);
        b.reorder_display((0..20).rev().collect()).unwrap();

        let mut ra = Recorder::default();
        let mut rb = Recorder::default();
        a.run_ticks(500, &mut ra);
        b.run_ticks(500, &mut rb);

        assert_eq!(ra.snapshots.len(), rb.snapshots.len());
        for ((_, rows_a), (_, rows_b)) in ra.snapshots.iter().zip(&rb.snapshots) {
            let by_id: HashMap<VehicleId, &SnapshotRow> = rows_b.iter().map(|r| (r.id, r)).collect();
            for row in rows_a {
                let other = by_id[&row.id];
                assert_eq!(row.position, other.position);
                assert_eq!(row.speed, other.speed);
                assert_eq!(row.spacing, other.spacing);
            }
            assert_eq!(rows_a[0].id, rows_b[19].id);
            assert_eq!(rows_b[0].index, 1);
        }
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = mixed_fleet(21, 15);
        let mut b = mixed_fleet(21, 15);
        a.run(&mut NoopObserver);
        b.run(&mut NoopObserver);
        assert_eq!(a.store.committed, b.store.committed);
    }

    #[test]
    fn idm_ring_settles_without_collapse() {
        struct Watch {
            min_spacing: f64,
        }
        impl FleetObserver for Watch {
            fn on_snapshot(&mut self, _tick: Tick, rows: &[SnapshotRow]) {
                for r in rows {
                    self.min_spacing = self.min_spacing.min(r.spacing);
                }
            }
        }

        let mut config = test_config(1_000);
        config.output_interval_ticks = 1;
        let mut fleet = FleetBuilder::new(config, 500.0)
            .vehicle_count(10)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        let mut watch = Watch { min_spacing: f64::INFINITY };
        fleet.run(&mut watch);

        assert!(watch.min_spacing >= 0.0);
        let mean = fleet.mean_speed();
        assert!(mean > 0.0 && mean < 30.0, "mean speed {mean}");
        let var = fleet.store.committed.iter().map(|k| (k.speed - mean).powi(2)).sum::<f64>() / 10.0;
        assert!(var < 1e-6, "variance {var}");
        assert_approx_eq!(fleet.time(), 10.0, 1e-9);
    }

    #[test]
    fn step_advances_clock_and_state() {
        let mut fleet = FleetBuilder::new(test_config(10), 500.0)
            .vehicle_count(5)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        fleet.step();
        assert_eq!(fleet.clock.current_tick, Tick(1));
        for k in &fleet.store.committed {
            assert_approx_eq!(k.time, 0.01, 1e-12);
            assert!(k.speed > 0.0);
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[test]
    fn snapshots_initial_then_every_interval() {
        let mut config = test_config(10);
        config.output_interval_ticks = 5;
        let mut fleet = FleetBuilder::new(config, 500.0)
            .vehicle_count(4)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        fleet.run(&mut rec);

        let ticks: Vec<Tick> = rec.snapshots.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(5), Tick(10)]);
        assert_eq!(rec.starts, 10);
        assert_eq!(rec.ends, 10);
        assert_eq!(rec.finished, Some(Tick(10)));

        let (_, rows) = &rec.snapshots[0];
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(rows[0].time, 0.0);
        assert_eq!(rows[0].class_code(), 10);
    }

    #[test]
    fn zero_interval_reports_only_initial_state() {
        let mut config = test_config(20);
        config.output_interval_ticks = 0;
        let mut fleet = FleetBuilder::new(config, 500.0)
            .vehicle_count(3)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        fleet.run(&mut rec);
        assert_eq!(rec.snapshots.len(), 1);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut fleet = FleetBuilder::new(test_config(5), 500.0)
            .vehicle_count(3)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        fleet.run_ticks(20, &mut rec);
        assert_eq!(rec.ends, 20);
        assert_eq!(rec.snapshots.len(), 2);
        assert!(rec.finished.is_none());
    }

    #[test]
    fn pair_forwards_to_both() {
        let mut fleet = FleetBuilder::new(test_config(10), 500.0)
            .vehicle_count(3)
            .placement(Placement::Uniform)
            .template(idm_car(), 1.0)
            .build()
            .unwrap();
        let mut pair = (Recorder::default(), Recorder::default());
        fleet.run(&mut pair);
        assert_eq!(pair.0.snapshots.len(), 2);
        assert_eq!(pair.1.snapshots.len(), 2);
        assert_eq!(pair.1.finished, Some(Tick(10)));
    }
}
