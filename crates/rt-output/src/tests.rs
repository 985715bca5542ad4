//! Unit tests for rt-output.

use assert_approx_eq::assert_approx_eq;
use rt_core::{AutomationClass, Placement, SimConfig, Tick, VehicleId};
use rt_fleet::{FleetBuilder, FleetObserver, SnapshotRow};
use rt_vehicle::presets;

use crate::{FlowStats, StatsObserver, TrajectoryRecorder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn row(time: f64, id: u32, class: AutomationClass, speed: f64) -> SnapshotRow {
    SnapshotRow {
        index:        id as usize + 1,
        time,
        id:           VehicleId(id),
        class,
        position:     0.0,
        speed,
        acceleration: 0.0,
        spacing:      10.0,
        speed_diff:   0.0,
        accel_diff:   0.0,
        headway:      f64::INFINITY,
    }
}

// ── FlowStats ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod flow_stats {
    use super::*;

    #[test]
    fn mean_and_population_std() {
        let mut s = FlowStats::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            s.push(v);
        }
        assert_eq!(s.count(), 8);
        assert_approx_eq!(s.mean(), 5.0, 1e-12);
        assert_approx_eq!(s.std_dev(), 2.0, 1e-12);
        assert_approx_eq!(s.dispersion(10.0), 0.4, 1e-12);
        assert_eq!(s.range(), Some((2.0, 9.0)));
    }

    #[test]
    fn empty_is_zero() {
        let s = FlowStats::new();
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.std_dev(), 0.0);
        assert_eq!(s.range(), None);
    }
}

// ── StatsObserver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_observer {
    use super::*;

    #[test]
    fn skips_warm_up() {
        let mut obs = StatsObserver::new(1.0, 30.0);
        obs.on_snapshot(Tick(50), &[row(0.5, 0, AutomationClass::Human, 100.0)]);
        obs.on_snapshot(Tick(100), &[row(1.0, 0, AutomationClass::Human, 100.0)]);
        obs.on_snapshot(Tick(150), &[row(1.5, 0, AutomationClass::Human, 12.0)]);
        let report = obs.report();
        assert_eq!(report.samples, 1);
        assert_eq!(report.mean_speed, 12.0);
        assert_eq!(report.dispersion, 0.0);
    }

    #[test]
    fn splits_by_class() {
        let mut obs = StatsObserver::new(0.0, 30.0);
        obs.on_snapshot(
            Tick(1),
            &[
                row(1.0, 0, AutomationClass::Intelligent, 20.0),
                row(1.0, 1, AutomationClass::Human, 10.0),
                row(1.0, 2, AutomationClass::Human, 14.0),
            ],
        );
        let classes: Vec<(AutomationClass, f64)> = obs.by_class().map(|(c, s)| (c, s.mean())).collect();
        assert_eq!(classes, vec![(AutomationClass::Human, 12.0), (AutomationClass::Intelligent, 20.0)]);
        assert_approx_eq!(obs.overall().mean(), 44.0 / 3.0, 1e-12);
    }
}

// ── TrajectoryRecorder ────────────────────────────────────────────────────────

#[cfg(test)]
mod recorder {
    use super::*;

    #[test]
    fn records_full_run() {
        let config = SimConfig {
            step_secs:             0.1,
            total_ticks:           50,
            seed:                  3,
            output_interval_ticks: 10,
        };
        let mut fleet = FleetBuilder::new(config, 600.0)
            .vehicle_count(6)
            .placement(Placement::Uniform)
            .template(presets::human(), 1.0)
            .template(presets::intelligent_cacc(), 1.0)
            .build()
            .unwrap();

        let mut obs = (TrajectoryRecorder::new(), StatsObserver::new(2.5, presets::MAX_SPEED));
        fleet.run(&mut obs);
        let (rec, stats) = obs;

        // Initial snapshot plus one every 10 ticks.
        assert_eq!(rec.summaries().len(), 6);
        assert_eq!(rec.rows().len(), 36);
        assert_eq!(rec.finished(), Some(Tick(50)));
        assert_eq!(rec.vehicle(fleet.store.ids[0]).count(), 6);
        assert!(rec.summaries().iter().all(|s| s.min_spacing >= 0.0));
        assert_approx_eq!(rec.summaries()[5].time, 5.0, 1e-9);

        // Samples at t = 3, 4, 5 s.
        assert_eq!(stats.report().samples, 18);
        assert_eq!(rec.into_rows().len(), 36);
    }
}
