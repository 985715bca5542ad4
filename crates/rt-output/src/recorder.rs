//! `TrajectoryRecorder`: keeps every snapshot row.

use rt_core::{Tick, VehicleId};
use rt_fleet::{FleetObserver, SnapshotRow};

/// Aggregate of one snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickSummary {
    pub tick: Tick,
    pub time: f64,
    pub mean_speed: f64,
    /// Smallest bumper gap on the ring; negative means a collision.
    pub min_spacing: f64,
}

impl TickSummary {
    fn from_rows(tick: Tick, rows: &[SnapshotRow]) -> Self {
        let n = rows.len().max(1) as f64;
        Self {
            tick,
            time: rows.first().map_or(0.0, |r| r.time),
            mean_speed: rows.iter().map(|r| r.speed).sum::<f64>() / n,
            min_spacing: rows.iter().map(|r| r.spacing).fold(f64::INFINITY, f64::min),
        }
    }
}

/// A [`FleetObserver`] that stores the full trajectory dump in memory.
#[derive(Default)]
pub struct TrajectoryRecorder {
    rows: Vec<SnapshotRow>,
    summaries: Vec<TickSummary>,
    finished: Option<Tick>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows in arrival order: snapshot by snapshot, display order within.
    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    pub fn summaries(&self) -> &[TickSummary] {
        &self.summaries
    }

    /// The trajectory of one vehicle, oldest first.
    pub fn vehicle(&self, id: VehicleId) -> impl Iterator<Item = &SnapshotRow> + '_ {
        self.rows.iter().filter(move |r| r.id == id)
    }

    /// Final clock value once the run has ended.
    pub fn finished(&self) -> Option<Tick> {
        self.finished
    }

    pub fn into_rows(self) -> Vec<SnapshotRow> {
        self.rows
    }
}

impl FleetObserver for TrajectoryRecorder {
    fn on_snapshot(&mut self, tick: Tick, rows: &[SnapshotRow]) {
        self.summaries.push(TickSummary::from_rows(tick, rows));
        self.rows.extend_from_slice(rows);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}
