//! The per-vehicle record emitted at every sampled tick.

use rt_core::{AutomationClass, VehicleId};

/// State of one vehicle at a sampled tick.
///
/// This flat record is everything downstream consumers (recorders,
/// statistics, plotting) get to see.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapshotRow {
    /// 1-based position in the fleet's display order.
    pub index: usize,
    /// Simulated seconds.
    pub time: f64,
    pub id: VehicleId,
    pub class: AutomationClass,
    /// Front bumper folded onto the ring.
    pub position: f64,
    pub speed: f64,
    pub acceleration: f64,
    pub spacing: f64,
    pub speed_diff: f64,
    pub accel_diff: f64,
    pub headway: f64,
}

impl SnapshotRow {
    /// Numeric class tag (`0`, `10`, `20`, `30`).
    pub fn class_code(&self) -> u8 {
        self.class.code()
    }
}
