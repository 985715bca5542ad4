//! `rt-output`: consumers of the fleet's per-tick snapshot.
//!
//! Both observers implement `rt_fleet::FleetObserver` and keep everything in
//! memory; writing files or plots is left to the caller.
//!
//! | Type                   | Collects                                               |
//! |------------------------|--------------------------------------------------------|
//! | [`TrajectoryRecorder`] | every snapshot row plus a per-snapshot [`TickSummary`] |
//! | [`StatsObserver`]      | speed statistics after a warm-up time, overall and per class |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rt_output::{StatsObserver, TrajectoryRecorder};
//!
//! let mut obs = (TrajectoryRecorder::new(), StatsObserver::new(300.0, presets::MAX_SPEED));
//! fleet.run(&mut obs);
//! let report = obs.1.report();
//! println!("mean {:.2} m/s, dispersion {:.3}", report.mean_speed, report.dispersion);
//! ```

pub mod recorder;
pub mod stats;

#[cfg(test)]
mod tests;

pub use recorder::{TickSummary, TrajectoryRecorder};
pub use stats::{FlowReport, FlowStats, StatsObserver};
