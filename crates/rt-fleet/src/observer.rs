//! Fleet observer trait for progress reporting and data collection.

use rt_core::Tick;

use crate::SnapshotRow;

/// Callbacks invoked by [`Fleet::run`][crate::Fleet::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust
/// use rt_core::Tick;
/// use rt_fleet::FleetObserver;
///
/// struct ProgressPrinter { interval: u64 }
///
/// impl FleetObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick} done");
///         }
///     }
/// }
/// ```
pub trait FleetObserver {
    /// Called before the tick starting at `tick` is processed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once all three phases of the tick starting at `tick` are done.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called with one row per vehicle in display order: once for the
    /// initial state and then every `output_interval_ticks` ticks.
    ///
    /// `tick` is the clock value the rows describe.
    fn on_snapshot(&mut self, _tick: Tick, _rows: &[SnapshotRow]) {}

    /// Called once after the final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}

/// Drive two observers from one run, first `A` then `B` at every hook.
impl<A: FleetObserver, B: FleetObserver> FleetObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick) {
        self.0.on_tick_end(tick);
        self.1.on_tick_end(tick);
    }

    fn on_snapshot(&mut self, tick: Tick, rows: &[SnapshotRow]) {
        self.0.on_snapshot(tick, rows);
        self.1.on_snapshot(tick, rows);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}
