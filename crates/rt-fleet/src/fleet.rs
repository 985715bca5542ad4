//! The `Fleet` struct and its tick loop.

use rt_core::{SimClock, SimConfig, Tick};
use rt_vehicle::{Motion, VehicleRngs, VehicleSpec, VehicleStore};

use crate::{FleetError, FleetObserver, FleetResult, SnapshotRow};

/// A ring of vehicles advanced in lock step.
///
/// Every [`step`](Self::step) runs three phases, each finishing for all
/// vehicles before the next begins:
///
/// 1. **Update** (parallel with the `parallel` feature): every vehicle
///    computes a tentative state from committed state only.
/// 2. **Commit**: tentative state becomes committed state.
/// 3. **Relative** (parallel with the `parallel` feature): every vehicle
///    recomputes its gap to its leader.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder].
pub struct Fleet {
    pub config: SimConfig,

    pub clock: SimClock,

    /// Committed state and ring topology, indexed by ring slot.
    pub store: VehicleStore,

    /// Per-vehicle RNGs, separated for the split-borrow pattern.
    pub rngs: VehicleRngs,

    /// Tentative state and reaction timers, indexed by ring slot.
    pub motions: Vec<Motion>,

    /// Ring slots in reporting order.
    display: Vec<usize>,

    /// The `(template, weight)` mix the fleet was synthesised from.
    templates: Vec<(VehicleSpec, f64)>,
}

impl Fleet {
    pub(crate) fn new(
        config:    SimConfig,
        store:     VehicleStore,
        rngs:      VehicleRngs,
        motions:   Vec<Motion>,
        templates: Vec<(VehicleSpec, f64)>,
    ) -> Self {
        let display = (0..store.count).collect();
        Self {
            clock: config.make_clock(),
            config,
            store,
            rngs,
            motions,
            display,
            templates,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.store.count
    }

    pub fn is_empty(&self) -> bool {
        self.store.count == 0
    }

    /// The proportion map given to the builder, in insertion order.
    pub fn templates(&self) -> &[(VehicleSpec, f64)] {
        &self.templates
    }

    /// Simulated seconds since placement.
    pub fn time(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    /// Run until `config.end_tick()`.
    ///
    /// A run starting from tick 0 first reports the initial placement as a
    /// snapshot.  After that a snapshot follows every tick whose end lands on
    /// a multiple of `config.output_interval_ticks`.
    pub fn run<O: FleetObserver>(&mut self, observer: &mut O) {
        let mut rows = Vec::with_capacity(self.len());
        if self.clock.current_tick == Tick::ZERO {
            self.emit_snapshot(observer, &mut rows);
        }
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_step(observer, &mut rows);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: FleetObserver>(&mut self, n: u64, observer: &mut O) {
        let mut rows = Vec::with_capacity(self.len());
        for _ in 0..n {
            self.observed_step(observer, &mut rows);
        }
    }

    /// Advance every vehicle by one step.
    pub fn step(&mut self) {
        self.update_phase();
        self.store.commit(&self.motions);
        self.relative_phase();
        self.clock.advance();
        log::trace!("{}: mean speed {:.3}", self.clock, self.mean_speed());
    }

    /// One row per vehicle in display order.
    pub fn snapshot(&self) -> Vec<SnapshotRow> {
        let mut rows = Vec::with_capacity(self.len());
        self.snapshot_into(&mut rows);
        rows
    }

    /// Like [`snapshot`](Self::snapshot), reusing `rows`' allocation.
    pub fn snapshot_into(&self, rows: &mut Vec<SnapshotRow>) {
        rows.clear();
        rows.extend(self.display.iter().enumerate().map(|(n, &slot)| {
            let state = &self.store.committed[slot];
            let rel = &self.store.relative[slot];
            SnapshotRow {
                index:        n + 1,
                time:         state.time,
                id:           self.store.ids[slot],
                class:        self.store.specs[slot].class,
                position:     state.position,
                speed:        state.speed,
                acceleration: state.acceleration,
                spacing:      rel.spacing,
                speed_diff:   rel.speed_diff,
                accel_diff:   rel.accel_diff,
                headway:      rel.headway,
            }
        }));
    }

    pub fn display_order(&self) -> &[usize] {
        &self.display
    }

    /// Report vehicles in a different order.
    ///
    /// `order` must be a permutation of the ring slots.  Only snapshot
    /// labelling changes; linkage and dynamics are untouched.
    pub fn reorder_display(&mut self, order: Vec<usize>) -> FleetResult<()> {
        let n = self.len();
        let mut seen = vec![false; n];
        if order.len() != n {
            return Err(FleetError::Config(format!(
                "display order has {} entries for {n} vehicles",
                order.len()
            )));
        }
        for &slot in &order {
            if slot >= n || std::mem::replace(&mut seen[slot], true) {
                return Err(FleetError::Config(format!("display order is not a permutation (slot {slot})")));
            }
        }
        self.display = order;
        Ok(())
    }

    pub fn mean_speed(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.store.committed.iter().map(|k| k.speed).sum::<f64>() / self.len() as f64
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn observed_step<O: FleetObserver>(&mut self, observer: &mut O, rows: &mut Vec<SnapshotRow>) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.step();
        observer.on_tick_end(now);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && self.clock.current_tick.0.is_multiple_of(interval) {
            self.emit_snapshot(observer, rows);
        }
    }

    fn emit_snapshot<O: FleetObserver>(&self, observer: &mut O, rows: &mut Vec<SnapshotRow>) {
        self.snapshot_into(rows);
        observer.on_snapshot(self.clock.current_tick, rows);
    }

    /// Phase 1: tentative states from committed state.
    ///
    /// With the `parallel` feature, vehicles are spread over Rayon's pool.
    /// Each closure owns one `Motion` and one RNG and only reads the store,
    /// so the result does not depend on scheduling.
    fn update_phase(&mut self) {
        let step = self.clock.step_secs;
        let store = &self.store;

        #[cfg(not(feature = "parallel"))]
        {
            for (i, (motion, rng)) in self.motions.iter_mut().zip(self.rngs.inner.iter_mut()).enumerate() {
                motion.update(i, store, rng, step);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.motions
                .par_iter_mut()
                .zip(self.rngs.inner.par_iter_mut())
                .enumerate()
                .for_each(|(i, (motion, rng))| motion.update(i, store, rng, step));
        }
    }

    /// Phase 3: gaps from the freshly committed state.
    fn relative_phase(&mut self) {
        #[cfg(not(feature = "parallel"))]
        {
            self.store.recompute_all();
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let store = &self.store;
            let relative = (0..store.count)
                .into_par_iter()
                .map(|i| store.relative_for(i))
                .collect();
            self.store.relative = relative;
        }
    }
}
