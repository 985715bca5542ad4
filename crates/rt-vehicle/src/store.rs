//! Core vehicle storage: `VehicleStore` (SoA data) and `VehicleRngs`.
//!
//! # Why two structs?
//!
//! The update phase needs `&mut` access to each vehicle's RNG while every
//! law reads the committed state of *other* vehicles through `&VehicleStore`.
//! Keeping the RNGs outside the store lets both borrows coexist:
//!
//! ```ignore
//! let store: &VehicleStore = &fleet.store;
//! motions.par_iter_mut()
//!     .zip(rngs.inner.par_iter_mut())
//!     .enumerate()
//!     .for_each(|(i, (m, rng))| m.update(i, store, rng, step));
//! ```

use rt_control::{LawContext, LeaderState, Observation, RingView};
use rt_core::{Kinematics, RelativeState, VehicleId, VehicleRng};

use crate::{Motion, VehicleSpec};

// ── VehicleRngs ───────────────────────────────────────────────────────────────

/// Per-vehicle noise generators, indexed by ring slot.
pub struct VehicleRngs {
    pub inner: Vec<VehicleRng>,
}

impl VehicleRngs {
    pub(crate) fn new(ids: &[VehicleId], global_seed: u64) -> Self {
        let inner = ids.iter().map(|&id| VehicleRng::new(global_seed, id)).collect();
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── VehicleStore ──────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every vehicle on the ring.
///
/// The index into each `Vec` is the vehicle's *ring slot*: slot `i` follows
/// slot `predecessor[i]` and is followed by slot `successor[i]`.  Ids are
/// independent of slots and stay attached to the vehicle for reporting.
pub struct VehicleStore {
    /// Number of vehicles.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Circumference of the ring.
    pub road_length: f64,

    pub ids: Vec<VehicleId>,
    pub specs: Vec<VehicleSpec>,

    // ── Topology ──────────────────────────────────────────────────────────
    /// Slot of the vehicle ahead.
    pub predecessor: Vec<usize>,
    /// Slot of the vehicle behind.
    pub successor: Vec<usize>,

    // ── Committed state ───────────────────────────────────────────────────
    pub committed: Vec<Kinematics>,
    /// Gap to the predecessor, derived from `committed`.
    pub relative: Vec<RelativeState>,

    /// Cached `specs[i].is_platoon()`.
    platoon: Vec<bool>,
}

impl VehicleStore {
    pub(crate) fn new(road_length: f64, ids: Vec<VehicleId>, specs: Vec<VehicleSpec>, committed: Vec<Kinematics>) -> Self {
        let count = ids.len();
        let platoon = specs.iter().map(VehicleSpec::is_platoon).collect();
        let mut store = Self {
            count,
            road_length,
            ids,
            specs,
            predecessor: (0..count).map(|i| (i + 1) % count).collect(),
            successor: (0..count).map(|i| (i + count - 1) % count).collect(),
            committed,
            relative: vec![RelativeState::default(); count],
            platoon,
        };
        store.recompute_all();
        store
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Seam correction for slot `i`: the follower of slot 0 sees its leader
    /// one lap ahead.
    #[inline]
    pub fn correction(&self, i: usize) -> f64 {
        if self.predecessor[i] == 0 { self.road_length } else { 0.0 }
    }

    // ── Law inputs ────────────────────────────────────────────────────────

    pub fn observation(&self, i: usize) -> Observation {
        let lead = self.predecessor[i];
        let leader = &self.committed[lead];
        Observation {
            params:   self.specs[i].params,
            state:    self.committed[i],
            relative: self.relative[i],
            leader:   LeaderState {
                speed:            leader.speed,
                acceleration:     leader.acceleration,
                min_acceleration: self.specs[lead].params.accel.min,
            },
        }
    }

    pub fn context(&self, i: usize) -> LawContext<'_> {
        LawContext::new(i, self.observation(i), self)
    }

    // ── Phases 2 and 3 ────────────────────────────────────────────────────

    /// Copy every tentative state into the committed buffer.
    pub fn commit(&mut self, motions: &[Motion]) {
        debug_assert_eq!(motions.len(), self.count);
        for (committed, motion) in self.committed.iter_mut().zip(motions) {
            *committed = motion.tentative;
        }
    }

    /// Gap vector from slot `i` to its predecessor, from committed state.
    pub fn relative_for(&self, i: usize) -> RelativeState {
        let lead = self.predecessor[i];
        RelativeState::between(
            &self.committed[i],
            &self.committed[lead],
            self.specs[lead].params.length,
            self.correction(i),
        )
    }

    pub fn recompute_relative(&mut self, i: usize) {
        self.relative[i] = self.relative_for(i);
    }

    pub fn recompute_all(&mut self) {
        for i in 0..self.count {
            self.recompute_relative(i);
        }
    }

    /// Minimum spacing over the ring; negative means some bumpers overlap.
    pub fn min_spacing(&self) -> f64 {
        self.relative.iter().map(|r| r.spacing).fold(f64::INFINITY, f64::min)
    }
}

impl RingView for VehicleStore {
    fn len(&self) -> usize {
        self.count
    }

    fn predecessor(&self, index: usize) -> usize {
        self.predecessor[index]
    }

    fn successor(&self, index: usize) -> usize {
        self.successor[index]
    }

    fn relative(&self, index: usize) -> RelativeState {
        self.relative[index]
    }

    fn is_platoon(&self, index: usize) -> bool {
        self.platoon[index]
    }
}
