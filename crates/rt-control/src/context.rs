//! What a control law is allowed to see.

use rt_core::{Kinematics, RelativeState, VehicleParams};

/// Read-only view of the committed ring, used by laws that look further
/// ahead than their immediate leader.
///
/// Indices are ring slots.  `predecessor(i)` is the vehicle `i` follows,
/// `successor(i)` the vehicle following `i`.  Implementations only ever
/// expose state committed at the end of the previous tick.
pub trait RingView: Sync {
    /// Number of vehicles on the ring.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn predecessor(&self, index: usize) -> usize;

    fn successor(&self, index: usize) -> usize;

    /// Gap vector from vehicle `index` to its predecessor.
    fn relative(&self, index: usize) -> RelativeState;

    /// `true` if vehicle `index` is driven by a [`PlatoonLaw`][crate::PlatoonLaw].
    fn is_platoon(&self, index: usize) -> bool;
}

/// The leader quantities a follower may read directly.
///
/// `acceleration` is the communicated value CACC relies on; human and ACC
/// laws only use `speed` and `min_acceleration`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LeaderState {
    pub speed: f64,
    pub acceleration: f64,
    /// The leader's maximum deceleration (negative).
    pub min_acceleration: f64,
}

/// A self-contained copy of everything one vehicle knows this tick.
///
/// This is a plain value: a law that wants to reason about a hypothetical
/// situation (different gap, shorter headway) edits its own copy and the
/// vehicle it was built from is unaffected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation {
    pub params: VehicleParams,
    pub state: Kinematics,
    pub relative: RelativeState,
    pub leader: LeaderState,
}

/// Argument to [`ControlLaw::acceleration`][crate::ControlLaw::acceleration].
#[derive(Copy, Clone)]
pub struct LawContext<'a> {
    /// Ring slot of the calling vehicle.
    pub index: usize,
    pub obs: Observation,
    pub ring: &'a dyn RingView,
}

impl<'a> LawContext<'a> {
    #[inline]
    pub fn new(index: usize, obs: Observation, ring: &'a dyn RingView) -> Self {
        Self { index, obs, ring }
    }

    /// The same vehicle and ring with a substituted observation.
    #[inline]
    pub fn with_observation(&self, obs: Observation) -> Self {
        Self { obs, ..*self }
    }
}
