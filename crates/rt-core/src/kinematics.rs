//! Dynamic vehicle state and the follower/leader relative state.
//!
//! `location` is the unbounded path length travelled since placement;
//! `position` is the same point folded onto the ring (`location mod L`).
//! Gaps are always computed from `location`, never from `position`, so the
//! only discontinuity is the single seam correction applied to the vehicle
//! that follows the ring's first vehicle.

/// Committed (or tentative) motion state of one vehicle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    /// Simulated seconds since the fleet was placed.
    pub time: f64,
    /// Unbounded front-bumper path length.
    pub location: f64,
    /// `location` folded into `[0, road_length)`.
    pub position: f64,
    pub speed: f64,
    pub acceleration: f64,
    /// Total distance driven.
    pub odometer: f64,
}

impl Kinematics {
    /// A vehicle standing (or moving at `speed`) at `location` at time 0.
    pub fn placed(location: f64, speed: f64, acceleration: f64, road_length: f64) -> Self {
        Self {
            time: 0.0,
            location,
            position: location.rem_euclid(road_length),
            speed,
            acceleration,
            odometer: 0.0,
        }
    }
}

/// What a follower knows about the gap to its leader.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelativeState {
    /// Follower front bumper → leader rear bumper.  Negative on overlap.
    pub spacing: f64,
    /// Leader speed minus follower speed.
    pub speed_diff: f64,
    /// Leader acceleration minus follower acceleration.
    pub accel_diff: f64,
    /// Time until the current closing rate eats the spacing; see [`headway`].
    pub headway: f64,
}

impl RelativeState {
    /// Relative state of `follower` behind `leader`.
    ///
    /// `correction` is `road_length` for the one follower whose leader sits
    /// across the ring seam and `0` for everyone else.
    pub fn between(
        follower:      &Kinematics,
        leader:        &Kinematics,
        leader_length: f64,
        correction:    f64,
    ) -> Self {
        let spacing = leader.location - leader_length - follower.location + correction;
        let speed_diff = leader.speed - follower.speed;
        Self {
            spacing,
            speed_diff,
            accel_diff: leader.acceleration - follower.acceleration,
            headway: headway(spacing, speed_diff),
        }
    }

    /// Component-wise sum of the gap vectors (spacing, Δv, Δa).
    ///
    /// Headway is not additive and is left at zero.
    #[inline]
    pub fn add_gap(self, other: RelativeState) -> Self {
        Self {
            spacing:    self.spacing + other.spacing,
            speed_diff: self.speed_diff + other.speed_diff,
            accel_diff: self.accel_diff + other.accel_diff,
            headway:    0.0,
        }
    }
}

/// Headway from a spacing and a speed difference (leader − follower).
///
/// - overlap (`spacing < 0`) is always `-inf`;
/// - no relative motion gives `sign(spacing) * inf`, and `0` when the
///   bumpers touch exactly;
/// - an opening gap (negative raw time) reports `+inf`, including touching
///   bumpers that are moving apart.
pub fn headway(spacing: f64, speed_diff: f64) -> f64 {
    if spacing < 0.0 {
        return f64::NEG_INFINITY;
    }
    if speed_diff == 0.0 {
        return if spacing == 0.0 { 0.0 } else { f64::INFINITY };
    }
    if speed_diff > 0.0 {
        return f64::INFINITY;
    }
    -spacing / speed_diff
}
