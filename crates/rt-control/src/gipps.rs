//! Gipps safe-speed model.
//!
//! Two speed ceilings are computed for the end of one reaction interval `tau`:
//!
//! - `v1`, a free-road profile that approaches `vmax` at the comfortable
//!   acceleration;
//! - `v2`, the largest speed from which the vehicle can still stop behind a
//!   leader that brakes at its own maximum deceleration.
//!
//! The law steers towards `min(v1, v2)` over `tau`.  The braking-only variant
//! drops `v1` and is what [`SafetyFloor`][crate::SafetyFloor] uses as its floor.

use rt_core::VehicleRng;

use crate::{ControlLaw, LawContext};

/// Lower bound on the reaction interval, so a zero-delay vehicle still
/// yields a finite acceleration.
pub const MIN_REACTION_TIME: f64 = 1e-3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Ceiling {
    #[default]
    Full,
    BrakingOnly,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gipps {
    ceiling: Ceiling,
}

impl Gipps {
    /// Both ceilings.
    pub fn new() -> Self {
        Self { ceiling: Ceiling::Full }
    }

    /// The collision-avoidance ceiling `v2` alone.
    pub fn braking() -> Self {
        Self { ceiling: Ceiling::BrakingOnly }
    }

    pub fn is_braking_only(&self) -> bool {
        self.ceiling == Ceiling::BrakingOnly
    }
}

impl ControlLaw for Gipps {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        let obs = &ctx.obs;
        let p = &obs.params;
        let tau = p.reaction_delay.max(MIN_REACTION_TIME);
        let brake = p.accel.min;
        let v = obs.state.speed;

        let spacing = obs.relative.spacing * rng.noise(p.observation_error);
        let leader_speed = obs.leader.speed * rng.noise(p.observation_error);

        let e = (brake * tau).powi(2)
            - brake
                * (2.0 * (spacing - p.stopping_distance)
                    - v * tau
                    - leader_speed.powi(2) / obs.leader.min_acceleration);
        let v2 = brake * tau + e.max(0.0).sqrt();

        let target = match self.ceiling {
            Ceiling::BrakingOnly => v2,
            Ceiling::Full => {
                let ratio = v / p.speed.max;
                let v1 = v + 2.5 * p.accel.max * (1.0 - ratio) * (0.0025 + ratio).sqrt();
                v1.min(v2)
            }
        };
        (target - v) / tau
    }

    fn name(&self) -> &'static str {
        match self.ceiling {
            Ceiling::Full => "gipps",
            Ceiling::BrakingOnly => "gipps-braking",
        }
    }
}
