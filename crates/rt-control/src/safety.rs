//! Collision-avoidance floor for an arbitrary law.

use rt_core::VehicleRng;

use crate::{ControlLaw, Gipps, LawContext};

/// Combine a primary command with a floor command.
///
/// When neither wants to brake the primary decision stands, otherwise the
/// harder of the two braking commands wins.
#[inline]
pub fn floor(primary: f64, guard: f64) -> f64 {
    let m = primary.min(guard).min(0.0);
    if m == 0.0 { primary } else { m }
}

/// Wraps `P` and never brakes less than the Gipps braking ceiling asks for.
#[derive(Clone, Debug)]
pub struct SafetyFloor<P> {
    primary: P,
    guard: Gipps,
}

impl<P: ControlLaw> SafetyFloor<P> {
    pub fn new(primary: P) -> Self {
        Self { primary, guard: Gipps::braking() }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }
}

impl<P: ControlLaw> ControlLaw for SafetyFloor<P> {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        let a1 = self.primary.acceleration(ctx, rng);
        let a2 = self.guard.acceleration(ctx, rng);
        floor(a1, a2)
    }

    fn name(&self) -> &'static str {
        "safety-floor"
    }

    fn is_platoon(&self) -> bool {
        self.primary.is_platoon()
    }
}
