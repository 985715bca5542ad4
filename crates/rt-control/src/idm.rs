//! Intelligent driver model.

use rt_core::VehicleRng;

use crate::{ControlLaw, LawContext};

/// `a = amax * (1 - |v/vmax|^beta - (s*(v, dv) / s)^2)` with the desired gap
/// `s* = s0 + v*T + v*dv / (2*sqrt(|amax*amin|))`.
///
/// A non-positive gap means the bumpers overlap and the law answers `-inf`;
/// the vehicle pipeline clamps that to full braking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Idm {
    pub beta: f64,
}

impl Default for Idm {
    fn default() -> Self {
        Self { beta: 4.0 }
    }
}

impl Idm {
    pub fn desired_gap(&self, ctx: &LawContext<'_>) -> f64 {
        let obs = &ctx.obs;
        let p = &obs.params;
        let v = obs.state.speed;
        p.stopping_distance
            + v * p.time_headway
            + v * obs.relative.speed_diff * 0.5 / (p.accel.max * p.accel.min).abs().sqrt()
    }
}

impl ControlLaw for Idm {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        let obs = &ctx.obs;
        let p = &obs.params;
        let spacing = obs.relative.spacing;
        if spacing <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let free = (obs.state.speed / p.speed.max).abs().powf(self.beta);
        let interaction = (self.desired_gap(ctx) / spacing * rng.noise(p.observation_error))
            .abs()
            .powi(2);
        p.accel.max.abs() * (1.0 - free - interaction)
    }

    fn name(&self) -> &'static str {
        "idm"
    }
}
