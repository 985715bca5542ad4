//! Full velocity difference model.

use rt_core::VehicleRng;

use crate::{ControlLaw, LawContext};

/// `a = alpha * (V(s) - v) + lambda * dv` with the tanh optimal-velocity
/// function `V(s) = vmax/2 * (tanh(s/b - beta) - tanh(-beta))`.
///
/// Reads the gap without observation noise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fvd {
    pub b: f64,
    pub alpha: f64,
    pub beta: f64,
    pub lambda: f64,
}

impl Default for Fvd {
    fn default() -> Self {
        Self { b: 28.0, alpha: 0.16, beta: 1.1, lambda: 0.5 }
    }
}

impl Fvd {
    /// Equilibrium speed for a bumper gap of `spacing`.
    pub fn optimal_speed(&self, spacing: f64, max_speed: f64) -> f64 {
        0.5 * max_speed * ((spacing / self.b - self.beta).tanh() - (-self.beta).tanh())
    }
}

impl ControlLaw for Fvd {
    fn acceleration(&self, ctx: &LawContext<'_>, _rng: &mut VehicleRng) -> f64 {
        let obs = &ctx.obs;
        let target = self.optimal_speed(obs.relative.spacing, obs.params.speed.max);
        self.alpha * (target - obs.state.speed) + self.lambda * obs.relative.speed_diff
    }

    fn name(&self) -> &'static str {
        "fvd"
    }
}
