//! Linear gap controllers from the California PATH ACC/CACC field tests.
//!
//! Both regulate the gap error `e = s - s0 - T*v`.  CACC adds a feed-forward
//! term on the leader's acceleration, which it receives over the radio link
//! rather than by differentiating its own sensor data.  The received value is
//! treated like any other measurement and carries observation noise.

use rt_core::VehicleRng;

use crate::{ControlLaw, LawContext, Observation};

/// Gap error with a noisy spacing reading.
fn gap_error(obs: &Observation, rng: &mut VehicleRng) -> f64 {
    let p = &obs.params;
    obs.relative.spacing * rng.noise(p.observation_error)
        - p.stopping_distance
        - p.time_headway * obs.state.speed
}

/// `a = k1*e + k2*dv`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathAcc {
    pub k1: f64,
    pub k2: f64,
}

impl Default for PathAcc {
    fn default() -> Self {
        Self { k1: 0.23, k2: 0.07 }
    }
}

impl ControlLaw for PathAcc {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        let obs = &ctx.obs;
        let e = gap_error(obs, rng);
        let dv = obs.relative.speed_diff * rng.noise(obs.params.observation_error);
        self.k1 * e + self.k2 * dv
    }

    fn name(&self) -> &'static str {
        "path-acc"
    }
}

/// `a = k1*a_leader + k2*e + k3*dv`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathCacc {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
}

impl Default for PathCacc {
    fn default() -> Self {
        Self { k1: 1.1, k2: 0.23, k3: 0.07 }
    }
}

impl ControlLaw for PathCacc {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        let obs = &ctx.obs;
        let sigma = obs.params.observation_error;
        let e = gap_error(obs, rng);
        let leader_accel = obs.leader.acceleration * rng.noise(sigma);
        let dv = obs.relative.speed_diff * rng.noise(sigma);
        self.k1 * leader_accel + self.k2 * e + self.k3 * dv
    }

    fn name(&self) -> &'static str {
        "path-cacc"
    }
}
