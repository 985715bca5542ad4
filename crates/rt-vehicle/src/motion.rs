//! The per-vehicle update pipeline: reaction delay, control law, actuation
//! noise, clamping and constant-acceleration integration.

use rt_core::{Kinematics, VehicleParams, VehicleRng};

use crate::VehicleStore;

/// Remaining reaction time below this counts as elapsed, so a delay that is
/// a whole number of steps does not gain an extra tick from rounding.
const TIMER_EPSILON: f64 = 1e-9;

/// Tentative state of one vehicle plus its reaction timer.
///
/// Lives in a `Vec<Motion>` parallel to the store so the update phase can
/// write here while reading the store.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Motion {
    /// State proposed for the end of the current tick.
    pub tentative: Kinematics,
    /// Seconds until the next fresh control decision.
    pub reaction_timer: f64,
}

impl Motion {
    pub fn new(committed: Kinematics, reaction_timer: f64) -> Self {
        Self { tentative: committed, reaction_timer }
    }

    /// Phase 1 for ring slot `i`.  Reads only committed state.
    pub fn update(&mut self, i: usize, store: &VehicleStore, rng: &mut VehicleRng, step: f64) {
        let spec = &store.specs[i];
        let params = &spec.params;
        let state = store.committed[i];

        let commanded = if self.reaction_timer > TIMER_EPSILON {
            self.reaction_timer = (self.reaction_timer - step).max(0.0);
            state.acceleration
        } else {
            self.reaction_timer = params.reaction_delay;
            let raw = spec.law.acceleration(&store.context(i), rng);
            clamp_acceleration(raw, state.speed, params) * rng.noise(params.operation_error)
        };

        let accel = clamp_acceleration(commanded, state.speed, params);
        self.tentative = integrate(&state, accel, step, params, store.road_length);
    }
}

/// Bound a commanded acceleration by the vehicle's limits.
///
/// A vehicle already at its minimum speed cannot brake further and one at
/// its maximum speed cannot speed up; both get `0`.  Infinite commands land
/// on the nearest bound.  `NaN` is logged and replaced by `0`.
pub fn clamp_acceleration(accel: f64, speed: f64, params: &VehicleParams) -> f64 {
    if accel.is_nan() {
        log::warn!("control law produced NaN acceleration at speed {speed}; using 0");
        return 0.0;
    }
    if (speed <= params.speed.min && accel < 0.0) || (speed >= params.speed.max && accel > 0.0) {
        return 0.0;
    }
    params.accel.clamp(accel)
}

/// Advance `state` by one step at constant acceleration `accel`.
///
/// Speed is clamped into the speed limits.  Displacement uses the
/// closed-form `(v'^2 - v^2) / 2a`, which stays exact when the clamp cuts
/// the acceleration short.
pub fn integrate(state: &Kinematics, accel: f64, step: f64, params: &VehicleParams, road_length: f64) -> Kinematics {
    let speed = params.speed.clamp(state.speed + accel * step);
    let dx = if accel == 0.0 {
        speed * step
    } else {
        (speed * speed - state.speed * state.speed) / (2.0 * accel)
    };
    let location = state.location + dx;
    Kinematics {
        time: state.time + step,
        location,
        position: location.rem_euclid(road_length),
        speed,
        acceleration: accel,
        odometer: state.odometer + dx,
    }
}
