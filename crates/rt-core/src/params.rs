//! Static per-vehicle parameters.
//!
//! All quantities are SI: metres, seconds, m/s, m/s².

use crate::{RtError, RtResult};

/// A closed interval `[min, max]` on the real line.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the interval.  `±inf` map to the bounds.
    ///
    /// `NaN` is passed through unchanged; callers sanitise it first.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Display colour as linear RGB in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub [f32; 3]);

/// Numeric configuration of one vehicle, fixed at construction.
///
/// Car-following laws read these through their context.  The platoon law may
/// substitute a different `time_headway` in its local copy; nothing ever
/// writes back to a vehicle's own parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleParams {
    /// Bumper-to-bumper length.
    pub length: f64,
    pub width: f64,
    /// Desired time headway `T` in seconds.
    pub time_headway: f64,
    /// `[aMin, aMax]`; `aMin` is the (negative) maximum deceleration.
    pub accel: Limits,
    /// `[vMin, vMax]`.
    pub speed: Limits,
    /// Minimum gap kept when stopped.
    pub stopping_distance: f64,
    /// Std-dev of the multiplicative sensing noise (mean 1).
    pub observation_error: f64,
    /// Std-dev of the multiplicative actuation noise (mean 1).
    pub operation_error: f64,
    /// Nominal time between two fresh control decisions.
    pub reaction_delay: f64,
}

impl VehicleParams {
    /// Reject parameter sets the integrator and the laws cannot work with.
    pub fn validate(&self) -> RtResult<()> {
        let finite = [
            self.length,
            self.width,
            self.time_headway,
            self.accel.min,
            self.accel.max,
            self.speed.min,
            self.speed.max,
            self.stopping_distance,
            self.observation_error,
            self.operation_error,
            self.reaction_delay,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(RtError::Config("vehicle parameters must be finite".into()));
        }
        if self.length <= 0.0 || self.width <= 0.0 {
            return Err(RtError::Config(format!(
                "vehicle size must be positive, got {} x {}",
                self.length, self.width
            )));
        }
        if !(self.accel.min < 0.0 && self.accel.max > 0.0) {
            return Err(RtError::Config(format!(
                "acceleration bounds must straddle zero, got [{}, {}]",
                self.accel.min, self.accel.max
            )));
        }
        if !(self.speed.min >= 0.0 && self.speed.min < self.speed.max) {
            return Err(RtError::Config(format!(
                "speed bounds must satisfy 0 <= vMin < vMax, got [{}, {}]",
                self.speed.min, self.speed.max
            )));
        }
        if self.time_headway < 0.0 || self.stopping_distance < 0.0 || self.reaction_delay < 0.0 {
            return Err(RtError::Config(
                "headway, stopping distance and reaction delay must be non-negative".into(),
            ));
        }
        if self.observation_error < 0.0 || self.operation_error < 0.0 {
            return Err(RtError::Config("noise standard deviations must be non-negative".into()));
        }
        Ok(())
    }
}
