//! Standard vehicle templates for mixed-traffic studies.
//!
//! All share a 4.5 m x 1.7 m body, a 1 m standstill gap, speeds in
//! `[0, 120 km/h]` and accelerations in `[-2, 1] m/s^2`.  They differ in law,
//! desired time headway, sensing/actuation noise and reaction delay.
//!
//! | Preset                 | Class | Law                         | T (s) | noise | delay (s) |
//! |------------------------|-------|-----------------------------|-------|-------|-----------|
//! | [`human`]              | HDC   | IDM + safety floor          | 3     | 0.05  | 0.67      |
//! | [`semi_automated_acc`] | SDC   | PATH ACC + safety floor     | 3     | 0.005 | 0.02      |
//! | [`semi_automated_cacc`]| SDC   | PATH CACC + safety floor    | 2     | 0.005 | 0.02      |
//! | [`intelligent_acc`]    | IDC   | platoon(PATH ACC + floor)   | 3     | 0.005 | 0.02      |
//! | [`intelligent_cacc`]   | IDC   | platoon(PATH CACC + floor)  | 2     | 0.005 | 0.02      |

use rt_control::{Idm, PathAcc, PathCacc, PlatoonLaw, SafetyFloor};
use rt_core::{AutomationClass, Limits, Rgb, VehicleParams};

use crate::VehicleSpec;

pub const MAX_SPEED: f64 = 120.0 / 3.6;

const RED: Rgb = Rgb([1.0, 0.0, 0.0]);
const BLUE: Rgb = Rgb([0.0, 0.3, 1.0]);
const GREEN: Rgb = Rgb([0.0, 0.7, 0.2]);

fn base(time_headway: f64, noise: f64, reaction_delay: f64) -> VehicleParams {
    VehicleParams {
        length:            4.5,
        width:             1.7,
        time_headway,
        accel:             Limits::new(-2.0, 1.0),
        speed:             Limits::new(0.0, MAX_SPEED),
        stopping_distance: 1.0,
        observation_error: noise,
        operation_error:   noise,
        reaction_delay,
    }
}

/// Human-driven car.
pub fn human() -> VehicleSpec {
    VehicleSpec::new("HDC", AutomationClass::Human, SafetyFloor::new(Idm::default()), base(3.0, 0.05, 0.67))
        .with_color(RED)
}

pub fn semi_automated_acc() -> VehicleSpec {
    VehicleSpec::new(
        "SDC",
        AutomationClass::SemiAutomated,
        SafetyFloor::new(PathAcc::default()),
        base(3.0, 0.005, 0.02),
    )
    .with_color(BLUE)
}

pub fn semi_automated_cacc() -> VehicleSpec {
    VehicleSpec::new(
        "SDC",
        AutomationClass::SemiAutomated,
        SafetyFloor::new(PathCacc::default()),
        base(2.0, 0.005, 0.02),
    )
    .with_color(BLUE)
}

/// Intelligent car: ACC inside the platoon controller.
pub fn intelligent_acc() -> VehicleSpec {
    VehicleSpec::new(
        "IDC",
        AutomationClass::Intelligent,
        PlatoonLaw::new(SafetyFloor::new(PathAcc::default())),
        base(3.0, 0.005, 0.02),
    )
    .with_color(GREEN)
}

/// Intelligent car: CACC inside the platoon controller.
pub fn intelligent_cacc() -> VehicleSpec {
    VehicleSpec::new(
        "IDC",
        AutomationClass::Intelligent,
        PlatoonLaw::new(SafetyFloor::new(PathCacc::default())),
        base(2.0, 0.005, 0.02),
    )
    .with_color(GREEN)
}
