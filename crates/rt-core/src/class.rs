//! Automation class tags.
//!
//! The numeric codes are the ones written into trajectory dumps, so they are
//! part of the snapshot interface and must not be renumbered.

/// Which kind of driver controls a vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomationClass {
    /// Calibration / test vehicles.
    Test,
    /// Human-driven car.
    #[default]
    Human,
    /// Single automated car (ACC / CACC without platoon awareness).
    SemiAutomated,
    /// Platoon-aware intelligent car.
    Intelligent,
}

impl AutomationClass {
    /// Numeric tag used in snapshot rows.
    pub fn code(self) -> u8 {
        match self {
            AutomationClass::Test          => 0,
            AutomationClass::Human         => 10,
            AutomationClass::SemiAutomated => 20,
            AutomationClass::Intelligent   => 30,
        }
    }

    /// `true` for every class that is not driven by a human.
    ///
    /// Used to compute the permeability of a population.
    #[inline]
    pub fn is_automated(self) -> bool {
        matches!(self, AutomationClass::SemiAutomated | AutomationClass::Intelligent)
    }

    /// Short label (`HDC`, `SDC`, `IDC`, `TEST`).
    pub fn as_str(self) -> &'static str {
        match self {
            AutomationClass::Test          => "TEST",
            AutomationClass::Human         => "HDC",
            AutomationClass::SemiAutomated => "SDC",
            AutomationClass::Intelligent   => "IDC",
        }
    }
}

impl std::fmt::Display for AutomationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
