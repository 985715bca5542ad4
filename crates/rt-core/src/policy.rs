//! Fleet initialisation policies.
//!
//! Both enums parse from the single-letter codes used by scenario files
//! (`"L"`, `"U"`, `"R"`).  Unknown codes fail with [`RtError::Unsupported`]
//! rather than silently producing an empty fleet.

use std::str::FromStr;

use crate::RtError;

/// How vehicles are laid out on the ring at tick 0.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// `"L"`: a jam, each vehicle directly behind its leader at the
    /// leader's stopping distance.
    #[default]
    Packed,
    /// `"U"`: fronts spread at equal intervals `L / N`.
    Uniform,
    /// `"R"`: packed gaps plus randomly distributed slack.
    Random,
}

impl Placement {
    pub fn code(self) -> &'static str {
        match self {
            Placement::Packed  => "L",
            Placement::Uniform => "U",
            Placement::Random  => "R",
        }
    }
}

impl FromStr for Placement {
    type Err = RtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(Placement::Packed),
            "U" | "u" => Ok(Placement::Uniform),
            "R" | "r" => Ok(Placement::Random),
            other => Err(RtError::Unsupported {
                what: "placement",
                code: other.to_string(),
            }),
        }
    }
}

/// How template instances are ordered around the ring.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Population {
    /// `"U"`: every template's instances spread evenly, deterministic.
    Uniform,
    /// `"R"`: uniformly random order.
    #[default]
    Shuffled,
}

impl Population {
    pub fn code(self) -> &'static str {
        match self {
            Population::Uniform  => "U",
            Population::Shuffled => "R",
        }
    }
}

impl FromStr for Population {
    type Err = RtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "U" | "u" => Ok(Population::Uniform),
            "R" | "r" => Ok(Population::Shuffled),
            other => Err(RtError::Unsupported {
                what: "population",
                code: other.to_string(),
            }),
        }
    }
}
