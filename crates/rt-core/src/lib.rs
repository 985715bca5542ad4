//! `rt-core`: foundational types for the `ring_traffic` simulator.
//!
//! This crate is a dependency of every other `rt-*` crate.  It intentionally
//! has no `rt-*` dependencies and minimal external ones (`rand`, `rand_distr`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `VehicleId`                                               |
//! | [`class`]       | `AutomationClass` enum (human / semi / intelligent)       |
//! | [`params`]      | `Limits`, `VehicleParams`, `Rgb`                          |
//! | [`kinematics`]  | `Kinematics`, `RelativeState`, the headway rule           |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`policy`]      | `Placement` and `Population` initialisation policies      |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (fleet-level)        |
//! | [`error`]       | `RtError`, `RtResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod class;
pub mod error;
pub mod ids;
pub mod kinematics;
pub mod params;
pub mod policy;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::AutomationClass;
pub use error::{RtError, RtResult};
pub use ids::VehicleId;
pub use kinematics::{Kinematics, RelativeState, headway};
pub use params::{Limits, Rgb, VehicleParams};
pub use policy::{Placement, Population};
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, SimConfig, Tick};
