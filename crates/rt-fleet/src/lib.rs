//! `rt-fleet`: fleet assembly and the synchronous tick loop.
//!
//! # Three-phase tick
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Update      every vehicle: reaction timer, control law, noise,
//!                 clamp, integrate → tentative state
//!                 (parallel with the `parallel` feature).
//!   ② Commit      tentative → committed for every vehicle.
//!   ③ Relative    every vehicle recomputes its gap to its leader
//!                 (parallel with the `parallel` feature).
//!   snapshot rows go to the observer every `output_interval_ticks`.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs phases ① and ③ on Rayon's thread pool.             |
//!
//! # Quick-start
//!
//! ```rust
//! use rt_core::{Placement, SimConfig};
//! use rt_fleet::{FleetBuilder, NoopObserver};
//! use rt_vehicle::presets;
//!
//! # fn main() -> Result<(), rt_fleet::FleetError> {
//! let config = SimConfig { step_secs: 0.01, total_ticks: 500, seed: 42, output_interval_ticks: 10 };
//! let mut fleet = FleetBuilder::new(config, 500.0)
//!     .vehicle_count(10)
//!     .placement(Placement::Uniform)
//!     .template(presets::human(), 1.0)
//!     .build()?;
//! fleet.run(&mut NoopObserver);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod fleet;
pub mod observer;
pub mod scenario;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use error::{FleetError, FleetResult};
pub use fleet::Fleet;
pub use observer::{FleetObserver, NoopObserver};
pub use scenario::{permeability, road_length_for_density};
pub use snapshot::SnapshotRow;
