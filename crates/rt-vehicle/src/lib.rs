//! `rt-vehicle`: vehicle storage and the per-vehicle motion pipeline.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`spec`]     | `VehicleSpec`, a template: class, law, parameters, colour    |
//! | [`store`]    | `VehicleStore` (SoA committed state), `VehicleRngs`          |
//! | [`builder`]  | `VehicleStoreBuilder` (ring-ordered construction)            |
//! | [`motion`]   | `Motion` (tentative buffer + reaction timer), clamping, integration |
//! | [`presets`]  | Standard human / semi-automated / intelligent templates      |
//!
//! # Tick protocol
//!
//! A vehicle's state lives in three places:
//!
//! - `VehicleStore::committed`, the state every law reads;
//! - `Motion::tentative`, written by [`Motion::update`] only;
//! - `VehicleStore::relative`, the gap to the leader, recomputed after commit.
//!
//! The fleet runs `update` for every vehicle, then [`VehicleStore::commit`],
//! then [`VehicleStore::recompute_all`].  No vehicle can observe another's
//! tentative state, so the update phase is order-independent.

pub mod builder;
pub mod motion;
pub mod presets;
pub mod spec;
pub mod store;


pub use builder::VehicleStoreBuilder;
pub use motion::{Motion, clamp_acceleration, integrate};
pub use spec::VehicleSpec;
pub use store::{VehicleRngs, VehicleStore};
