//! `rt-control`: car-following control laws.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`law`]      | `ControlLaw` trait                                              |
//! | [`context`]  | `LawContext`, `Observation`, `LeaderState`, `RingView`          |
//! | [`fvd`]      | Full velocity difference model                                  |
//! | [`gipps`]    | Gipps model (full and braking-only)                             |
//! | [`idm`]      | Intelligent driver model                                        |
//! | [`path`]     | PATH ACC / CACC linear controllers                              |
//! | [`safety`]   | `SafetyFloor`: any law floored by Gipps braking                 |
//! | [`platoon`]  | `PlatoonLaw`: intelligent driving car model                     |
//! | [`error`]    | `ControlError`, `ControlResult<T>`                              |
//!
//! # Design notes
//!
//! A law is a pure function of the calling vehicle's observation (its own
//! parameters and committed state plus the gap to its leader) and returns a
//! commanded acceleration.  The result is *not* bounded: IDM reports an
//! overlap as `-inf`, and the vehicle update pipeline clamps before it
//! integrates.
//!
//! Laws are stateless, so one instance is shared by every vehicle built from
//! the same template and the update phase may call it from many threads at
//! once.  All randomness comes from the per-vehicle [`VehicleRng`] passed in.
//!
//! [`VehicleRng`]: rt_core::VehicleRng

pub mod context;
pub mod error;
pub mod fvd;
pub mod gipps;
pub mod idm;
pub mod law;
pub mod path;
pub mod platoon;
pub mod safety;


pub use context::{LawContext, LeaderState, Observation, RingView};
pub use error::{ControlError, ControlResult};
pub use fvd::Fvd;
pub use gipps::Gipps;
pub use idm::Idm;
pub use law::ControlLaw;
pub use path::{PathAcc, PathCacc};
pub use platoon::{PlatoonLaw, Segments};
pub use safety::SafetyFloor;
