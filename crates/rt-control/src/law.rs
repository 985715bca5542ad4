//! The `ControlLaw` trait, the extension point for car-following models.

use std::sync::Arc;

use rt_core::VehicleRng;

use crate::LawContext;

/// Pluggable car-following behaviour.
///
/// # Thread safety
///
/// The fleet may evaluate laws for many vehicles in parallel, so
/// implementations must be `Send + Sync` and keep no per-vehicle state.
/// Anything that varies per vehicle lives in the [`LawContext`].
///
/// # Example
///
/// ```rust
/// use rt_control::{ControlLaw, LawContext};
/// use rt_core::VehicleRng;
///
/// /// Accelerate whenever the leader pulls away.
/// struct Mirror;
///
/// impl ControlLaw for Mirror {
///     fn acceleration(&self, ctx: &LawContext<'_>, _rng: &mut VehicleRng) -> f64 {
///         ctx.obs.relative.speed_diff
///     }
///
///     fn name(&self) -> &'static str {
///         "mirror"
///     }
/// }
/// ```
pub trait ControlLaw: Send + Sync + 'static {
    /// Commanded acceleration for the calling vehicle.  May be unbounded.
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// `true` only for the platoon-aware intelligent driving car model.
    ///
    /// Platoon laws classify their neighbours with this flag.
    fn is_platoon(&self) -> bool {
        false
    }
}

impl<L: ControlLaw + ?Sized> ControlLaw for Box<L> {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        (**self).acceleration(ctx, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_platoon(&self) -> bool {
        (**self).is_platoon()
    }
}

impl<L: ControlLaw + ?Sized> ControlLaw for Arc<L> {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        (**self).acceleration(ctx, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_platoon(&self) -> bool {
        (**self).is_platoon()
    }
}
