//! Strongly typed, zero-cost identifier wrappers.
//!
//! A `VehicleId` is handed out by a monotonic counter when a template is
//! instantiated.  It is stable for the lifetime of a fleet and independent of
//! the vehicle's slot in the ring or its display position, so it is the key
//! used to seed per-vehicle randomness.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The ID following `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Unique identity of one synthesised vehicle.
    pub struct VehicleId(u32);
}
