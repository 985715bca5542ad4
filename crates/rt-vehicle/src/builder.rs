//! Fluent construction of a `VehicleStore` + `VehicleRngs` pair.
//!
//! # Usage
//!
//! ```rust
//! use rt_vehicle::{VehicleStoreBuilder, presets};
//!
//! let hdc = presets::human();
//! let (store, rngs) = VehicleStoreBuilder::new(200.0, /*seed=*/ 42)
//!     .vehicle(hdc.clone(), 0.0)
//!     .vehicle(hdc.clone(), 50.0)
//!     .vehicle(hdc, 100.0)
//!     .build();
//!
//! assert_eq!(store.count, 3);
//! assert_eq!(rngs.len(), 3);
//! ```

use rt_core::{Kinematics, VehicleId};

use crate::{VehicleRngs, VehicleSpec, VehicleStore};

/// Vehicles are added in ring order: each one becomes the predecessor of the
/// one added before it, and the last added is followed by the first.
pub struct VehicleStoreBuilder {
    road_length: f64,
    seed: u64,
    first_id: VehicleId,
    specs: Vec<VehicleSpec>,
    locations: Vec<f64>,
}

impl VehicleStoreBuilder {
    pub fn new(road_length: f64, seed: u64) -> Self {
        Self {
            road_length,
            seed,
            first_id: VehicleId(0),
            specs: Vec::new(),
            locations: Vec::new(),
        }
    }

    /// Number ids consecutively from `first` instead of zero.
    pub fn first_id(mut self, first: VehicleId) -> Self {
        self.first_id = first;
        self
    }

    /// Append a standing vehicle with its front bumper at `location`.
    pub fn vehicle(mut self, spec: VehicleSpec, location: f64) -> Self {
        self.specs.push(spec);
        self.locations.push(location);
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Link the ring, compute every initial gap and seed one RNG per vehicle.
    pub fn build(self) -> (VehicleStore, VehicleRngs) {
        let mut next = self.first_id;
        let ids: Vec<VehicleId> = self
            .specs
            .iter()
            .map(|_| {
                let id = next;
                next = next.next();
                id
            })
            .collect();
        let committed = self
            .locations
            .iter()
            .map(|&loc| Kinematics::placed(loc, 0.0, 0.0, self.road_length))
            .collect();

        let rngs = VehicleRngs::new(&ids, self.seed);
        let store = VehicleStore::new(self.road_length, ids, self.specs, committed);
        (store, rngs)
    }
}
