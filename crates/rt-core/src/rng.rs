//! Deterministic per-vehicle and fleet-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive vehicle IDs uniformly across the seed space.
//! This means:
//!
//! - Vehicles never share RNG state, so noise draws do not depend on the
//!   order vehicles are visited in, nor on how the update phase is split
//!   across threads.
//! - Reordering the display list leaves every trajectory unchanged.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::VehicleId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
///
/// Stored in a parallel `Vec<VehicleRng>` next to the vehicle store so the
/// update phase can hold `&mut` to one vehicle's RNG while reading every
/// vehicle's committed state.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    /// Multiplicative noise factor drawn from `N(1, std_dev)`.
    ///
    /// A zero (or invalid) deviation returns exactly `1.0` without consuming
    /// randomness, so noise-free vehicles are fully deterministic.
    #[inline]
    pub fn noise(&mut self, std_dev: f64) -> f64 {
        if std_dev <= 0.0 {
            return 1.0;
        }
        match Normal::new(1.0, std_dev) {
            Ok(normal) => normal.sample(&mut self.0),
            Err(_) => 1.0,
        }
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Fleet-level RNG for population shuffling, random placement and the
/// initial reaction-timer offsets.
///
/// Used only during fleet construction, which is single-threaded.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// A uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
