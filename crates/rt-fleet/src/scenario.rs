//! Scenario sizing helpers for density / market-penetration sweeps.

use rt_vehicle::VehicleSpec;

use crate::{FleetError, FleetResult};

/// Ring length that holds `count` vehicles at `vehicles_per_km`.
pub fn road_length_for_density(count: usize, vehicles_per_km: f64) -> FleetResult<f64> {
    if !(vehicles_per_km.is_finite() && vehicles_per_km > 0.0) {
        return Err(FleetError::Config(format!(
            "traffic density must be positive and finite, got {vehicles_per_km}"
        )));
    }
    Ok(1000.0 * count as f64 / vehicles_per_km)
}

/// Share of the total template weight carried by automated classes.
///
/// Returns `0` for an empty or zero-weight mix.
pub fn permeability(templates: &[(VehicleSpec, f64)]) -> f64 {
    let total: f64 = templates.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let automated: f64 = templates
        .iter()
        .filter(|(spec, _)| spec.class.is_automated())
        .map(|(_, w)| w)
        .sum();
    automated / total
}
