use rt_core::{RtError, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error("a ring needs at least 2 vehicles, got {got}")]
    TooFewVehicles { got: usize },

    #[error("no vehicle templates given")]
    NoTemplates,

    #[error("template {template:?} has invalid weight {weight}")]
    InvalidWeight { template: String, weight: f64 },

    #[error("template {template:?} is invalid: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source:   RtError,
    },

    #[error("initial placement overlaps: {id} at slot {slot} has spacing {spacing}")]
    Overlap {
        slot:    usize,
        id:      VehicleId,
        spacing: f64,
    },

    #[error(transparent)]
    Core(#[from] RtError),
}

pub type FleetResult<T> = Result<T, FleetError>;
