//! Vehicle templates.

use std::fmt;
use std::sync::Arc;

use rt_control::ControlLaw;
use rt_core::{AutomationClass, Rgb, RtResult, VehicleParams};

/// Everything that stays fixed for a vehicle over a run.
///
/// Cloning is cheap: the law is shared, the parameters are copied.  Every
/// vehicle synthesised from a template gets its own clone and its own id.
#[derive(Clone)]
pub struct VehicleSpec {
    pub name: String,
    pub class: AutomationClass,
    pub law: Arc<dyn ControlLaw>,
    pub params: VehicleParams,
    /// Display colour for plotting front ends.
    pub color: Rgb,
}

impl VehicleSpec {
    pub fn new(
        name: impl Into<String>,
        class: AutomationClass,
        law: impl ControlLaw,
        params: VehicleParams,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            law: Arc::new(law),
            params,
            color: Rgb::default(),
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// `true` if the law is the platoon-aware intelligent driving model.
    #[inline]
    pub fn is_platoon(&self) -> bool {
        self.law.is_platoon()
    }

    pub fn validate(&self) -> RtResult<()> {
        self.params.validate()
    }
}

impl fmt::Debug for VehicleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehicleSpec")
            .field("name", &self.name)
            .field("class", &self.class)
            .field("law", &self.law.name())
            .field("params", &self.params)
            .finish()
    }
}
