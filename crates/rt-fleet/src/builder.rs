//! `FleetBuilder`: validated construction of a [`Fleet`].
//!
//! Building a fleet runs these steps in order:
//!
//! 1. validate the run configuration, road length, vehicle count and every
//!    `(template, weight)` pair;
//! 2. apportion `N` vehicles over the templates by weight;
//! 3. order the instances around the ring (population policy);
//! 4. place them (placement policy) and link the ring;
//! 5. compute the initial gaps and reject any overlap;
//! 6. give every vehicle a random reaction-timer offset.

use rt_core::{Placement, Population, SimConfig, SimRng};
use rt_vehicle::{Motion, VehicleSpec, VehicleStoreBuilder};

use crate::{Fleet, FleetError, FleetResult};

/// Seed offsets for the construction-time random streams.
const POPULATION_STREAM: u64 = 1;
const PLACEMENT_STREAM: u64 = 2;
const TIMER_STREAM: u64 = 3;

/// Fluent builder for [`Fleet`].
///
/// # Example
///
/// ```rust
/// use rt_core::{Placement, Population, SimConfig};
/// use rt_fleet::{FleetBuilder, NoopObserver};
/// use rt_vehicle::presets;
///
/// let config = SimConfig { step_secs: 0.01, total_ticks: 100, seed: 7, output_interval_ticks: 10 };
/// let mut fleet = FleetBuilder::new(config, 1_000.0)
///     .vehicle_count(20)
///     .placement(Placement::Uniform)
///     .population(Population::Shuffled)
///     .template(presets::human(), 0.7)
///     .template(presets::intelligent_cacc(), 0.3)
///     .build()
///     .unwrap();
/// fleet.run(&mut NoopObserver);
/// assert_eq!(fleet.len(), 20);
/// ```
pub struct FleetBuilder {
    config: SimConfig,
    road_length: f64,
    count: usize,
    placement: Placement,
    population: Population,
    templates: Vec<(VehicleSpec, f64)>,
}

impl FleetBuilder {
    pub fn new(config: SimConfig, road_length: f64) -> Self {
        Self {
            config,
            road_length,
            count: 0,
            placement: Placement::default(),
            population: Population::default(),
            templates: Vec::new(),
        }
    }

    pub fn vehicle_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn population(mut self, population: Population) -> Self {
        self.population = population;
        self
    }

    /// Add a template with a relative weight.  Weights need not sum to 1.
    pub fn template(mut self, spec: VehicleSpec, weight: f64) -> Self {
        self.templates.push((spec, weight));
        self
    }

    pub fn templates(mut self, templates: impl IntoIterator<Item = (VehicleSpec, f64)>) -> Self {
        self.templates.extend(templates);
        self
    }

    pub fn build(self) -> FleetResult<Fleet> {
        self.validate()?;

        let weights: Vec<f64> = self.templates.iter().map(|(_, w)| *w).collect();
        let counts = apportion(&weights, self.count);
        for ((spec, _), n) in self.templates.iter().zip(&counts) {
            log::debug!("template {:?} ({}): {} vehicles", spec.name, spec.class, n);
        }

        let mut root = SimRng::new(self.config.seed);
        let mut population_rng = root.child(POPULATION_STREAM);
        let mut placement_rng = root.child(PLACEMENT_STREAM);
        let mut timer_rng = root.child(TIMER_STREAM);

        let order = arrange(&counts, self.population, &mut population_rng);
        let specs: Vec<VehicleSpec> = order.iter().map(|&t| self.templates[t].0.clone()).collect();
        let locations = place(&specs, self.placement, self.road_length, &mut placement_rng);
        log::debug!(
            "placed {} vehicles on a {} m ring ({} placement, {} population)",
            specs.len(),
            self.road_length,
            self.placement.code(),
            self.population.code(),
        );

        let mut builder = VehicleStoreBuilder::new(self.road_length, self.config.seed);
        for (spec, loc) in specs.into_iter().zip(locations) {
            builder = builder.vehicle(spec, loc);
        }
        let (store, rngs) = builder.build();

        if let Some(slot) = (0..store.count).find(|&i| store.relative[i].spacing < 0.0) {
            return Err(FleetError::Overlap {
                slot,
                id: store.ids[slot],
                spacing: store.relative[slot].spacing,
            });
        }

        let motions = (0..store.count)
            .map(|i| {
                let delay = store.specs[i].params.reaction_delay;
                let offset = if delay > 0.0 { timer_rng.gen_range(0.0..delay) } else { 0.0 };
                Motion::new(store.committed[i], offset)
            })
            .collect();

        Ok(Fleet::new(self.config, store, rngs, motions, self.templates))
    }

    fn validate(&self) -> FleetResult<()> {
        self.config.validate()?;
        if !(self.road_length.is_finite() && self.road_length > 0.0) {
            return Err(FleetError::Config(format!(
                "road length must be positive and finite, got {}",
                self.road_length
            )));
        }
        if self.count < 2 {
            return Err(FleetError::TooFewVehicles { got: self.count });
        }
        if self.templates.is_empty() {
            return Err(FleetError::NoTemplates);
        }
        for (spec, weight) in &self.templates {
            if !(weight.is_finite() && *weight >= 0.0) {
                return Err(FleetError::InvalidWeight {
                    template: spec.name.clone(),
                    weight:   *weight,
                });
            }
            spec.validate().map_err(|source| FleetError::InvalidTemplate {
                template: spec.name.clone(),
                source,
            })?;
        }
        let total: f64 = self.templates.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(FleetError::Config("template weights sum to zero".into()));
        }
        Ok(())
    }
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

/// Split `n` vehicles over `weights`.
///
/// Each template first gets `floor(w * n / sum)`.  The vehicles left over go
/// one each to the templates with the largest fractional remainders, earlier
/// templates first on ties, so the counts always sum to `n`.
pub fn apportion(weights: &[f64], n: usize) -> Vec<usize> {
    let total: f64 = weights.iter().sum();
    let exact: Vec<f64> = weights.iter().map(|w| w * n as f64 / total).collect();
    let mut counts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let assigned: usize = counts.iter().sum();
    let mut by_remainder: Vec<usize> = (0..weights.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for &t in by_remainder.iter().cycle().take(n.saturating_sub(assigned)) {
        counts[t] += 1;
    }
    counts
}

/// Ring order of template indices.
///
/// Every instance gets a sort key and the instances are stable-sorted by it.
/// `Uniform` keys instance `k` of `c` at `(k + 0.5) / c`, which interleaves
/// the templates evenly; `Shuffled` draws keys uniformly at random.
pub fn arrange(counts: &[usize], population: Population, rng: &mut SimRng) -> Vec<usize> {
    let mut keyed: Vec<(f64, usize)> = Vec::with_capacity(counts.iter().sum());
    for (template, &c) in counts.iter().enumerate() {
        for k in 0..c {
            let key = match population {
                Population::Uniform => (k as f64 + 0.5) / c as f64,
                Population::Shuffled => rng.unit(),
            };
            keyed.push((key, template));
        }
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, t)| t).collect()
}

// ── Placement ─────────────────────────────────────────────────────────────────

/// Front-bumper locations for vehicles in ring order.
///
/// Slot `i + 1` is ahead of slot `i`, so each location is larger than the
/// last and the final slot closes the ring behind slot 0.
pub fn place(
    specs:       &[VehicleSpec],
    placement:   Placement,
    road_length: f64,
    rng:         &mut SimRng,
) -> Vec<f64> {
    let n = specs.len();
    // Bumper distance slot `i` needs to its leader: its standstill gap plus
    // the leader's body.
    let required = |i: usize| specs[i].params.stopping_distance + specs[(i + 1) % n].params.length;

    match placement {
        Placement::Packed => {
            let mut locs = Vec::with_capacity(n);
            let mut loc = 0.0;
            for i in 0..n {
                if i > 0 {
                    loc += required(i - 1);
                }
                locs.push(loc);
            }
            locs
        }
        Placement::Uniform => (0..n).map(|i| i as f64 * road_length / n as f64).collect(),
        Placement::Random => {
            // A ring too short for the packed layout gets no slack and is
            // rejected by the overlap check.
            let total: f64 = (0..n).map(required).sum();
            let slack = (road_length - total).max(0.0);
            let mut cuts: Vec<f64> = (0..n - 1).map(|_| rng.unit() * slack).collect();
            cuts.sort_by(f64::total_cmp);

            let mut locs = Vec::with_capacity(n);
            let mut loc = 0.0;
            let mut prev_cut = 0.0;
            for i in 0..n {
                if i > 0 {
                    let cut = cuts[i - 1];
                    loc += required(i - 1) + (cut - prev_cut);
                    prev_cut = cut;
                }
                locs.push(loc);
            }
            locs
        }
    }
}
