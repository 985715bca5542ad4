//! Flow statistics over sampled speeds.
//!
//! The stability measure is the normalised speed dispersion
//!
//! ```text
//! dispersion = 2 * sqrt( mean( ((v - mean(v)) / v_ref)^2 ) )
//! ```
//!
//! pooled over every vehicle and every sample taken after the warm-up time.
//! With `v_ref` set to the speed limit it is unit-free, so results in m/s
//! and km/h agree.

use std::collections::BTreeMap;

use rt_core::{AutomationClass, Tick};
use rt_fleet::{FleetObserver, SnapshotRow};

// ── FlowStats ─────────────────────────────────────────────────────────────────

/// Streaming mean / variance accumulator (Welford).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for FlowStats {
    fn default() -> Self {
        Self { count: 0, mean: 0.0, m2: 0.0, min: f64::INFINITY, max: f64::NEG_INFINITY }
    }
}

impl FlowStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `0` with no samples.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation; `0` with fewer than two samples.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / self.count as f64).sqrt()
    }

    pub fn dispersion(&self, v_ref: f64) -> f64 {
        2.0 * self.std_dev() / v_ref
    }

    /// `(min, max)`, or `None` with no samples.
    pub fn range(&self) -> Option<(f64, f64)> {
        (self.count > 0).then_some((self.min, self.max))
    }
}

// ── StatsObserver ─────────────────────────────────────────────────────────────

/// Summary of one run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowReport {
    pub samples: u64,
    pub mean_speed: f64,
    pub std_dev: f64,
    pub dispersion: f64,
}

/// A [`FleetObserver`] that accumulates [`FlowStats`] from snapshot rows
/// taken strictly after `warmup_secs`.
pub struct StatsObserver {
    warmup_secs: f64,
    v_ref: f64,
    overall: FlowStats,
    by_class: BTreeMap<u8, (AutomationClass, FlowStats)>,
}

impl StatsObserver {
    /// `v_ref` normalises the dispersion, usually the speed limit.
    pub fn new(warmup_secs: f64, v_ref: f64) -> Self {
        Self {
            warmup_secs,
            v_ref,
            overall: FlowStats::new(),
            by_class: BTreeMap::new(),
        }
    }

    pub fn overall(&self) -> &FlowStats {
        &self.overall
    }

    /// Statistics per automation class, ordered by class code.
    pub fn by_class(&self) -> impl Iterator<Item = (AutomationClass, &FlowStats)> + '_ {
        self.by_class.values().map(|(class, stats)| (*class, stats))
    }

    pub fn report(&self) -> FlowReport {
        FlowReport {
            samples: self.overall.count(),
            mean_speed: self.overall.mean(),
            std_dev: self.overall.std_dev(),
            dispersion: self.overall.dispersion(self.v_ref),
        }
    }
}

impl FleetObserver for StatsObserver {
    fn on_snapshot(&mut self, _tick: Tick, rows: &[SnapshotRow]) {
        for row in rows.iter().filter(|r| r.time > self.warmup_secs) {
            self.overall.push(row.speed);
            self.by_class
                .entry(row.class_code())
                .or_insert_with(|| (row.class, FlowStats::new()))
                .1
                .push(row.speed);
        }
    }
}
