//! Intelligent driving car model: a platoon-aware wrapper around another law.
//!
//! The wrapped vehicle F looks up to `depth` vehicles ahead and accumulates
//! the gap vectors it passes into three segments:
//!
//! ```text
//!   F ── tail ──▶ … ── body ──▶ … ── head
//!        (leaders are platoon)  (leaders are not)  (first platoon vehicle again)
//! ```
//!
//! Every segment entry is a *running* sum measured from F, so `tail[0]` is
//! F's own gap and `head` spans everything up to the next platoon vehicle.
//!
//! With a body and a head in sight F either acts as the platoon's leading
//! edge (nobody platoon-capable behind it) and follows a virtual gap, or it
//! sits inside the platoon and shortens its time headway.  Otherwise the
//! inner law runs on the untouched observation.

use rt_core::{RelativeState, VehicleRng, headway};

use crate::{ControlError, ControlLaw, ControlResult, LawContext};

// ── Segments ──────────────────────────────────────────────────────────────────

/// The parts of the scan the synthesis step needs.
///
/// Only first entries and the body mean are ever read, so the scan keeps
/// those instead of the full segment lists.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Segments {
    pub tail_first: Option<RelativeState>,
    pub body_first: Option<RelativeState>,
    pub body_sum: RelativeState,
    pub body_count: usize,
    pub head: Option<RelativeState>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Tail,
    Body,
}

impl Segments {
    /// Scan forward from `ctx.index` over at most `depth` gaps.
    pub fn scan(ctx: &LawContext<'_>, depth: usize) -> Self {
        let ring = ctx.ring;
        let mut seg = Segments::default();
        let mut stage = Stage::Tail;
        let mut running = RelativeState::default();
        let mut current = ctx.index;

        for hop in 0..depth {
            let gap = if hop == 0 { ctx.obs.relative } else { ring.relative(current) };
            running = running.add_gap(gap);
            let leader = ring.predecessor(current);
            let leader_is_platoon = ring.is_platoon(leader);

            match (stage, leader_is_platoon) {
                (Stage::Tail, true) => {
                    seg.tail_first.get_or_insert(running);
                }
                (Stage::Tail, false) | (Stage::Body, false) => {
                    stage = Stage::Body;
                    seg.body_first.get_or_insert(running);
                    seg.body_sum = seg.body_sum.add_gap(running);
                    seg.body_count += 1;
                }
                (Stage::Body, true) => {
                    seg.head = Some(running);
                    break;
                }
            }
            current = leader;
        }
        seg
    }

    /// `(reference, body mean, head)` when a full platoon structure is visible.
    pub fn resolved(&self) -> Option<(RelativeState, RelativeState, RelativeState)> {
        let head = self.head?;
        let body_first = self.body_first?;
        let reference = self.tail_first.unwrap_or(body_first);
        let n = self.body_count.max(1) as f64;
        let mean = RelativeState {
            spacing: self.body_sum.spacing / n,
            speed_diff: self.body_sum.speed_diff / n,
            accel_diff: self.body_sum.accel_diff / n,
            headway: 0.0,
        };
        Some((reference, mean, head))
    }
}

// ── PlatoonLaw ────────────────────────────────────────────────────────────────

pub const DEFAULT_ALPHA: f64 = 0.5;
pub const DEFAULT_BETA: f64 = 1.0;
pub const DEFAULT_GAMMA: f64 = 1.0;
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

#[derive(Clone, Debug)]
pub struct PlatoonLaw<L> {
    inner: L,
    alpha: f64,
    beta: f64,
    gamma: f64,
    depth: usize,
}

impl<L: ControlLaw> PlatoonLaw<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    /// Replace the blend (`alpha`), saturation (`beta`) and acceleration
    /// weight (`gamma`) coefficients.
    pub fn with_coefficients(mut self, alpha: f64, beta: f64, gamma: f64) -> ControlResult<Self> {
        if ![alpha, beta, gamma].iter().all(|c| c.is_finite()) {
            return Err(ControlError::Config(format!(
                "platoon coefficients must be finite (alpha={alpha}, beta={beta}, gamma={gamma})"
            )));
        }
        self.alpha = alpha;
        self.beta = beta;
        self.gamma = gamma;
        Ok(self)
    }

    pub fn with_search_depth(mut self, depth: usize) -> ControlResult<Self> {
        if depth == 0 {
            return Err(ControlError::Config("platoon search depth must be at least 1".into()));
        }
        self.depth = depth;
        Ok(self)
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn search_depth(&self) -> usize {
        self.depth
    }
}

impl<L: ControlLaw> ControlLaw for PlatoonLaw<L> {
    fn acceleration(&self, ctx: &LawContext<'_>, rng: &mut VehicleRng) -> f64 {
        let depth = self.depth.min(ctx.ring.len().saturating_sub(1));
        let Some((reference, mean, head)) = Segments::scan(ctx, depth).resolved() else {
            return self.inner.acceleration(ctx, rng);
        };

        let mut obs = ctx.obs;
        let follower = ctx.ring.successor(ctx.index);
        if ctx.ring.is_platoon(follower) {
            let dv = reference.speed_diff.max(mean.speed_diff).max(head.speed_diff);
            let da = reference.accel_diff.max(mean.accel_diff).max(head.accel_diff);
            let t = obs.params.time_headway;
            obs.params.time_headway = t - self.alpha * t * (self.beta * (dv + self.gamma * da)).tanh();
        } else {
            let dv = reference.speed_diff.min(mean.speed_diff).min(head.speed_diff);
            let da = reference.accel_diff.min(mean.accel_diff).min(head.accel_diff);
            let spacing = (reference.spacing + self.gamma * dv.min(0.0)).max(0.0);
            let speed_diff = reference.speed_diff + self.gamma * da.min(0.0);
            obs.relative = RelativeState {
                spacing,
                speed_diff,
                accel_diff: da,
                headway: headway(spacing, speed_diff),
            };
        }
        self.inner.acceleration(&ctx.with_observation(obs), rng)
    }

    fn name(&self) -> &'static str {
        "platoon"
    }

    fn is_platoon(&self) -> bool {
        true
    }
}
