//! Roaming garden pests.
//!
//! A pest lives on a grid cell, ages one unit per tick, drains beauty while
//! alive and every few ticks hops to an orthogonal neighbor, eating whatever
//! plant it lands on. The gardener's time ability ages (accelerate) or
//! rejuvenates (reverse) pests caught in its area.

use garden_common::{GridCoord, PestId, ORTHOGONAL_STEPS};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beauty::BeautyMeter;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::temporal::{scaled_shift, Tick, TimeAffected};

/// Fixed pest behavior constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PestRules {
    /// Lifespan can never exceed this value.
    pub lifespan_cap: i32,
    /// Lifespan of a freshly spawned pest.
    pub initial_lifespan: i32,
    /// Pests try to move on ticks that are multiples of this value.
    pub move_interval: u32,
}

impl Default for PestRules {
    fn default() -> Self {
        Self {
            lifespan_cap: 200,
            initial_lifespan: 100,
            move_interval: 60,
        }
    }
}

/// What a pest did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PestActivity {
    /// Lifespan ran out; the pest must be removed.
    Expired,
    /// Alive but did not change cell.
    Stayed,
    /// Moved onto an empty cell.
    Moved(GridCoord),
    /// Moved and ate the plant on the new cell.
    Fed(GridCoord),
}

/// Everything a pest touches while ticking.
pub struct PestContext<'a> {
    /// Garden grid (feeding target).
    pub grid: &'a mut Grid,
    /// Beauty meter (drained while alive).
    pub beauty: &'a mut BeautyMeter,
    /// Direction draws.
    pub rng: &'a mut dyn RandomSource,
    /// Global tick counter, used for the movement cadence.
    pub tick: u64,
    /// Beauty lost per tick.
    pub beauty_penalty: f32,
    /// Movement cadence.
    pub move_interval: u32,
}

/// A pest on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pest {
    id: PestId,
    coord: GridCoord,
    lifespan: i32,
    lifespan_cap: i32,
}

impl Pest {
    /// Spawn a pest with the configured initial lifespan.
    #[must_use]
    pub fn new(id: PestId, coord: GridCoord, rules: &PestRules) -> Self {
        Self::with_lifespan(id, coord, rules.initial_lifespan, rules.lifespan_cap)
    }

    /// Create a pest with an explicit lifespan (clamped to the cap).
    #[must_use]
    pub fn with_lifespan(id: PestId, coord: GridCoord, lifespan: i32, lifespan_cap: i32) -> Self {
        Self {
            id,
            coord,
            lifespan: lifespan.min(lifespan_cap),
            lifespan_cap,
        }
    }

    /// Pest ID.
    #[must_use]
    pub fn id(&self) -> PestId {
        self.id
    }

    /// Current cell.
    #[must_use]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Remaining lifespan in ticks.
    #[must_use]
    pub fn lifespan(&self) -> i32 {
        self.lifespan
    }

    /// Lifespan ceiling.
    #[must_use]
    pub fn lifespan_cap(&self) -> i32 {
        self.lifespan_cap
    }

    /// A pest is removed once its lifespan reaches zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.lifespan > 0
    }

    /// Draw a direction and step if the target is on the grid.
    fn try_step(&mut self, grid: &Grid, rng: &mut dyn RandomSource) -> Option<GridCoord> {
        let choice = rng.below(ORTHOGONAL_STEPS.len() as u32) as usize;
        let (dx, dy) = ORTHOGONAL_STEPS
            .get(choice)
            .copied()
            .unwrap_or(ORTHOGONAL_STEPS[0]);
        let target = self.coord.offset(dx, dy);
        if !grid.contains(target) {
            return None;
        }
        self.coord = target;
        Some(target)
    }
}

impl Tick for Pest {
    type Context<'a> = PestContext<'a>;
    type Outcome = PestActivity;

    fn tick(&mut self, ctx: PestContext<'_>) -> PestActivity {
        if !self.is_alive() {
            return PestActivity::Expired;
        }
        self.lifespan = self.lifespan.saturating_sub(1);
        if !self.is_alive() {
            return PestActivity::Expired;
        }

        ctx.beauty.drain(ctx.beauty_penalty);

        let interval = u64::from(ctx.move_interval.max(1));
        if ctx.tick % interval != 0 {
            return PestActivity::Stayed;
        }

        let Some(target) = self.try_step(ctx.grid, ctx.rng) else {
            return PestActivity::Stayed;
        };

        let ate = ctx
            .grid
            .get_mut(target)
            .is_some_and(|cell| cell.destroy_plant());
        if ate {
            debug!("{} ate the plant at {target}", self.id);
            PestActivity::Fed(target)
        } else {
            PestActivity::Moved(target)
        }
    }
}

impl TimeAffected for Pest {
    fn apply_time_effect(&mut self, factor: i32) {
        if factor == 0 {
            return;
        }
        self.lifespan = self
            .lifespan
            .saturating_sub(scaled_shift(factor))
            .min(self.lifespan_cap);
    }
}
