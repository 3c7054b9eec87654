//! Garden beauty meter.
//!
//! Beauty is a bounded scalar summarizing garden health. Mature plants and
//! harvests raise it; withered plants, weeds and pests lower it. Losses are much
//! faster than passive gains.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, PlantStage};

/// Per-tick beauty rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeautyRules {
    /// Lost per tick for each withered or weedy cell.
    pub decay_penalty: f32,
    /// Gained per tick for each mature cell.
    pub mature_gain: f32,
    /// Lost per tick for each live pest.
    pub pest_penalty: f32,
    /// Gained per harvest.
    pub harvest_bonus: f32,
}

impl Default for BeautyRules {
    fn default() -> Self {
        Self {
            decay_penalty: 0.005,
            mature_gain: 0.001,
            pest_penalty: 0.01,
            harvest_bonus: 5.0,
        }
    }
}

/// Beauty value clamped to `[0, max]` after every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeautyMeter {
    value: f32,
    max: f32,
}

impl BeautyMeter {
    /// Create a meter; the initial value is clamped into range.
    #[must_use]
    pub fn new(initial: f32, max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            value: initial.clamp(0.0, max),
            max,
        }
    }

    /// Current beauty.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Beauty ceiling.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Beauty as a fraction of the ceiling (0.0 to 1.0), for the HUD bar.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.value / self.max
    }

    /// Raise beauty, capped at the ceiling.
    pub fn gain(&mut self, amount: f32) {
        self.value = (self.value + amount).min(self.max);
    }

    /// Lower beauty, floored at zero.
    pub fn drain(&mut self, amount: f32) {
        self.value = (self.value - amount).max(0.0);
    }

    /// Apply one cell's contribution for this tick.
    ///
    /// Unsightly cells take precedence over maturity, so a weedy mature plant
    /// costs beauty rather than earning it.
    pub fn assess_cell(&mut self, cell: &Cell, rules: &BeautyRules) {
        if cell.is_unsightly() {
            self.drain(rules.decay_penalty);
        } else if cell.stage() == PlantStage::Mature {
            self.gain(rules.mature_gain);
        }
    }
}
