//! Garden cell state machine.
//!
//! Each cell runs its own plant lifecycle:
//! - Growth phase (seed/growing) driven by the natural clock
//! - Maturity, then withering if left unharvested
//! - An independent weed overlay on planted cells
//! - Direct response to time manipulation (acceleration and reversal)
//!
//! Cells know nothing about their neighbors; neighborhood effects live in
//! [`crate::grid`].

use garden_common::GridCoord;
use serde::{Deserialize, Serialize};

use crate::temporal::{scaled_shift, Tick, TimeAffected};

/// Lifecycle stage of the plant in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlantStage {
    /// Bare soil.
    #[default]
    Empty,
    /// Freshly planted.
    Seed,
    /// Growing, not yet mature (also reached by reversing a mature plant).
    Growing,
    /// Fully grown, can be harvested.
    Mature,
    /// Missed the harvest window.
    Withered,
}

impl PlantStage {
    /// Seed and Growing form a single growth phase.
    #[must_use]
    pub fn is_growing(self) -> bool {
        matches!(self, Self::Seed | Self::Growing)
    }

    /// Check if a plant in this stage can be harvested.
    #[must_use]
    pub fn is_harvestable(self) -> bool {
        matches!(self, Self::Mature)
    }

    /// Check if anything is planted.
    #[must_use]
    pub fn is_planted(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Clock thresholds shared by every cell of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthThresholds {
    /// Growth clock value at which a plant matures.
    pub maturity: i32,
    /// Growth clock value beyond which a mature plant withers.
    pub wither: i32,
    /// Weed clock value beyond which a weed appears.
    pub weed: i32,
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self {
            maturity: 100,
            wither: 150,
            weed: 300,
        }
    }
}

/// Transitions that happened during one natural tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellTickOutcome {
    /// The plant reached maturity.
    pub matured: bool,
    /// The plant withered.
    pub withered: bool,
    /// A weed appeared.
    pub weed_sprouted: bool,
}

impl CellTickOutcome {
    /// Nothing noteworthy happened.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        !(self.matured || self.withered || self.weed_sprouted)
    }
}

/// One tile of the garden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    coord: GridCoord,
    stage: PlantStage,
    growth_clock: i32,
    has_weed: bool,
    weed_clock: i32,
    thresholds: GrowthThresholds,
}

impl Cell {
    /// Growth clock value of a freshly planted seed.
    pub const PLANTED_CLOCK: i32 = 1;

    /// Create an empty cell.
    #[must_use]
    pub fn new(coord: GridCoord, thresholds: GrowthThresholds) -> Self {
        Self {
            coord,
            stage: PlantStage::Empty,
            growth_clock: 0,
            has_weed: false,
            weed_clock: 0,
            thresholds,
        }
    }

    /// Grid position of this cell.
    #[must_use]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Current plant stage.
    #[must_use]
    pub fn stage(&self) -> PlantStage {
        self.stage
    }

    /// Current growth clock.
    #[must_use]
    pub fn growth_clock(&self) -> i32 {
        self.growth_clock
    }

    /// Whether a weed grows here.
    #[must_use]
    pub fn has_weed(&self) -> bool {
        self.has_weed
    }

    /// Current weed clock.
    #[must_use]
    pub fn weed_clock(&self) -> i32 {
        self.weed_clock
    }

    /// Thresholds this cell runs with.
    #[must_use]
    pub fn thresholds(&self) -> GrowthThresholds {
        self.thresholds
    }

    /// Growth clock as a fraction of the wither threshold (0.0 to 1.0).
    ///
    /// Renderers size the plant sprite by this value.
    #[must_use]
    pub fn growth_ratio(&self) -> f32 {
        if self.thresholds.wither <= 0 {
            return 0.0;
        }
        (self.growth_clock as f32 / self.thresholds.wither as f32).clamp(0.0, 1.0)
    }

    /// Withered plants and weeds spoil the garden's beauty.
    #[must_use]
    pub fn is_unsightly(&self) -> bool {
        self.stage == PlantStage::Withered || self.has_weed
    }

    /// Sow a seed. Only legal on an empty cell.
    pub fn plant(&mut self) -> bool {
        if self.stage != PlantStage::Empty {
            return false;
        }
        self.stage = PlantStage::Seed;
        self.growth_clock = Self::PLANTED_CLOCK;
        true
    }

    /// Harvest the plant. Only legal on a mature cell.
    pub fn harvest(&mut self) -> bool {
        if !self.stage.is_harvestable() {
            return false;
        }
        self.clear_plant();
        true
    }

    /// Pull the weed. Legal whenever a weed is present, whatever the plant stage.
    pub fn remove_weed(&mut self) -> bool {
        if !self.has_weed {
            return false;
        }
        self.clear_weed();
        true
    }

    /// Destroy whatever is planted (used by feeding pests). Weeds are untouched.
    ///
    /// Returns `false` if the cell was already empty.
    pub fn destroy_plant(&mut self) -> bool {
        if !self.stage.is_planted() {
            return false;
        }
        self.clear_plant();
        true
    }

    fn clear_plant(&mut self) {
        self.stage = PlantStage::Empty;
        self.growth_clock = 0;
    }

    fn clear_weed(&mut self) {
        self.has_weed = false;
        self.weed_clock = 0;
    }

    /// Pull the growth clock back into its legal range for the current stage.
    fn clamp_clock(&mut self) {
        if self.stage == PlantStage::Empty {
            self.growth_clock = 0;
        } else {
            self.growth_clock = self.growth_clock.clamp(0, self.thresholds.wither);
        }
    }
}

impl Tick for Cell {
    type Context<'a> = ();
    type Outcome = CellTickOutcome;

    fn tick(&mut self, (): ()) -> CellTickOutcome {
        let mut outcome = CellTickOutcome::default();
        let t = self.thresholds;

        match self.stage {
            PlantStage::Seed | PlantStage::Growing => {
                self.growth_clock = self.growth_clock.saturating_add(1);
                if self.growth_clock >= t.maturity {
                    self.stage = PlantStage::Mature;
                    self.growth_clock = t.maturity;
                    outcome.matured = true;
                }
            },
            PlantStage::Mature => {
                self.growth_clock = self.growth_clock.saturating_add(1);
                if self.growth_clock > t.wither {
                    self.stage = PlantStage::Withered;
                    outcome.withered = true;
                }
            },
            PlantStage::Empty | PlantStage::Withered => {},
        }

        if self.stage.is_planted() && !self.has_weed {
            self.weed_clock = self.weed_clock.saturating_add(1);
            if self.weed_clock > t.weed {
                self.has_weed = true;
                self.weed_clock = 0;
                outcome.weed_sprouted = true;
            }
        }

        self.clamp_clock();
        outcome
    }
}

impl TimeAffected for Cell {
    fn apply_time_effect(&mut self, factor: i32) {
        if factor == 0 {
            return;
        }
        let shift = scaled_shift(factor);
        let t = self.thresholds;

        match self.stage {
            PlantStage::Seed | PlantStage::Growing => {
                self.growth_clock = self.growth_clock.saturating_add(shift);
                if self.growth_clock >= t.maturity {
                    self.stage = PlantStage::Mature;
                    self.growth_clock = t.maturity;
                } else if self.growth_clock < 0 {
                    self.clear_plant();
                }
            },
            PlantStage::Mature => {
                self.growth_clock = self.growth_clock.saturating_add(shift);
                if self.growth_clock > t.wither {
                    self.stage = PlantStage::Withered;
                } else if self.growth_clock < t.maturity {
                    // Reversal pulls a mature plant back into the growth phase, never further.
                    self.stage = PlantStage::Growing;
                }
            },
            PlantStage::Empty | PlantStage::Withered => {},
        }

        if self.has_weed {
            if factor > 0 {
                self.clear_weed();
            } else {
                self.weed_clock = self.weed_clock.saturating_add(shift);
                if self.weed_clock < 0 {
                    self.clear_weed();
                }
            }
        }

        self.clamp_clock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell() -> Cell {
        Cell::new(GridCoord::new(0, 0), GrowthThresholds::default())
    }

    fn cell_in(stage: PlantStage, clock: i32) -> Cell {
        let mut c = cell();
        c.stage = stage;
        c.growth_clock = clock;
        c
    }

    fn weedy(stage: PlantStage, clock: i32) -> Cell {
        let mut c = cell_in(stage, clock);
        c.has_weed = true;
        c
    }

    #[test]
    fn test_stage_properties() {
        assert!(PlantStage::Seed.is_growing());
        assert!(PlantStage::Growing.is_growing());
        assert!(!PlantStage::Mature.is_growing());
        assert!(PlantStage::Mature.is_harvestable());
        assert!(!PlantStage::Withered.is_harvestable());
        assert!(!PlantStage::Empty.is_planted());
    }

    #[test]
    fn test_new_cell_is_empty() {
        let c = cell();
        assert_eq!(c.stage(), PlantStage::Empty);
        assert_eq!(c.growth_clock(), 0);
        assert!(!c.has_weed());
    }

    #[test]
    fn test_plant_sets_seed_clock_one() {
        let mut c = cell();
        assert!(c.plant());
        assert_eq!(c.stage(), PlantStage::Seed);
        assert_eq!(c.growth_clock(), 1);
        assert!(!c.plant()); // Already planted
    }

    #[test]
    fn test_natural_growth_to_maturity() {
        let mut c = cell();
        c.plant();

        for _ in 0..98 {
            c.tick(());
        }
        assert_eq!(c.stage(), PlantStage::Seed);
        assert_eq!(c.growth_clock(), 99);

        let outcome = c.tick(());
        assert!(outcome.matured);
        assert_eq!(c.stage(), PlantStage::Mature);
        assert_eq!(c.growth_clock(), 100);
    }

    #[test]
    fn test_mature_withers_past_threshold() {
        let mut c = cell_in(PlantStage::Mature, 150);
        let outcome = c.tick(());
        assert!(outcome.withered);
        assert_eq!(c.stage(), PlantStage::Withered);
        assert_eq!(c.growth_clock(), 150);
    }

    #[test]
    fn test_mature_at_threshold_does_not_wither_early() {
        let mut c = cell_in(PlantStage::Mature, 149);
        c.tick(());
        assert_eq!(c.stage(), PlantStage::Mature);
        assert_eq!(c.growth_clock(), 150);
    }

    #[test]
    fn test_withered_and_empty_are_stable() {
        let mut withered = cell_in(PlantStage::Withered, 150);
        let mut empty = cell();
        for _ in 0..50 {
            withered.tick(());
            empty.tick(());
        }
        assert_eq!(withered.stage(), PlantStage::Withered);
        assert_eq!(withered.growth_clock(), 150);
        assert_eq!(empty, cell());
    }

    #[test]
    fn test_weed_emerges_after_threshold() {
        let mut c = cell_in(PlantStage::Withered, 150);
        for _ in 0..300 {
            assert!(!c.tick(()).weed_sprouted);
        }
        assert_eq!(c.weed_clock(), 300);

        let outcome = c.tick(());
        assert!(outcome.weed_sprouted);
        assert!(c.has_weed());
        assert_eq!(c.weed_clock(), 0);

        // No further weed clock progress while the weed stands
        c.tick(());
        assert_eq!(c.weed_clock(), 0);
    }

    #[test]
    fn test_empty_cell_grows_no_weeds() {
        let mut c = cell();
        for _ in 0..400 {
            c.tick(());
        }
        assert!(!c.has_weed());
        assert_eq!(c.weed_clock(), 0);
    }

    #[test]
    fn test_accelerate_seed_to_mature() {
        let mut c = cell();
        c.plant();
        c.apply_time_effect(10); // 1 + 50
        assert_eq!(c.stage(), PlantStage::Seed);
        assert_eq!(c.growth_clock(), 51);

        c.apply_time_effect(10); // 101 -> clamp
        assert_eq!(c.stage(), PlantStage::Mature);
        assert_eq!(c.growth_clock(), 100);
    }

    #[test]
    fn test_reverse_growing_to_empty() {
        let mut c = cell_in(PlantStage::Growing, 40);
        c.apply_time_effect(-10);
        assert_eq!(c.stage(), PlantStage::Empty);
        assert_eq!(c.growth_clock(), 0);
    }

    #[test]
    fn test_reverse_to_exactly_zero_keeps_plant() {
        let mut c = cell_in(PlantStage::Growing, 50);
        c.apply_time_effect(-10);
        assert_eq!(c.stage(), PlantStage::Growing);
        assert_eq!(c.growth_clock(), 0);
    }

    #[test]
    fn test_reverse_mature_regresses_to_growing() {
        let mut c = cell_in(PlantStage::Mature, 120);
        c.apply_time_effect(-10);
        assert_eq!(c.stage(), PlantStage::Growing);
        assert_eq!(c.growth_clock(), 70);
    }

    #[test]
    fn test_strong_reverse_on_mature_stops_at_growing() {
        let mut c = cell_in(PlantStage::Mature, 100);
        c.apply_time_effect(-100);
        assert_eq!(c.stage(), PlantStage::Growing);
        assert_eq!(c.growth_clock(), 0);
    }

    #[test]
    fn test_accelerate_mature_to_withered() {
        let mut c = cell_in(PlantStage::Mature, 120);
        c.apply_time_effect(10);
        assert_eq!(c.stage(), PlantStage::Withered);
        assert_eq!(c.growth_clock(), 150);
    }

    #[test]
    fn test_small_shift_keeps_mature() {
        let mut c = cell_in(PlantStage::Mature, 100);
        c.apply_time_effect(1);
        assert_eq!(c.stage(), PlantStage::Mature);
        assert_eq!(c.growth_clock(), 105);
    }

    #[test]
    fn test_accelerate_kills_weed_regardless_of_clock() {
        let mut c = weedy(PlantStage::Growing, 10);
        c.weed_clock = 250;
        c.apply_time_effect(10);
        assert!(!c.has_weed());
        assert_eq!(c.weed_clock(), 0);
    }

    #[test]
    fn test_reverse_regresses_weed_below_zero() {
        let mut c = weedy(PlantStage::Withered, 150);
        c.apply_time_effect(-1);
        assert!(!c.has_weed());
        assert_eq!(c.weed_clock(), 0);
    }

    #[test]
    fn test_reverse_leaves_weed_with_enough_clock() {
        let mut c = weedy(PlantStage::Withered, 150);
        c.weed_clock = 80;
        c.apply_time_effect(-10);
        assert!(c.has_weed());
        assert_eq!(c.weed_clock(), 30);
    }

    #[test]
    fn test_weed_on_empty_cell_responds_to_effect() {
        let mut c = weedy(PlantStage::Empty, 0);
        c.apply_time_effect(3);
        assert!(!c.has_weed());
        assert_eq!(c.stage(), PlantStage::Empty);
    }

    #[test]
    fn test_zero_factor_is_noop() {
        let mut c = weedy(PlantStage::Mature, 120);
        c.weed_clock = 5;
        let before = c.clone();
        c.apply_time_effect(0);
        assert_eq!(c, before);
    }

    #[test]
    fn test_harvest_only_mature() {
        let mut c = cell_in(PlantStage::Growing, 60);
        assert!(!c.harvest());

        let mut c = cell_in(PlantStage::Mature, 110);
        assert!(c.harvest());
        assert_eq!(c.stage(), PlantStage::Empty);
        assert_eq!(c.growth_clock(), 0);

        let mut c = cell_in(PlantStage::Withered, 150);
        assert!(!c.harvest());
    }

    #[test]
    fn test_remove_weed_independent_of_stage() {
        let mut c = weedy(PlantStage::Mature, 110);
        c.weed_clock = 7;
        assert!(c.remove_weed());
        assert!(!c.has_weed());
        assert_eq!(c.weed_clock(), 0);
        assert_eq!(c.stage(), PlantStage::Mature);
        assert!(!c.remove_weed());
    }

    #[test]
    fn test_destroy_plant_keeps_weed() {
        let mut c = weedy(PlantStage::Growing, 30);
        assert!(c.destroy_plant());
        assert_eq!(c.stage(), PlantStage::Empty);
        assert_eq!(c.growth_clock(), 0);
        assert!(c.has_weed());
        assert!(!c.destroy_plant());
    }

    #[test]
    fn test_growth_ratio() {
        assert!(cell().growth_ratio().abs() < 0.001);
        assert!((cell_in(PlantStage::Mature, 75).growth_ratio() - 0.5).abs() < 0.001);
        assert!((cell_in(PlantStage::Withered, 150).growth_ratio() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_unsightly() {
        assert!(cell_in(PlantStage::Withered, 150).is_unsightly());
        assert!(weedy(PlantStage::Seed, 1).is_unsightly());
        assert!(!cell_in(PlantStage::Mature, 100).is_unsightly());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tick,
        Effect(i32),
        Plant,
        Harvest,
        RemoveWeed,
        Destroy,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Tick),
            4 => (-40i32..=40).prop_map(Op::Effect),
            1 => Just(Op::Plant),
            1 => Just(Op::Harvest),
            1 => Just(Op::RemoveWeed),
            1 => Just(Op::Destroy),
        ]
    }

    proptest! {
        #[test]
        fn prop_growth_clock_stays_in_range(ops in prop::collection::vec(op(), 0..400)) {
            let mut c = cell();
            for op in ops {
                match op {
                    Op::Tick => { c.tick(()); },
                    Op::Effect(f) => c.apply_time_effect(f),
                    Op::Plant => { c.plant(); },
                    Op::Harvest => { c.harvest(); },
                    Op::RemoveWeed => { c.remove_weed(); },
                    Op::Destroy => { c.destroy_plant(); },
                }
                prop_assert!(c.growth_clock() >= 0);
                prop_assert!(c.growth_clock() <= c.thresholds().wither);
                if c.stage() == PlantStage::Empty {
                    prop_assert_eq!(c.growth_clock(), 0);
                }
                prop_assert!(c.weed_clock() >= 0);
            }
        }

        #[test]
        fn prop_mature_never_jumps_to_empty(clock in 100i32..=150, factor in -200i32..0) {
            let mut c = cell_in(PlantStage::Mature, clock);
            c.apply_time_effect(factor);
            prop_assert!(c.stage() == PlantStage::Growing || c.stage() == PlantStage::Mature);
        }

        #[test]
        fn prop_acceleration_reaches_maturity(factor in 1i32..=30) {
            let mut c = cell();
            c.plant();
            let shift = factor * 5;
            let needed = (100 - 1 + shift - 1) / shift;
            for _ in 0..needed {
                c.apply_time_effect(factor);
            }
            prop_assert_eq!(c.stage(), PlantStage::Mature);
        }

        #[test]
        fn prop_zero_factor_noop(stage_idx in 0usize..5, clock in 0i32..=150, weed in any::<bool>()) {
            let stages = [
                PlantStage::Empty,
                PlantStage::Seed,
                PlantStage::Growing,
                PlantStage::Mature,
                PlantStage::Withered,
            ];
            let stage = stages[stage_idx];
            let clock = if stage == PlantStage::Empty { 0 } else { clock };
            let mut c = cell_in(stage, clock);
            c.has_weed = weed;
            let before = c.clone();
            c.apply_time_effect(0);
            prop_assert_eq!(c, before);
        }
    }
}
