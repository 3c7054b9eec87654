//! The gardener: movement, temporal energy and the time ability.

use garden_common::GridCoord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GardenConfig;
use crate::grid::{Grid, GridGeometry};
use crate::input::{Intents, Vec2};
use crate::temporal::Tick;

/// Direction of a time-ability use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeDirection {
    /// Push clocks forward.
    Accelerate,
    /// Pull clocks backward.
    Reverse,
}

impl TimeDirection {
    /// Signed factor for a given magnitude.
    #[must_use]
    pub fn factor(self, magnitude: i32) -> i32 {
        match self {
            TimeDirection::Accelerate => magnitude,
            TimeDirection::Reverse => magnitude.saturating_neg(),
        }
    }
}

/// The player-controlled gardener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gardener {
    /// Center of the sprite in play-field units
    position: Vec2,
    /// Grid placement, used to find the cell under the gardener
    geometry: GridGeometry,
    /// Play-field bounds
    field: Vec2,
    /// Sprite edge length
    size: f32,
    /// Distance per tick
    speed: f32,
    /// Temporal energy
    energy: f32,
    max_energy: f32,
    energy_regen: f32,
    ability_cost: f32,
    /// Whether the last tick had movement input
    moving: bool,
}

impl Gardener {
    /// Place a gardener at the center of the play field with full energy.
    #[must_use]
    pub fn new(config: &GardenConfig) -> Self {
        let (margin_x, margin_y) = config.grid_margin();
        let field = Vec2::new(config.field_width as f32, config.field_height as f32);
        Self {
            position: Vec2::new((config.field_width / 2) as f32, (config.field_height / 2) as f32),
            geometry: GridGeometry::new(config.cell_size as f32, margin_x, margin_y),
            field,
            size: config.agent_size,
            speed: config.agent_speed,
            energy: config.max_energy,
            max_energy: config.max_energy,
            energy_regen: config.energy_regen,
            ability_cost: config.ability_cost,
            moving: false,
        }
    }

    /// Current position (sprite center).
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the gardener directly, clamped to the play field.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = self.clamp_to_field(position);
    }

    /// Sprite edge length.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Grid placement used for cell lookups.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Current temporal energy.
    #[must_use]
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Energy ceiling.
    #[must_use]
    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    /// Whether movement input was applied on the last tick.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Cell under the gardener's center. May be off the grid.
    #[must_use]
    pub fn grid_coord(&self) -> GridCoord {
        self.geometry.cell_at(self.position)
    }

    /// Whether there is enough energy for one ability use.
    #[must_use]
    pub fn can_use_ability(&self) -> bool {
        self.energy >= self.ability_cost
    }

    /// Spend energy and shift time around the gardener's cell.
    ///
    /// Returns the center cell when the ability fired, `None` when energy was short.
    /// Cells outside the grid are skipped; the caller applies the same area to pests.
    pub fn try_apply_time_effect(
        &mut self,
        grid: &mut Grid,
        factor: i32,
        radius: u32,
    ) -> Option<GridCoord> {
        if !self.can_use_ability() {
            debug!(
                "Time ability refused: energy {:.1} < cost {:.1}",
                self.energy, self.ability_cost
            );
            return None;
        }
        self.energy -= self.ability_cost;
        let center = self.grid_coord();
        let touched = grid.apply_effect_in_radius(center, radius, factor);
        debug!("Time shifted by {factor} around {center} ({touched} cells)");
        Some(center)
    }

    fn clamp_to_field(&self, position: Vec2) -> Vec2 {
        let half = self.size / 2.0;
        let max_x = (self.field.x - half).max(half);
        let max_y = (self.field.y - half).max(half);
        Vec2::new(position.x.clamp(half, max_x), position.y.clamp(half, max_y))
    }
}

impl Tick for Gardener {
    type Context<'a> = &'a Intents;
    /// Whether the gardener moved.
    type Outcome = bool;

    fn tick(&mut self, intents: &Intents) -> bool {
        self.moving = intents.has_movement();
        if self.moving {
            let step = intents.movement.normalized().scale(self.speed);
            self.position = self.clamp_to_field(self.position + step);
        } else {
            self.energy = (self.energy + self.energy_regen).min(self.max_energy);
        }
        self.moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{GrowthThresholds, PlantStage};
    use crate::input::{Action, IntentTracker};

    fn gardener() -> Gardener {
        Gardener::new(&GardenConfig::default())
    }

    #[test]
    fn test_starts_centered_with_full_energy() {
        let g = gardener();
        assert_eq!(g.position(), Vec2::new(320.0, 240.0));
        assert_eq!(g.grid_coord(), GridCoord::new(8, 8));
        assert!((g.energy() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_moves_by_speed() {
        let mut g = gardener();
        assert!(g.tick(&Intents::moving(1.0, 0.0)));
        assert!((g.position().x - 323.0).abs() < 0.001);
        assert!((g.position().y - 240.0).abs() < 0.001);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut g = gardener();
        let start = g.position();
        g.tick(&Intents::moving(1.0, 1.0));
        let dx = g.position().x - start.x;
        let dy = g.position().y - start.y;
        assert!(((dx * dx + dy * dy).sqrt() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_clamped_to_field() {
        let mut g = gardener();
        for _ in 0..500 {
            g.tick(&Intents::moving(-1.0, -1.0));
        }
        assert_eq!(g.position(), Vec2::new(15.0, 15.0));

        for _ in 0..500 {
            g.tick(&Intents::moving(1.0, 1.0));
        }
        assert_eq!(g.position(), Vec2::new(625.0, 465.0));
    }

    #[test]
    fn test_regen_only_when_idle_and_capped() {
        let mut g = gardener();
        let mut grid = Grid::new(16, 16, GrowthThresholds::default());
        g.try_apply_time_effect(&mut grid, 10, 1);
        assert!((g.energy() - 95.0).abs() < 0.001);

        g.tick(&Intents::moving(0.0, 1.0));
        assert!((g.energy() - 95.0).abs() < 0.001);

        for _ in 0..20 {
            g.tick(&Intents::idle());
        }
        assert!((g.energy() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_opposite_keys_hold_position_without_regen() {
        let mut g = gardener();
        let mut grid = Grid::new(16, 16, GrowthThresholds::default());
        g.try_apply_time_effect(&mut grid, 10, 1);
        let start = g.position();

        let mut tracker = IntentTracker::new();
        for _ in 0..10 {
            let intents = tracker.update(&[Action::MoveLeft, Action::MoveRight]);
            assert!(g.tick(&intents));
        }
        assert_eq!(g.position(), start);
        assert!(g.is_moving());
        assert!((g.energy() - 95.0).abs() < 0.001);
    }

    #[test]
    fn test_ability_refused_without_energy() {
        let config = GardenConfig {
            max_energy: 4.0,
            ..GardenConfig::default()
        };
        let mut g = Gardener::new(&config);
        let mut grid = Grid::new(16, 16, GrowthThresholds::default());
        let center = GridCoord::new(8, 8);
        grid.get_mut(center).expect("cell").plant();

        assert_eq!(g.try_apply_time_effect(&mut grid, 10, 1), None);
        assert!((g.energy() - 4.0).abs() < 0.001);
        assert_eq!(grid.get(center).expect("cell").growth_clock(), 1);
    }

    #[test]
    fn test_ability_off_grid_still_costs_energy() {
        let mut g = gardener();
        g.set_position(Vec2::new(20.0, 240.0));
        let mut grid = Grid::new(16, 16, GrowthThresholds::default());

        let center = g.try_apply_time_effect(&mut grid, 10, 1);
        assert_eq!(center, Some(GridCoord::new(-2, 8)));
        assert!((g.energy() - 95.0).abs() < 0.001);
        assert_eq!(grid.count_stage(PlantStage::Empty), 256);
    }

    #[test]
    fn test_time_direction_factor() {
        assert_eq!(TimeDirection::Accelerate.factor(10), 10);
        assert_eq!(TimeDirection::Reverse.factor(10), -10);
    }
}
