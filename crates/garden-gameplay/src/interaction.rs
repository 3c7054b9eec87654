//! Context-sensitive interaction with the cell under the gardener.
//!
//! A single interact press does exactly one thing, chosen by a fixed priority:
//! harvest a mature plant, otherwise pull a weed, otherwise sow a seed.

use garden_common::GridCoord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Cell;
use crate::grid::Grid;

/// Reasons an interact press had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// The gardener is standing outside the grid
    #[error("no cell at {0}")]
    OffGrid(GridCoord),

    /// The cell offers nothing to do (e.g. growing plant without weed)
    #[error("nothing to do at {0}")]
    NothingToDo(GridCoord),
}

/// Result type for interaction operations.
pub type InteractionResult<T> = Result<T, InteractionError>;

/// One of the actions an interact press can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interaction {
    /// Collect a mature plant
    Harvest,
    /// Pull a weed
    RemoveWeed,
    /// Sow a seed in an empty cell
    Plant,
}

impl Interaction {
    /// Candidates in the order they are tried.
    pub const PRIORITY: [Interaction; 3] = [
        Interaction::Harvest,
        Interaction::RemoveWeed,
        Interaction::Plant,
    ];

    /// Attempt this interaction on a cell, returning whether it applied.
    pub fn attempt(self, cell: &mut Cell) -> bool {
        match self {
            Interaction::Harvest => cell.harvest(),
            Interaction::RemoveWeed => cell.remove_weed(),
            Interaction::Plant => cell.plant(),
        }
    }
}

/// Resolve an interact press on `coord`.
///
/// Returns the interaction that took effect. Score and beauty rewards are the
/// caller's business.
pub fn interact(grid: &mut Grid, coord: GridCoord) -> InteractionResult<Interaction> {
    let cell = grid
        .get_mut(coord)
        .ok_or(InteractionError::OffGrid(coord))?;
    Interaction::PRIORITY
        .into_iter()
        .find(|candidate| candidate.attempt(cell))
        .ok_or(InteractionError::NothingToDo(coord))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{GrowthThresholds, PlantStage};
    use crate::temporal::Tick;

    fn grid() -> Grid {
        Grid::new(16, 16, GrowthThresholds::default())
    }

    fn grow_weed(grid: &mut Grid, coord: GridCoord) {
        let cell = grid.get_mut(coord).expect("cell");
        let ticks = cell.thresholds().weed + 1;
        for _ in 0..ticks {
            cell.tick(());
        }
        assert!(cell.has_weed());
    }

    #[test]
    fn test_plant_on_empty() {
        let mut g = grid();
        let coord = GridCoord::new(2, 2);
        assert_eq!(interact(&mut g, coord), Ok(Interaction::Plant));
        assert_eq!(g.get(coord).expect("cell").stage(), PlantStage::Seed);
    }

    #[test]
    fn test_nothing_to_do_on_seed() {
        let mut g = grid();
        let coord = GridCoord::new(2, 2);
        interact(&mut g, coord).expect("plant");
        assert_eq!(
            interact(&mut g, coord),
            Err(InteractionError::NothingToDo(coord))
        );
    }

    #[test]
    fn test_off_grid() {
        let mut g = grid();
        let coord = GridCoord::new(-1, 4);
        assert_eq!(interact(&mut g, coord), Err(InteractionError::OffGrid(coord)));
    }

    #[test]
    fn test_harvest_before_weed() {
        // Weeds sprout long before the plant withers
        let mut g = Grid::new(
            4,
            4,
            GrowthThresholds {
                maturity: 5,
                wither: 50,
                weed: 10,
            },
        );
        let coord = GridCoord::new(1, 1);
        g.get_mut(coord).expect("cell").plant();
        grow_weed(&mut g, coord);
        assert_eq!(g.get(coord).expect("cell").stage(), PlantStage::Mature);

        assert_eq!(interact(&mut g, coord), Ok(Interaction::Harvest));
        assert!(g.get(coord).expect("cell").has_weed());
        assert_eq!(interact(&mut g, coord), Ok(Interaction::RemoveWeed));
        assert_eq!(interact(&mut g, coord), Ok(Interaction::Plant));
    }

    #[test]
    fn test_weed_removed_from_withered_cell() {
        let mut g = grid();
        let coord = GridCoord::new(7, 1);
        g.get_mut(coord).expect("cell").plant();
        grow_weed(&mut g, coord);
        assert_eq!(g.get(coord).expect("cell").stage(), PlantStage::Withered);

        assert_eq!(interact(&mut g, coord), Ok(Interaction::RemoveWeed));
        let cell = g.get(coord).expect("cell");
        assert!(!cell.has_weed());
        assert_eq!(cell.stage(), PlantStage::Withered);
        assert_eq!(
            interact(&mut g, coord),
            Err(InteractionError::NothingToDo(coord))
        );
    }
}
