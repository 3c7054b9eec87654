//! Serializable view of a garden session.
//!
//! Snapshots are plain data: they carry no rules and cannot be stepped. The
//! headless runner writes one at the end of a run, and renderers can diff two
//! consecutive snapshots instead of holding a borrow on the simulation.

use garden_common::{GardenError, GardenResult, GridCoord, PestId};
use serde::{Deserialize, Serialize};

use crate::beauty::BeautyMeter;
use crate::cell::{Cell, PlantStage};
use crate::gardener::Gardener;
use crate::grid::Grid;
use crate::input::Vec2;
use crate::pest::Pest;

/// One cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Grid coordinate
    pub coord: GridCoord,
    /// Lifecycle stage
    pub stage: PlantStage,
    /// Growth clock
    pub growth_clock: i32,
    /// Weed present
    pub has_weed: bool,
    /// Weed clock
    pub weed_clock: i32,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            coord: cell.coord(),
            stage: cell.stage(),
            growth_clock: cell.growth_clock(),
            has_weed: cell.has_weed(),
            weed_clock: cell.weed_clock(),
        }
    }
}

/// One pest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestSnapshot {
    /// Pest ID
    pub id: PestId,
    /// Grid coordinate
    pub coord: GridCoord,
    /// Remaining lifespan
    pub lifespan: i32,
}

impl From<&Pest> for PestSnapshot {
    fn from(pest: &Pest) -> Self {
        Self {
            id: pest.id(),
            coord: pest.coord(),
            lifespan: pest.lifespan(),
        }
    }
}

/// The gardener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenerSnapshot {
    /// Position in play-field units
    pub position: Vec2,
    /// Cell under the gardener (may be off the grid)
    pub cell: GridCoord,
    /// Temporal energy
    pub energy: f32,
    /// Energy ceiling
    pub max_energy: f32,
    /// A direction was held on the last tick
    #[serde(default)]
    pub moving: bool,
}

/// Complete session state at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenSnapshot {
    /// Ticks simulated so far
    pub tick: u64,
    /// Harvest score
    pub score: u64,
    /// Beauty value
    pub beauty: f32,
    /// Beauty ceiling
    pub max_beauty: f32,
    /// Grid width in cells
    pub grid_width: u32,
    /// Grid height in cells
    pub grid_height: u32,
    /// Cells in row-major order
    pub cells: Vec<CellSnapshot>,
    /// Live pests
    pub pests: Vec<PestSnapshot>,
    /// The gardener
    pub gardener: GardenerSnapshot,
}

impl GardenSnapshot {
    /// Capture the current state of every garden entity.
    #[must_use]
    pub fn capture(
        tick: u64,
        score: u64,
        grid: &Grid,
        gardener: &Gardener,
        pests: &[Pest],
        beauty: &BeautyMeter,
    ) -> Self {
        Self {
            tick,
            score,
            beauty: beauty.value(),
            max_beauty: beauty.max(),
            grid_width: grid.width(),
            grid_height: grid.height(),
            cells: grid.iter().map(CellSnapshot::from).collect(),
            pests: pests.iter().map(PestSnapshot::from).collect(),
            gardener: GardenerSnapshot {
                position: gardener.position(),
                cell: gardener.grid_coord(),
                energy: gardener.energy(),
                max_energy: gardener.max_energy(),
                moving: gardener.is_moving(),
            },
        }
    }

    /// Number of cells in a stage.
    #[must_use]
    pub fn count_stage(&self, stage: PlantStage) -> usize {
        self.cells.iter().filter(|c| c.stage == stage).count()
    }

    /// Number of cells with a weed.
    #[must_use]
    pub fn count_weeds(&self) -> usize {
        self.cells.iter().filter(|c| c.has_weed).count()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> GardenResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GardenError::Serialization(e.to_string()))
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> GardenResult<Self> {
        serde_json::from_str(json).map_err(|e| GardenError::Serialization(e.to_string()))
    }
}
