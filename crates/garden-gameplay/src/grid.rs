//! Garden grid and neighborhood effects.
//!
//! The grid owns every [`Cell`] for the lifetime of a session. All lookups are
//! bounds-checked: coordinates outside the grid yield `None` and neighborhood
//! operations silently clip at the edges (no wraparound).

use garden_common::GridCoord;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, GrowthThresholds, PlantStage};
use crate::input::Vec2;
use crate::temporal::TimeAffected;

/// Fixed-size rectangular collection of cells, stored row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of empty cells.
    #[must_use]
    pub fn new(width: u32, height: u32, thresholds: GrowthThresholds) -> Self {
        let count = width as usize * height as usize;
        let cells = (0..count)
            .map(|index| Cell::new(GridCoord::from_index(index, width), thresholds))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether a coordinate lies on the grid.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.index_of(coord).is_some()
    }

    fn index_of(&self, coord: GridCoord) -> Option<usize> {
        let y = u32::try_from(coord.y).ok()?;
        if y >= self.height {
            return None;
        }
        coord.to_index(self.width)
    }

    /// Get the cell at a coordinate.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<&Cell> {
        self.index_of(coord).and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at a coordinate.
    pub fn get_mut(&mut self, coord: GridCoord) -> Option<&mut Cell> {
        self.index_of(coord).and_then(|i| self.cells.get_mut(i))
    }

    /// Iterate over all cells, row by row.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate mutably over all cells, row by row.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// In-bounds coordinates of the `(2r+1)²` block around `center`.
    pub fn neighborhood(&self, center: GridCoord, radius: u32) -> impl Iterator<Item = GridCoord> {
        center.block_within(radius, self.width, self.height)
    }

    /// Apply a time factor to every in-bounds cell around `center`.
    ///
    /// Returns the number of cells affected. The center itself may lie off the
    /// grid; only the clipped part of the block is touched.
    pub fn apply_effect_in_radius(&mut self, center: GridCoord, radius: u32, factor: i32) -> usize {
        let targets: Vec<usize> = self
            .neighborhood(center, radius)
            .filter_map(|coord| self.index_of(coord))
            .collect();
        for &index in &targets {
            if let Some(cell) = self.cells.get_mut(index) {
                cell.apply_time_effect(factor);
            }
        }
        targets.len()
    }

    /// Count cells in a given stage.
    #[must_use]
    pub fn count_stage(&self, stage: PlantStage) -> usize {
        self.cells.iter().filter(|c| c.stage() == stage).count()
    }

    /// Count cells with a weed.
    #[must_use]
    pub fn count_weeds(&self) -> usize {
        self.cells.iter().filter(|c| c.has_weed()).count()
    }
}

/// Mapping between play-field positions and grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Cell edge length.
    pub cell_size: f32,
    /// Horizontal offset of the grid inside the play field.
    pub margin_x: f32,
    /// Vertical offset of the grid inside the play field.
    pub margin_y: f32,
}

impl GridGeometry {
    /// Create a geometry from cell size and margins.
    #[must_use]
    pub const fn new(cell_size: f32, margin_x: f32, margin_y: f32) -> Self {
        Self {
            cell_size,
            margin_x,
            margin_y,
        }
    }

    /// The cell covering a play-field position.
    ///
    /// The result is not clamped and may be off the grid near the play-field edges.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> GridCoord {
        let gx = ((position.x - self.margin_x) / self.cell_size).floor();
        let gy = ((position.y - self.margin_y) / self.cell_size).floor();
        GridCoord::new(gx as i32, gy as i32)
    }

    /// Top-left corner of a cell in play-field units.
    #[must_use]
    pub fn cell_origin(&self, coord: GridCoord) -> Vec2 {
        Vec2::new(
            self.margin_x + coord.x as f32 * self.cell_size,
            self.margin_y + coord.y as f32 * self.cell_size,
        )
    }

    /// Center of a cell in play-field units.
    #[must_use]
    pub fn cell_center(&self, coord: GridCoord) -> Vec2 {
        let half = self.cell_size / 2.0;
        self.cell_origin(coord) + Vec2::new(half, half)
    }
}
