//! Coordinate types for garden grid positions.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unit steps in the four orthogonal directions (down, up, right, left).
pub const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Cell coordinate on the garden grid.
///
/// Coordinates are signed so that positions derived near the play-field edge can
/// fall outside the grid; consumers bounds-check before indexing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct GridCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Chebyshev distance between two coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Whether `other` lies inside the square block of the given radius around `self`.
    #[must_use]
    pub fn is_within(self, other: Self, radius: u32) -> bool {
        self.chebyshev_distance(other) <= radius
    }

    /// Coordinates of the `(2r+1)²` block centered here that fall inside a
    /// `width` x `height` grid, row by row.
    ///
    /// Both axes are clipped before iterating, so the cost is bounded by the
    /// grid size whatever the radius.
    pub fn block_within(self, radius: u32, width: u32, height: u32) -> impl Iterator<Item = GridCoord> {
        let (x_lo, x_hi) = clip_axis(self.x, radius, width);
        let (y_lo, y_hi) = clip_axis(self.y, radius, height);
        (y_lo..=y_hi)
            .flat_map(move |y| (x_lo..=x_hi).map(move |x| GridCoord::new(x as i32, y as i32)))
    }

    /// Converts to a row-major index for a grid of the given width.
    ///
    /// Returns `None` for negative components or a column outside the width.
    #[must_use]
    pub fn to_index(self, width: u32) -> Option<usize> {
        let x = u32::try_from(self.x).ok()?;
        let y = u32::try_from(self.y).ok()?;
        if x >= width {
            return None;
        }
        Some(y as usize * width as usize + x as usize)
    }

    /// Creates from a row-major index.
    #[must_use]
    pub const fn from_index(index: usize, width: u32) -> Self {
        let size = width as usize;
        Self {
            x: (index % size) as i32,
            y: (index / size) as i32,
        }
    }
}

/// Inclusive `[center - r, center + r]` range clipped to `[0, len)`. Empty when `lo > hi`.
fn clip_axis(center: i32, radius: u32, len: u32) -> (i64, i64) {
    let r = i64::from(radius);
    let lo = (i64::from(center) - r).max(0);
    let hi = (i64::from(center) + r).min(i64::from(len) - 1);
    (lo, hi)
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
